//! Error taxonomy for the EPUB pipeline.
//!
//! Every variant is terminal: the pipeline never retries or degrades, it
//! either produces text or reports exactly where the input stopped being an
//! EPUB. Skipped spine entries are not errors (see the `extract` module);
//! only the case where nothing survives extraction is.

use thiserror::Error;

/// Errors that can occur while reading an EPUB and extracting its text.
#[derive(Error, Debug)]
pub enum EpubError {
    /// The upload is not a readable ZIP archive (bad magic, truncated data,
    /// corrupt entry stream).
    #[error("corrupt archive: {0}")]
    CorruptArchive(#[from] zip::result::ZipError),

    /// The archive has no `META-INF/container.xml`.
    #[error("missing META-INF/container.xml")]
    MissingContainer,

    /// `container.xml` exists but cannot be parsed, or names no package
    /// document.
    #[error("malformed container document: {0}")]
    MalformedContainer(String),

    /// `container.xml` points at a package document that is not in the
    /// archive.
    #[error("package document not found in archive: {0}")]
    MissingPackageDocument(String),

    /// The package document cannot be parsed, or lacks a manifest or spine.
    #[error("malformed package document: {0}")]
    MalformedPackage(String),

    /// Every spine entry was skipped or produced no text.
    #[error("no spine entry yielded any text")]
    EmptyExtraction,
}

pub type Result<T> = std::result::Result<T, EpubError>;
