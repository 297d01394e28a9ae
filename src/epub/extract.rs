//! Spine-ordered text extraction.
//!
//! Walks the spine strictly in document order and turns each chapter's
//! markup into plain text. Broken references are survivable: an idref with
//! no manifest item, or a manifest path missing from the archive, skips that
//! chapter with a warning and moves on. Only a book where *nothing* survives
//! is an error.

use crate::html;

use super::archive::EpubArchive;
use super::error::{EpubError, Result};
use super::package::PackageDocument;

/// Plain text collected from the spine, one entry per non-empty chapter.
#[derive(Debug, Clone, Default)]
pub struct ExtractedText {
    pub chapters: Vec<String>,
}

impl ExtractedText {
    /// The full document text: chapters separated by a blank line.
    pub fn text(&self) -> String {
        self.chapters.join("\n\n")
    }

    pub fn len(&self) -> usize {
        self.chapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
    }
}

/// Extract plain text from every readable spine entry, in spine order.
pub fn extract(archive: &EpubArchive, package: &PackageDocument) -> Result<ExtractedText> {
    let mut chapters = Vec::with_capacity(package.spine.len());

    for idref in &package.spine {
        let Some(entry) = package.manifest.get(idref) else {
            tracing::warn!(idref = %idref, "spine entry has no manifest item, skipping");
            continue;
        };
        let Some(markup) = archive.read(&entry.path) else {
            tracing::warn!(
                idref = %idref,
                path = %entry.path,
                "manifest path not found in archive, skipping"
            );
            continue;
        };

        let text = html::to_plain_text(&markup);
        if text.is_empty() {
            tracing::debug!(idref = %idref, "chapter has no text content, omitting");
            continue;
        }
        chapters.push(text);
    }

    if chapters.is_empty() {
        return Err(EpubError::EmptyExtraction);
    }

    tracing::debug!(chapters = chapters.len(), "extraction complete");
    Ok(ExtractedText { chapters })
}
