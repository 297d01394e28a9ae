//! EPUB reading pipeline.
//!
//! Three stages, each with one job:
//!
//! ```text
//! bytes ──► EpubArchive ──► PackageDocument ──► ExtractedText
//!           (zip index)     (manifest + spine)   (plain text)
//! ```
//!
//! - `archive`: index the ZIP container in memory.
//! - `package`: follow `META-INF/container.xml` to the OPF and resolve the
//!   manifest and spine into a [`PackageDocument`].
//! - `extract`: walk the spine and collect plain text per chapter.
//!
//! All failures use the [`EpubError`] taxonomy; every variant is terminal.

pub mod archive;
pub mod error;
pub mod extract;
pub mod package;

pub use archive::EpubArchive;
pub use error::EpubError;
pub use extract::{extract, ExtractedText};
pub use package::{resolve_package, ManifestEntry, PackageDocument, CONTAINER_PATH};
