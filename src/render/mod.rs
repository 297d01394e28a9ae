//! Rendering backends for paginated text.
//!
//! The paginator produces a [`PageLayout`]; anything that can turn that into
//! downloadable bytes is a backend. The seam is the [`PageRenderer`] trait,
//! selected per-request through [`OutputFormat`].

mod pdf;
mod text;

pub use pdf::PdfRenderer;
pub use text::TextRenderer;

use serde::Deserialize;
use thiserror::Error;

use crate::layout::PageLayout;

/// Backend failures. These are never the client's fault; the HTTP layer
/// maps them to the internal error class.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("PDF generation failed: {0}")]
    Pdf(#[from] oxidize_pdf::PdfError),
}

/// A rendering backend for page layouts.
pub trait PageRenderer: Send + Sync {
    /// MIME type of the rendered output.
    fn media_type(&self) -> &'static str;

    /// Filename extension of the rendered output, without the dot.
    fn file_extension(&self) -> &'static str;

    /// Render the layout into downloadable bytes. `title` is the document
    /// title for backends that carry metadata.
    fn render(&self, title: &str, layout: &PageLayout) -> Result<Vec<u8>, RenderError>;
}

/// Requested output format, parsed from the `format` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Pdf,
    Txt,
}

impl OutputFormat {
    /// The backend implementing this format.
    pub fn renderer(self) -> Box<dyn PageRenderer> {
        match self {
            OutputFormat::Pdf => Box::new(PdfRenderer),
            OutputFormat::Txt => Box::new(TextRenderer),
        }
    }
}
