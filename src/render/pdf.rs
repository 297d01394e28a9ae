//! PDF backend.
//!
//! One PDF page per layout page, one text operation per non-empty line,
//! Courier so the character grid from the paginator survives on paper.
//! Coordinates are PDF points with the origin at the bottom-left; lines are
//! placed top-down by subtracting the leading per row. Grids taller than the
//! text block shrink the leading, and the font with it, so every configured
//! row lands inside the page.

use oxidize_pdf::{Document, Font, Page};

use crate::layout::PageLayout;

use super::{PageRenderer, RenderError};

/// A4 page height in points.
const PAGE_HEIGHT_PT: f64 = 842.0;
/// Text block inset when the layout asks for margins.
const MARGIN_PT: f64 = 36.0;
const FONT_SIZE_PT: f64 = 10.0;
const LINE_HEIGHT_PT: f64 = 12.0;

/// Monospace text pages on A4.
pub struct PdfRenderer;

impl PageRenderer for PdfRenderer {
    fn media_type(&self) -> &'static str {
        "application/pdf"
    }

    fn file_extension(&self) -> &'static str {
        "pdf"
    }

    fn render(&self, title: &str, layout: &PageLayout) -> Result<Vec<u8>, RenderError> {
        let margin = if layout.config.margins { MARGIN_PT } else { 0.0 };
        let leading = line_leading(margin, layout.config.height);
        let font_size = FONT_SIZE_PT * (leading / LINE_HEIGHT_PT);

        let mut doc = Document::new();
        doc.set_title(title);

        for layout_page in &layout.pages {
            let mut page = Page::a4();
            for (row, line) in layout_page.lines.iter().enumerate() {
                if line.is_empty() {
                    continue;
                }
                let baseline = PAGE_HEIGHT_PT - margin - leading * (row as f64 + 1.0);
                page.text()
                    .set_font(Font::Courier, font_size)
                    .at(margin, baseline)
                    .write(line)?;
            }
            doc.add_page(page);
        }

        let mut bytes = Vec::new();
        doc.write(&mut bytes)?;
        Ok(bytes)
    }
}

/// Line spacing for a page of `height` rows: the standard leading, shrunk
/// when the configured grid would overrun the text block.
fn line_leading(margin: f64, height: usize) -> f64 {
    let usable = PAGE_HEIGHT_PT - 2.0 * margin;
    LINE_HEIGHT_PT.min(usable / height as f64)
}
