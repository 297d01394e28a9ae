//! Plain-text backend.
//!
//! Lines join with `'\n'`; pages are separated by an ASCII form feed, the
//! traditional page break for line printers and `pr`-style tooling. The
//! layout survives byte-for-byte: splitting the output on form feeds gives
//! back exactly the pages the paginator produced.

use crate::layout::PageLayout;

use super::{PageRenderer, RenderError};

/// Form feed between pages, newline-terminated lines.
pub struct TextRenderer;

impl PageRenderer for TextRenderer {
    fn media_type(&self) -> &'static str {
        "text/plain; charset=utf-8"
    }

    fn file_extension(&self) -> &'static str {
        "txt"
    }

    fn render(&self, _title: &str, layout: &PageLayout) -> Result<Vec<u8>, RenderError> {
        let mut out = String::new();
        for (index, page) in layout.pages.iter().enumerate() {
            if index > 0 {
                out.push('\u{0C}');
            }
            for line in &page.lines {
                out.push_str(line);
                out.push('\n');
            }
        }
        Ok(out.into_bytes())
    }
}
