//! Character-grid pagination.
//!
//! [`paginate`] lays plain text onto fixed-size pages: `width` characters
//! per line, `height` lines per page. Wrapping is greedy and purely
//! character-counted, with no word boundaries and no hyphenation, which
//! keeps the guarantee simple: every character of the input appears in the
//! layout exactly once, in order. The function is pure; rendering concerns
//! like fonts and physical margins live behind [`crate::render`].

/// Default page width in characters.
pub const DEFAULT_PAGE_WIDTH: usize = 80;
/// Default page height in lines.
pub const DEFAULT_PAGE_HEIGHT: usize = 60;

/// Page geometry for [`paginate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageConfig {
    /// Line width in characters.
    pub width: usize,
    /// Page height in lines.
    pub height: usize,
    /// Whether the renderer should inset the text block from the page edge.
    /// Carried through untouched; splitting ignores it.
    pub margins: bool,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_PAGE_WIDTH,
            height: DEFAULT_PAGE_HEIGHT,
            margins: true,
        }
    }
}

/// One page of rendered lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    pub lines: Vec<String>,
}

/// The paginated document. `config` records the geometry the pages actually
/// follow (zero dimensions are clamped to 1 before splitting).
#[derive(Debug, Clone)]
pub struct PageLayout {
    pub config: PageConfig,
    pub pages: Vec<Page>,
}

impl PageLayout {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn line_count(&self) -> usize {
        self.pages.iter().map(|page| page.lines.len()).sum()
    }
}

/// Lay text onto pages.
///
/// Input splits on `'\n'`; blank lines become empty rendered lines. Each
/// logical line wraps greedily at `width` characters. Pages fill top-down;
/// a line that would not fit in the remaining height opens the next page and
/// becomes its first line. Empty input yields one page with one empty line.
pub fn paginate(text: &str, config: PageConfig) -> PageLayout {
    let config = PageConfig {
        width: config.width.max(1),
        height: config.height.max(1),
        margins: config.margins,
    };

    let mut pages = Vec::new();
    let mut current = Page::default();

    for logical in text.split('\n') {
        for rendered in wrap_line(logical, config.width) {
            if current.lines.len() == config.height {
                pages.push(std::mem::take(&mut current));
            }
            current.lines.push(rendered);
        }
    }
    pages.push(current);

    PageLayout { config, pages }
}

/// Greedily split one logical line into `width`-character chunks.
///
/// An empty line yields exactly one empty chunk; a line of exactly `width`
/// characters yields one chunk with no empty tail.
fn wrap_line(line: &str, width: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut count = 0;

    for ch in line.chars() {
        if count == width {
            chunks.push(std::mem::take(&mut current));
            count = 0;
        }
        current.push(ch);
        count += 1;
    }
    chunks.push(current);

    chunks
}
