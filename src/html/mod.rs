//! Markup-to-text cleanup for chapter content.
//!
//! Deliberately crude: chapters are XHTML, but for plain-text extraction we
//! only need to drop the tags and flatten the whitespace they leave behind.
//! There is no entity decoding (`&amp;` stays `&amp;`) and no awareness of
//! block vs. inline elements beyond the space each stripped tag leaves.

/// Replace every `<...>` run with a single space.
///
/// A tag spans from a `<` to the next `>`, with no nesting or quoting rules.
/// A `<` that never closes is kept as literal text, as is a stray `>`.
pub fn strip_tags(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len());
    let mut rest = markup;

    while let Some(open) = rest.find('<') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        match tail.find('>') {
            Some(close) => {
                out.push(' ');
                rest = &tail[close + 1..];
            }
            None => {
                // Unterminated tag: everything from '<' on is literal text.
                out.push_str(tail);
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}

/// Collapse every run of whitespace to a single space and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Strip tags, then collapse whitespace.
pub fn to_plain_text(markup: &str) -> String {
    collapse_whitespace(&strip_tags(markup))
}
