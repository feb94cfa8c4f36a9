//! Whitespace normalization for extracted page text.
//!
//! PDF extractors emit line breaks, tabs and runs of spaces wherever
//! the layout had them. Every page is reduced to a single line with
//! one space between tokens before chunking, so chunk boundaries and
//! overlap are measured over the same canonical text.

/// Trim the text and collapse every whitespace run into one space.
///
/// Whitespace is anything Unicode classifies as `White_Space` plus the
/// ASCII information separators U+001C..=U+001F, which some extractors
/// emit between table cells and records.
///
/// # Example
///
/// ```
/// use folio::core::ingest::normalize;
///
/// assert_eq!(normalize("  Hello\n\nworld \t foo  "), "Hello world foo");
/// assert_eq!(normalize(""), "");
/// ```
pub fn normalize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());

    for token in raw.split(is_separator).filter(|t| !t.is_empty()) {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(token);
    }

    out
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}

/// Normalize text that may be absent; `None` maps to the empty string.
pub fn normalize_opt(raw: Option<&str>) -> String {
    raw.map(normalize).unwrap_or_default()
}
