//! Character-level helpers shared by extraction and selection.
//!
//! Offsets in this workspace count `char`s of the normalized value, not bytes.
//! Normalization maps one char to one char, so a raw offset and a normalized
//! offset always agree.

use std::borrow::Cow;

pub const NBSP: char = '\u{00A0}';

/// Replace every non-breaking space with an ordinary space.
///
/// Returns `Cow::Borrowed` when there is nothing to replace.
///
/// ```
/// use dom::normalize_space;
///
/// assert_eq!(normalize_space("a\u{00A0}b"), "a b");
/// assert_eq!(normalize_space("plain"), "plain");
/// ```
pub fn normalize_space(s: &str) -> Cow<'_, str> {
    if !s.contains(NBSP) {
        return Cow::Borrowed(s);
    }
    Cow::Owned(s.replace(NBSP, " "))
}

/// Escape markup-significant characters so `s` reads back as plain text.
///
/// ```
/// use dom::escape_text;
///
/// assert_eq!(escape_text("<b>&</b>"), "&lt;b&gt;&amp;&lt;/b&gt;");
/// ```
pub fn escape_text(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>']) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len() + 8);
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    Cow::Owned(out)
}

/// Number of chars in `s`.
#[inline]
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Byte index of the `chars`-th char of `s`, clamped to `s.len()`.
///
/// ```
/// use dom::byte_offset;
///
/// let s = "a€b";
/// assert_eq!(byte_offset(s, 0), 0);
/// assert_eq!(byte_offset(s, 2), 4);
/// assert_eq!(byte_offset(s, 99), 5);
/// ```
pub fn byte_offset(s: &str, chars: usize) -> usize {
    s.char_indices()
        .nth(chars)
        .map(|(idx, _)| idx)
        .unwrap_or(s.len())
}
