//! Classification of elements that force a line boundary in extracted text.

use std::borrow::Cow;

/// Block-level and break elements, in no particular order.
pub const DEFAULT_BREAKING_TAGS: &[&str] = &[
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "p",
    "pre",
    "blockquote",
    "address",
    "ul",
    "ol",
    "dir",
    "menu",
    "li",
    "dl",
    "div",
    "center",
    "form",
    "hr",
    "br",
];

/// Immutable set of breaking tag names.
///
/// The default set is a process-wide constant; a custom set is fixed once it
/// is built and handed to a config.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BreakingTags {
    names: Cow<'static, [&'static str]>,
}

impl BreakingTags {
    pub const fn standard() -> Self {
        Self {
            names: Cow::Borrowed(DEFAULT_BREAKING_TAGS),
        }
    }

    pub fn custom(names: &[&'static str]) -> Self {
        Self {
            names: Cow::Owned(names.to_vec()),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n.eq_ignore_ascii_case(name))
    }

    pub fn names(&self) -> &[&'static str] {
        &self.names
    }
}

impl Default for BreakingTags {
    fn default() -> Self {
        Self::standard()
    }
}

/// `br` is the one breaking element that never has content.
#[inline]
pub fn is_line_break(name: &str) -> bool {
    name.eq_ignore_ascii_case("br")
}

/// Elements that never take children in the fragment parser.
pub fn is_void(name: &str) -> bool {
    matches!(
        name.to_ascii_lowercase().as_str(),
        "br" | "hr" | "img" | "input" | "wbr" | "meta" | "link"
    )
}
