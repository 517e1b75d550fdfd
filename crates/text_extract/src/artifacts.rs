//! Predicates for spurious text leaves that some rendering engines insert.
//!
//! Engines disagree about the whitespace they materialize around block
//! elements. Traversal code never pattern-matches leaf values itself; it asks
//! the [`ArtifactFilter`] it was handed.

/// Which walk is asking.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pass {
    /// Text extraction.
    Extract,
    /// Leaf collection for selection mapping.
    Collect,
}

/// Where a leaf sits in the walk that found it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LeafContext {
    /// Index of the leaf among the siblings being scanned.
    pub position: usize,
    /// The scan was entered directly from a breaking element.
    pub after_break: bool,
    pub pass: Pass,
}

pub trait ArtifactFilter {
    /// `value` is the raw (un-normalized) leaf text.
    fn is_artifact_leaf(&self, value: &str, cx: &LeafContext) -> bool;
}

impl<F> ArtifactFilter for F
where
    F: Fn(&str, &LeafContext) -> bool,
{
    fn is_artifact_leaf(&self, value: &str, cx: &LeafContext) -> bool {
        self(value, cx)
    }
}

/// Keeps every leaf.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NoArtifacts;

impl ArtifactFilter for NoArtifacts {
    fn is_artifact_leaf(&self, _value: &str, _cx: &LeafContext) -> bool {
        false
    }
}

/// The engine quirks seen in practice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EngineQuirks {
    /// Drop a lone `"\n"` leaf that opens the content of a breaking element
    /// (extraction only).
    pub leading_newline: bool,
    /// Drop leaves that start with a newline followed by more whitespace,
    /// i.e. source indentation kept as text (leaf collection only).
    pub whitespace_runs: bool,
}

impl EngineQuirks {
    /// Engines with a native range API.
    pub const fn native() -> Self {
        Self {
            leading_newline: false,
            whitespace_runs: true,
        }
    }

    /// Legacy text-range engines, which also emit the leading newline.
    pub const fn legacy() -> Self {
        Self {
            leading_newline: true,
            whitespace_runs: true,
        }
    }
}

impl Default for EngineQuirks {
    fn default() -> Self {
        Self::native()
    }
}

impl ArtifactFilter for EngineQuirks {
    fn is_artifact_leaf(&self, value: &str, cx: &LeafContext) -> bool {
        match cx.pass {
            Pass::Extract => {
                self.leading_newline && cx.after_break && cx.position == 0 && value == "\n"
            }
            Pass::Collect => self.whitespace_runs && is_whitespace_run(value),
        }
    }
}

fn is_whitespace_run(value: &str) -> bool {
    let Some(rest) = value.strip_prefix('\n') else {
        return false;
    };
    rest.chars().next().is_some_and(char::is_whitespace)
}
