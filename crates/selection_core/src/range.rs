//! Selection positions inside a text leaf.

use dom::Id;

/// A char range inside one leaf's normalized value.
///
/// The range is always normalized such that `start <= end`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SelectionRange {
    /// Start char offset (inclusive).
    pub start: usize,
    /// End char offset (exclusive).
    pub end: usize,
}

impl SelectionRange {
    /// Create a new selection range.
    ///
    /// The range is automatically normalized so `start <= end`.
    #[inline]
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    #[inline]
    pub fn caret(at: usize) -> Self {
        Self { start: at, end: at }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Clamp both ends to `len` chars.
    #[inline]
    pub fn clamp_to(self, len: usize) -> Self {
        Self::new(self.start.min(len), self.end.min(len))
    }
}

/// A caret position: a text leaf and a char offset in its normalized value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Locus {
    pub leaf: Id,
    pub offset: usize,
}

impl Locus {
    pub fn new(leaf: Id, offset: usize) -> Self {
        Self { leaf, offset }
    }
}

/// The selection a backend committed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectionHandle {
    pub leaf: Id,
    pub range: SelectionRange,
}

impl SelectionHandle {
    pub fn anchor(&self) -> Locus {
        Locus::new(self.leaf, self.range.start)
    }
}
