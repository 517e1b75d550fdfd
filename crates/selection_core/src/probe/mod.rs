//! Steppable text-range primitive for engines without a native selection API.
//!
//! A probe is a virtual range over the characters of the rendered document.
//! Its ends move by whole characters, it can report the text it brackets and
//! the element that contains it, and it can be committed as the user's
//! selection. Nothing else about the engine is assumed.

mod fallback;
mod linear;

pub use fallback::{ProbeConfig, ProbeSelectionBackend};
pub use linear::{LinearProbe, LinearRange, TextLayout};

use dom::{Id, Node};

/// Element a probe resolved inside.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Container {
    /// Outside the editable root: the document body itself.
    Body,
    Element(Id),
}

pub trait ProbeRange: Clone {
    /// Move the start by `units` chars (negative is backward). The start
    /// never passes the document bounds; if it passes the end, the end
    /// follows. Returns how far it actually moved.
    fn move_start(&mut self, units: isize) -> isize;

    /// Move the end by `units` chars; the mirror image of [`Self::move_start`].
    fn move_end(&mut self, units: isize) -> isize;

    /// Bracketed text, exactly as the engine renders it (NBSP included).
    fn text(&self) -> String;

    fn container(&self) -> Container;

    /// Collapse onto the start (`true`) or the end.
    fn collapse(&mut self, to_start: bool);
}

pub trait ProbeSurface {
    type Range: ProbeRange;

    /// A fresh probe over the active selection in the document `root` belongs to.
    fn selection_range(&self, root: &Node) -> Self::Range;

    /// Move focus into the editable root.
    fn focus(&mut self, root: &Node);

    /// Make `range` the active selection.
    fn commit(&mut self, range: &Self::Range);

    /// Drop the active selection.
    fn blur(&mut self);
}
