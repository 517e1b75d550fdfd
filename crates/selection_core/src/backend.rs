//! Selection backend strategy.
//!
//! A backend is picked once, when the editable region is built, depending on
//! what the engine offers:
//!
//! - [`NativeSelectionBackend`](crate::NativeSelectionBackend) when a DOM-range
//!   style selection API exists;
//! - [`ProbeSelectionBackend`](crate::ProbeSelectionBackend) when only a
//!   steppable text range is available and loci have to be recovered by
//!   diffing content.
//!
//! Callers never branch on the engine after that point.

use crate::error::SelectionError;
use crate::range::{Locus, SelectionHandle};
use dom::{Id, Node};
use text_extract::ArtifactFilter;

/// Maps between the engine's selection and (leaf, offset) pairs.
///
/// All offsets are chars of the leaf's normalized value. `root` is the
/// editable root; backends never mutate it.
pub trait SelectionBackend {
    /// Spurious leaves this engine is known to produce.
    fn artifacts(&self) -> &dyn ArtifactFilter;

    /// Leaf and offset at the start of the active selection.
    fn current_locus(&self, root: &Node) -> Result<Locus, SelectionError>;

    /// Offset of the active selection start inside `leaf`.
    fn local_offset(&self, root: &Node, leaf: Id) -> Result<usize, SelectionError>;

    /// Select chars `start..end` of `leaf`. Offsets past the end are clamped.
    fn select(
        &mut self,
        root: &Node,
        leaf: Id,
        start: usize,
        end: usize,
    ) -> Result<SelectionHandle, SelectionError>;

    /// The active selection restricted to the leaf it starts in.
    fn selected_span(&self, root: &Node) -> Result<SelectionHandle, SelectionError>;

    /// Drop the active selection.
    fn clear(&mut self);
}
