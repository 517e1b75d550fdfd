use crate::backend::SelectionBackend;
use crate::error::SelectionError;
use crate::leaves::leaf_value;
use crate::range::{Locus, SelectionHandle, SelectionRange};
use dom::{Id, Node, char_len};
use text_extract::{ArtifactFilter, EngineQuirks};

/// Backend for engines with a DOM-range style selection.
///
/// The selection is an anchor and a focus position, each a leaf and an
/// offset. Both are checked against the tree whenever they are read, so a
/// selection inside a removed leaf reads as [`SelectionError::NoSelection`].
pub struct NativeSelectionBackend {
    anchor: Option<Locus>,
    focus: Option<Locus>,
    filter: Box<dyn ArtifactFilter>,
}

impl NativeSelectionBackend {
    pub fn new() -> Self {
        Self::with_filter(EngineQuirks::native())
    }

    pub fn with_filter(filter: impl ArtifactFilter + 'static) -> Self {
        Self {
            anchor: None,
            focus: None,
            filter: Box::new(filter),
        }
    }

    /// Set the selection the way the host's engine reports it, e.g. after a
    /// click. `focus` may precede `anchor`.
    pub fn place(&mut self, anchor: Locus, focus: Locus) {
        self.anchor = Some(anchor);
        self.focus = Some(focus);
    }

    pub fn place_caret(&mut self, at: Locus) {
        self.place(at, at);
    }

    fn valid(root: &Node, locus: Option<Locus>) -> Option<Locus> {
        let locus = locus?;
        let len = char_len(leaf_value(root, locus.leaf)?);
        Some(Locus::new(locus.leaf, locus.offset.min(len)))
    }
}

impl Default for NativeSelectionBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionBackend for NativeSelectionBackend {
    fn artifacts(&self) -> &dyn ArtifactFilter {
        self.filter.as_ref()
    }

    fn current_locus(&self, root: &Node) -> Result<Locus, SelectionError> {
        Self::valid(root, self.anchor).ok_or(SelectionError::NoSelection)
    }

    fn local_offset(&self, root: &Node, _leaf: Id) -> Result<usize, SelectionError> {
        // The engine reports the anchor offset directly.
        self.current_locus(root).map(|locus| locus.offset)
    }

    fn select(
        &mut self,
        root: &Node,
        leaf: Id,
        start: usize,
        end: usize,
    ) -> Result<SelectionHandle, SelectionError> {
        let value = leaf_value(root, leaf).ok_or(SelectionError::LeafNotFound(leaf))?;
        let range = SelectionRange::new(start, end).clamp_to(char_len(value));
        self.place(Locus::new(leaf, range.start), Locus::new(leaf, range.end));
        Ok(SelectionHandle { leaf, range })
    }

    fn selected_span(&self, root: &Node) -> Result<SelectionHandle, SelectionError> {
        let anchor = self.current_locus(root)?;
        let range = match Self::valid(root, self.focus) {
            Some(focus) if focus.leaf == anchor.leaf => {
                SelectionRange::new(anchor.offset, focus.offset)
            }
            // A selection spanning leaves collapses to its anchor.
            _ => SelectionRange::caret(anchor.offset),
        };
        Ok(SelectionHandle {
            leaf: anchor.leaf,
            range,
        })
    }

    fn clear(&mut self) {
        self.anchor = None;
        self.focus = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dom::{assign_node_ids, remove_node};

    fn tree() -> Node {
        let mut root = Node::editable_root(vec![
            Node::text("hi "),
            Node::element("span", vec![Node::text("there")]),
        ]);
        assign_node_ids(&mut root);
        root
    }

    #[test]
    fn nothing_selected_initially() {
        let root = tree();
        let backend = NativeSelectionBackend::new();
        assert_eq!(backend.current_locus(&root), Err(SelectionError::NoSelection));
        assert_eq!(backend.selected_span(&root), Err(SelectionError::NoSelection));
    }

    #[test]
    fn select_then_read_back() {
        let root = tree();
        let leaf = root.children()[1].children()[0].id();
        let mut backend = NativeSelectionBackend::new();

        let handle = backend.select(&root, leaf, 1, 4).expect("leaf exists");
        assert_eq!(handle.range, SelectionRange::new(1, 4));
        assert_eq!(backend.current_locus(&root), Ok(Locus::new(leaf, 1)));
        assert_eq!(backend.local_offset(&root, leaf), Ok(1));
        assert_eq!(backend.selected_span(&root), Ok(handle));
    }

    #[test]
    fn select_clamps_and_rejects_non_leaves() {
        let root = tree();
        let leaf = root.children()[0].id();
        let span = root.children()[1].id();
        let mut backend = NativeSelectionBackend::new();

        let handle = backend.select(&root, leaf, 9, 2).expect("leaf exists");
        assert_eq!(handle.range, SelectionRange::new(2, 3));
        assert_eq!(
            backend.select(&root, span, 0, 0),
            Err(SelectionError::LeafNotFound(span))
        );
    }

    #[test]
    fn removed_anchor_reads_as_no_selection() {
        let mut root = tree();
        let span = root.children()[1].id();
        let leaf = root.children()[1].children()[0].id();
        let mut backend = NativeSelectionBackend::new();
        backend.select(&root, leaf, 2, 2).expect("leaf exists");

        remove_node(&mut root, span).expect("span is removable");
        assert_eq!(backend.current_locus(&root), Err(SelectionError::NoSelection));
    }

    #[test]
    fn cross_leaf_selection_collapses_to_anchor() {
        let root = tree();
        let first = root.children()[0].id();
        let second = root.children()[1].children()[0].id();
        let mut backend = NativeSelectionBackend::new();
        backend.place(Locus::new(first, 1), Locus::new(second, 3));

        let span = backend.selected_span(&root).expect("selection is valid");
        assert_eq!(span.leaf, first);
        assert_eq!(span.range, SelectionRange::caret(1));
    }
}
