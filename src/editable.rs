use crate::config::EditableConfig;
use crate::error::{EditableError, InvalidRoot};
use crate::host::{FragmentHost, MarkupHost};
use dom::{
    Id, Node, assign_node_ids, char_len, escape_text, find_node_by_id, last_leaf, parse_fragment,
};
use selection_core::{
    LeafRef, Locus, NativeSelectionBackend, SelectionBackend, SelectionError, SelectionHandle,
    collect_leaves, collect_leaves_of,
};
use text_extract::{Extractor, NodeOverride};

/// An editable region: a `contenteditable` root, the engine's selection
/// behind a [`SelectionBackend`], and the host that inserts markup.
///
/// Every operation runs to completion on the caller's thread. Selection
/// failures are recovered here: a query with nothing selected answers
/// `None` or `0`, an ambiguous match answers its best candidate.
pub struct Editable {
    root: Node,
    config: EditableConfig,
    backend: Box<dyn SelectionBackend>,
    host: Box<dyn MarkupHost>,
}

impl Editable {
    /// Wrap `root` using a native selection backend and the default config.
    pub fn new(root: Node) -> Result<Self, EditableError> {
        Self::with_backend(root, Box::new(NativeSelectionBackend::new()))
    }

    pub fn with_backend(
        root: Node,
        backend: Box<dyn SelectionBackend>,
    ) -> Result<Self, EditableError> {
        Self::with_config(root, EditableConfig::default(), backend)
    }

    pub fn with_config(
        mut root: Node,
        config: EditableConfig,
        backend: Box<dyn SelectionBackend>,
    ) -> Result<Self, EditableError> {
        if !matches!(root, Node::Element { .. }) {
            return Err(InvalidRoot::NotAnElement.into());
        }
        if !root.is_editable() {
            return Err(InvalidRoot::NotEditable.into());
        }
        assign_node_ids(&mut root);
        Ok(Self {
            root,
            config,
            backend,
            host: Box::new(FragmentHost),
        })
    }

    /// Replace the markup insertion host.
    pub fn with_host(mut self, host: Box<dyn MarkupHost>) -> Self {
        self.host = host;
        self
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn config(&self) -> &EditableConfig {
        &self.config
    }

    pub fn backend(&self) -> &dyn SelectionBackend {
        self.backend.as_ref()
    }

    /// Plain text of the region, newline-normalized.
    pub fn text(&self) -> String {
        self.extract(None)
    }

    /// [`Editable::text`] with a host override for element subtrees.
    pub fn text_with(&self, node_override: NodeOverride<'_>) -> String {
        self.extract(Some(node_override))
    }

    fn extract(&self, node_override: Option<NodeOverride<'_>>) -> String {
        Extractor::new(&self.config.extract, self.backend.artifacts())
            .with_override(node_override)
            .text(&self.root)
    }

    /// All text leaves of the region in document order.
    pub fn leaves(&self) -> Vec<LeafRef<'_>> {
        collect_leaves(
            self.root.children(),
            self.backend.artifacts(),
            &self.config.extract.breaking,
        )
    }

    /// Text leaves of the node `id`, or of nothing if it is not in the tree.
    pub fn leaves_in(&self, id: Id) -> Vec<LeafRef<'_>> {
        match find_node_by_id(&self.root, id) {
            Some(node) => {
                collect_leaves_of(node, self.backend.artifacts(), &self.config.extract.breaking)
            }
            None => Vec::new(),
        }
    }

    pub fn current_locus(&self) -> Option<Locus> {
        match self.backend.current_locus(&self.root) {
            Ok(locus) => Some(locus),
            Err(err) => recovered(&err),
        }
    }

    pub fn local_offset(&self, leaf: Id) -> usize {
        match self.backend.local_offset(&self.root, leaf) {
            Ok(offset) => offset,
            Err(err) => recovered(&err).map_or(0, |locus| locus.offset),
        }
    }

    /// Select chars `start..end` of `leaf`.
    pub fn select(&mut self, leaf: Id, start: usize, end: usize) -> Option<SelectionHandle> {
        match self.backend.select(&self.root, leaf, start, end) {
            Ok(handle) => Some(handle),
            Err(err) => {
                log::debug!(target: "editable.selection", "select failed: {err}");
                None
            }
        }
    }

    /// Insert `markup` in place of the active selection and put the caret
    /// after it. Does nothing without a selection.
    pub fn insert_markup(&mut self, markup: &str) {
        let span = match self.backend.selected_span(&self.root) {
            Ok(span) => span,
            Err(err) => {
                log::debug!(target: "editable.selection", "insert_markup skipped: {err}");
                return;
            }
        };
        let Some(caret) = self.host.insert_markup(&mut self.root, span, markup) else {
            log::debug!(target: "editable.selection", "host inserted nothing at leaf {}", span.leaf.0);
            return;
        };
        assign_node_ids(&mut self.root);
        log::debug!(
            target: "editable.selection",
            "inserted markup at leaf {}; caret now at leaf {} offset {}",
            span.leaf.0,
            caret.leaf.0,
            caret.offset
        );
        self.select(caret.leaf, caret.offset, caret.offset);
    }

    /// Remove the node `id` and its subtree. The caret moves to the end of
    /// the previous sibling's text; without one the selection is cleared.
    ///
    /// The root itself and ids not in the tree are ignored.
    pub fn remove_node(&mut self, id: Id) {
        let Some(removed) = dom::remove_node(&mut self.root, id) else {
            log::debug!(target: "editable.selection", "remove_node: {} not removable", id.0);
            return;
        };
        log::debug!(target: "editable.selection", "removed node {}", id.0);

        let caret = removed
            .previous_sibling
            .and_then(|prev| find_node_by_id(&self.root, prev))
            .and_then(last_leaf)
            .map(|leaf| (leaf.id(), leaf.leaf_text().map_or(0, char_len)));
        match caret {
            Some((leaf, len)) => {
                self.select(leaf, len, len);
            }
            None => self.backend.clear(),
        }
    }

    /// Replace the content with plain `text`; newlines become `<br>`.
    ///
    /// Writing back what [`Editable::text`] returned leaves the text unchanged.
    pub fn set_text(&mut self, text: &str) {
        let mut markup = escape_text(text).replace('\n', "<br>");
        if self.config.extract.trim_trailing_newline && text.ends_with('\n') {
            // Reading back drops one trailing newline; give it one to drop.
            markup.push_str("<br>");
        }
        if let Some(children) = self.root.children_mut() {
            *children = parse_fragment(&markup);
        }
        assign_node_ids(&mut self.root);
        self.backend.clear();
    }
}

fn recovered(err: &SelectionError) -> Option<Locus> {
    let best = err.best_effort();
    match best {
        Some(locus) => log::debug!(
            target: "editable.selection",
            "{err}; using leaf {} offset {}",
            locus.leaf.0,
            locus.offset
        ),
        None => log::debug!(target: "editable.selection", "{err}"),
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use selection_core::{LinearProbe, ProbeSelectionBackend, SelectionRange};

    fn region(markup: &str) -> Editable {
        Editable::new(Node::editable_root(parse_fragment(markup))).expect("root is editable")
    }

    #[test]
    fn rejects_non_editable_roots() {
        let plain = Node::element("div", vec![Node::text("x")]);
        assert_eq!(
            Editable::new(plain).err(),
            Some(EditableError::InvalidRoot(InvalidRoot::NotEditable))
        );
        assert_eq!(
            Editable::new(Node::text("x")).err(),
            Some(EditableError::InvalidRoot(InvalidRoot::NotAnElement))
        );
        let bare = Node::element("section", vec![]).with_attribute("contenteditable", None);
        assert!(Editable::new(bare).is_ok());
    }

    #[test]
    fn ids_are_assigned_on_construction() {
        let editable = region("hi <b>there</b>");
        assert_ne!(editable.root().id(), Id::UNASSIGNED);
        assert!(editable.leaves().iter().all(|l| l.id != Id::UNASSIGNED));
    }

    #[test]
    fn queries_without_selection_recover() {
        let editable = region("hi there");
        let leaf = editable.leaves()[0].id;
        assert_eq!(editable.current_locus(), None);
        assert_eq!(editable.local_offset(leaf), 0);
    }

    #[test]
    fn select_unknown_leaf_is_none() {
        let mut editable = region("hi there");
        assert_eq!(editable.select(Id(999), 0, 1), None);
    }

    #[test]
    fn insert_without_selection_is_a_no_op() {
        let mut editable = region("hi there");
        editable.insert_markup("<b>x</b>");
        assert_eq!(editable.text(), "hi there");
    }

    #[test]
    fn insert_replaces_selection_and_moves_caret() {
        let mut editable = region("hi there");
        let leaf = editable.leaves()[0].id;
        editable.select(leaf, 3, 8).expect("leaf exists");
        editable.insert_markup("<i>you</i>");

        assert_eq!(editable.text(), "hi you");
        let locus = editable.current_locus().expect("caret follows the insertion");
        let you = editable.leaves()[1];
        assert_eq!(you.raw, "you");
        assert_eq!(locus, Locus::new(you.id, 3));
    }

    #[test]
    fn set_text_clears_selection() {
        let mut editable = region("hi there");
        let leaf = editable.leaves()[0].id;
        editable.select(leaf, 0, 2).expect("leaf exists");
        editable.set_text("fresh\ncontent");
        assert_eq!(editable.current_locus(), None);
        assert_eq!(editable.text(), "fresh\ncontent");
    }

    #[test]
    fn probe_backend_drives_the_same_operations() {
        let backend = Box::new(ProbeSelectionBackend::new(LinearProbe::new()));
        let root = Node::editable_root(parse_fragment("hi there"));
        let mut editable = Editable::with_backend(root, backend).expect("root is editable");
        let leaf = editable.leaves()[0].id;

        let handle = editable.select(leaf, 0, 2).expect("leaf is visible");
        assert_eq!(handle.range, SelectionRange::new(0, 2));
        editable.insert_markup("bye");
        assert_eq!(editable.text(), "bye there");
    }
}
