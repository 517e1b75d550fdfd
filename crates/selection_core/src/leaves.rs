use dom::{BreakingTags, Id, Node, char_len, find_node_by_id, normalize_space};
use std::borrow::Cow;
use text_extract::{ArtifactFilter, LeafContext, Pass};

/// A text leaf found by [`collect_leaves`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LeafRef<'a> {
    pub id: Id,
    /// Raw value, before NBSP normalization.
    pub raw: &'a str,
}

impl<'a> LeafRef<'a> {
    pub fn normalized(&self) -> Cow<'a, str> {
        normalize_space(self.raw)
    }

    /// Length in chars.
    pub fn len(&self) -> usize {
        char_len(self.raw)
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}

/// Text leaves under `nodes` in document order, artifacts skipped.
///
/// `breaking` decides [`LeafContext::after_break`] and must be the set the
/// text is extracted with, so a filter sees the same context in both passes.
pub fn collect_leaves<'a>(
    nodes: &'a [Node],
    filter: &dyn ArtifactFilter,
    breaking: &BreakingTags,
) -> Vec<LeafRef<'a>> {
    let mut out = Vec::new();
    walk(nodes, false, filter, breaking, &mut out);
    out
}

/// [`collect_leaves`] over a single node; a text leaf yields itself.
pub fn collect_leaves_of<'a>(
    node: &'a Node,
    filter: &dyn ArtifactFilter,
    breaking: &BreakingTags,
) -> Vec<LeafRef<'a>> {
    collect_leaves(std::slice::from_ref(node), filter, breaking)
}

fn walk<'a>(
    nodes: &'a [Node],
    after_break: bool,
    filter: &dyn ArtifactFilter,
    breaking: &BreakingTags,
    out: &mut Vec<LeafRef<'a>>,
) {
    for (position, node) in nodes.iter().enumerate() {
        match node {
            Node::Text { id, text } => {
                let cx = LeafContext {
                    position,
                    after_break,
                    pass: Pass::Collect,
                };
                if !filter.is_artifact_leaf(text, &cx) {
                    out.push(LeafRef { id: *id, raw: text });
                }
            }
            Node::Element { name, children, .. } => {
                walk(children, breaking.contains(name), filter, breaking, out);
            }
            Node::Comment { .. } => {}
        }
    }
}

/// Raw value of the text leaf `id` under `root`.
pub fn leaf_value(root: &Node, id: Id) -> Option<&str> {
    find_node_by_id(root, id).and_then(Node::leaf_text)
}
