use crate::text::{byte_offset, char_len};
use crate::{Id, Node};

/// Give every unassigned node an id above the largest id already in use.
pub fn assign_node_ids(root: &mut Node) {
    fn walk(node: &mut Node, next: &mut u32) {
        // only assign if currently unset
        if node.id() == Id::UNASSIGNED {
            node.set_id(Id(*next));
            *next = next.wrapping_add(1);
        }
        if let Some(children) = node.children_mut() {
            for c in children {
                walk(c, next);
            }
        }
    }

    let mut next = max_node_id(root).0.wrapping_add(1).max(1);
    walk(root, &mut next);
}

pub fn max_node_id(node: &Node) -> Id {
    node.children()
        .iter()
        .map(max_node_id)
        .fold(node.id(), std::cmp::max)
}

pub fn find_node_by_id(node: &Node, id: Id) -> Option<&Node> {
    if node.id() == id {
        return Some(node);
    }
    for c in node.children() {
        if let Some(found) = find_node_by_id(c, id) {
            return Some(found);
        }
    }
    None
}

/// Last text leaf of `node` in document order, `node` itself included.
pub fn last_leaf(node: &Node) -> Option<&Node> {
    match node {
        Node::Text { .. } => Some(node),
        Node::Element { children, .. } => children.iter().rev().find_map(last_leaf),
        Node::Comment { .. } => None,
    }
}

/// A subtree detached by [`remove_node`].
#[derive(Debug)]
pub struct Removed {
    pub node: Node,
    /// The sibling that preceded the removed node, if any.
    pub previous_sibling: Option<Id>,
}

/// Detach the node with `id` (and its subtree) from under `root`.
///
/// The root itself cannot be removed; `None` is returned for it and for
/// unknown ids.
pub fn remove_node(root: &mut Node, id: Id) -> Option<Removed> {
    let children = root.children_mut()?;
    if let Some(pos) = children.iter().position(|c| c.id() == id) {
        let previous_sibling = pos.checked_sub(1).map(|p| children[p].id());
        let node = children.remove(pos);
        return Some(Removed {
            node,
            previous_sibling,
        });
    }
    children.iter_mut().find_map(|c| remove_node(c, id))
}

/// Where the caret lands after a splice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Caret {
    pub leaf: Id,
    pub offset: usize,
}

/// Replace chars `start..end` of the text leaf `leaf` with `nodes`.
///
/// The leaf is split into the text before and after the range; empty halves
/// are dropped. New nodes get fresh ids. Returns the caret position right
/// after the inserted content, or `None` when `leaf` is not a text leaf under
/// `root`.
pub fn splice_leaf(
    root: &mut Node,
    leaf: Id,
    start: usize,
    end: usize,
    nodes: Vec<Node>,
) -> Option<Caret> {
    let mut next = max_node_id(root).0.wrapping_add(1).max(1);
    splice_in(root, leaf, start, end, nodes, &mut next)
}

fn splice_in(
    node: &mut Node,
    leaf: Id,
    start: usize,
    end: usize,
    nodes: Vec<Node>,
    next: &mut u32,
) -> Option<Caret> {
    let children = node.children_mut()?;
    let Some(pos) = children
        .iter()
        .position(|c| c.id() == leaf && c.is_leaf())
    else {
        let target = children
            .iter_mut()
            .find(|c| find_node_by_id(c, leaf).is_some())?;
        return splice_in(target, leaf, start, end, nodes, next);
    };

    let raw = children[pos].leaf_text().unwrap_or_default().to_string();
    let len = char_len(&raw);
    let end = end.min(len);
    let start = start.min(end);
    let head = &raw[..byte_offset(&raw, start)];
    let tail = &raw[byte_offset(&raw, end)..];

    let original = children[pos].id();
    let inserted = !nodes.is_empty();
    let mut replacement: Vec<Node> = Vec::with_capacity(nodes.len() + 2);
    let mut original_used = !head.is_empty();
    if original_used {
        replacement.push(Node::Text {
            id: original,
            text: head.to_string(),
        });
    }
    let content_start = replacement.len();
    for mut n in nodes {
        renumber(&mut n, next);
        replacement.push(n);
    }
    let mut leaf_id = || {
        if std::mem::replace(&mut original_used, true) {
            fresh(next)
        } else {
            original
        }
    };

    let caret = if !tail.is_empty() {
        let id = leaf_id();
        replacement.push(Node::Text {
            id,
            text: tail.to_string(),
        });
        Caret { leaf: id, offset: 0 }
    } else if let Some(l) = replacement[content_start..].iter().rev().find_map(last_leaf) {
        Caret {
            leaf: l.id(),
            offset: l.leaf_text().map(char_len).unwrap_or(0),
        }
    } else if !inserted && content_start > 0 {
        // Plain deletion up to the end of the leaf.
        Caret {
            leaf: original,
            offset: char_len(head),
        }
    } else {
        // Nothing textual follows the insertion; keep an empty leaf so the
        // caret has a home.
        let id = leaf_id();
        replacement.push(Node::Text {
            id,
            text: String::new(),
        });
        Caret { leaf: id, offset: 0 }
    };

    children.splice(pos..=pos, replacement);
    Some(caret)
}

fn fresh(next: &mut u32) -> Id {
    let id = Id(*next);
    *next = next.wrapping_add(1);
    id
}

fn renumber(node: &mut Node, next: &mut u32) {
    node.set_id(fresh(next));
    if let Some(children) = node.children_mut() {
        for c in children {
            renumber(c, next);
        }
    }
}
