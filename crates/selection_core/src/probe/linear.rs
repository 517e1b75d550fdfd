use super::{Container, ProbeRange, ProbeSurface};
use dom::{Id, Node};
use std::rc::Rc;

/// The editable region as a legacy text-range engine sees it: one run of
/// characters made of every non-empty text leaf in document order.
///
/// Block boundaries add no characters and comments are invisible. Leaf text
/// is kept raw, so non-breaking spaces are reported as such.
#[derive(Debug)]
pub struct TextLayout {
    root: Id,
    chars: Vec<char>,
    leaves: Vec<LaidLeaf>,
}

#[derive(Debug)]
struct LaidLeaf {
    id: Id,
    start: usize,
    len: usize,
    /// Element ids from the root down to the leaf's parent.
    ancestors: Vec<Id>,
}

impl TextLayout {
    pub fn new(root: &Node) -> Self {
        fn walk(node: &Node, ancestors: &mut Vec<Id>, out: &mut TextLayout) {
            match node {
                Node::Element { id, children, .. } => {
                    ancestors.push(*id);
                    for c in children {
                        walk(c, ancestors, out);
                    }
                    ancestors.pop();
                }
                Node::Text { id, text } if !text.is_empty() => {
                    let start = out.chars.len();
                    out.chars.extend(text.chars());
                    out.leaves.push(LaidLeaf {
                        id: *id,
                        start,
                        len: out.chars.len() - start,
                        ancestors: ancestors.clone(),
                    });
                }
                _ => {}
            }
        }

        let mut layout = TextLayout {
            root: root.id(),
            chars: Vec::new(),
            leaves: Vec::new(),
        };
        walk(root, &mut Vec::new(), &mut layout);
        layout
    }

    /// Total number of characters.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn slice(&self, start: usize, end: usize) -> String {
        let end = end.min(self.len());
        self.chars[start.min(end)..end].iter().collect()
    }

    /// Char span `start..end` occupied by leaf `id`.
    pub fn leaf_span(&self, id: Id) -> Option<(usize, usize)> {
        self.leaves
            .iter()
            .find(|l| l.id == id)
            .map(|l| (l.start, l.start + l.len))
    }

    fn leaf_at(&self, pos: usize) -> Option<&LaidLeaf> {
        let idx = self.leaves.partition_point(|l| l.start + l.len <= pos);
        self.leaves.get(idx)
    }

    fn container_of(&self, start: usize, end: usize) -> Container {
        let Some(last) = self.len().checked_sub(1) else {
            return Container::Element(self.root);
        };
        let first = self.leaf_at(start.min(last));
        let last = if end > start {
            self.leaf_at((end - 1).min(last))
        } else {
            first
        };
        let (Some(a), Some(b)) = (first, last) else {
            return Container::Element(self.root);
        };
        a.ancestors
            .iter()
            .zip(&b.ancestors)
            .take_while(|(x, y)| x == y)
            .last()
            .map_or(Container::Element(self.root), |(id, _)| Container::Element(*id))
    }
}

/// A probe over a [`TextLayout`]. A detached range lies outside the editable
/// root; it cannot move and reports [`Container::Body`].
#[derive(Clone, Debug)]
pub struct LinearRange {
    layout: Rc<TextLayout>,
    start: usize,
    end: usize,
    detached: bool,
}

impl LinearRange {
    pub fn bounds(&self) -> (usize, usize) {
        (self.start, self.end)
    }
}

impl ProbeRange for LinearRange {
    fn move_start(&mut self, units: isize) -> isize {
        if self.detached {
            return 0;
        }
        let next = self
            .start
            .saturating_add_signed(units)
            .min(self.layout.len());
        let moved = next as isize - self.start as isize;
        self.start = next;
        if self.start > self.end {
            self.end = self.start;
        }
        moved
    }

    fn move_end(&mut self, units: isize) -> isize {
        if self.detached {
            return 0;
        }
        let next = self.end.saturating_add_signed(units).min(self.layout.len());
        let moved = next as isize - self.end as isize;
        self.end = next;
        if self.end < self.start {
            self.start = self.end;
        }
        moved
    }

    fn text(&self) -> String {
        if self.detached {
            return String::new();
        }
        self.layout.slice(self.start, self.end)
    }

    fn container(&self) -> Container {
        if self.detached {
            return Container::Body;
        }
        self.layout.container_of(self.start, self.end)
    }

    fn collapse(&mut self, to_start: bool) {
        if to_start {
            self.end = self.start;
        } else {
            self.start = self.end;
        }
    }
}

/// In-process probe engine over the current tree.
///
/// Hosts drive it the way a user would: [`LinearProbe::place`] puts the
/// caret or a selection at document char positions, [`LinearProbe::blur`]
/// moves focus away.
#[derive(Clone, Debug, Default)]
pub struct LinearProbe {
    committed: Option<(usize, usize)>,
    focused: bool,
}

impl LinearProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn place(&mut self, start: usize, end: usize) {
        self.focused = true;
        self.committed = Some((start.min(end), start.max(end)));
    }

    pub fn blur(&mut self) {
        self.focused = false;
        self.committed = None;
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Document char positions of the active selection.
    pub fn committed(&self) -> Option<(usize, usize)> {
        self.committed
    }
}

impl ProbeSurface for LinearProbe {
    type Range = LinearRange;

    fn selection_range(&self, root: &Node) -> LinearRange {
        let layout = Rc::new(TextLayout::new(root));
        let n = layout.len();
        let (start, end) = self.committed.unwrap_or((0, 0));
        LinearRange {
            layout,
            start: start.min(n),
            end: end.min(n),
            detached: !self.focused,
        }
    }

    fn focus(&mut self, _root: &Node) {
        self.focused = true;
    }

    fn commit(&mut self, range: &LinearRange) {
        self.place(range.start, range.end);
    }

    fn blur(&mut self) {
        LinearProbe::blur(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dom::assign_node_ids;

    fn tree() -> Node {
        let mut root = Node::editable_root(vec![
            Node::text("ab"),
            Node::comment("hidden"),
            Node::element("p", vec![Node::text("c\u{00A0}d")]),
            Node::element("p", vec![Node::element("b", vec![Node::text("ef")])]),
        ]);
        assign_node_ids(&mut root);
        root
    }

    fn range_at(root: &Node, start: usize, end: usize) -> LinearRange {
        let mut probe = LinearProbe::new();
        probe.place(start, end);
        probe.selection_range(root)
    }

    #[test]
    fn layout_concatenates_leaves() {
        let root = tree();
        let layout = TextLayout::new(&root);
        assert_eq!(layout.len(), 7);
        assert_eq!(layout.slice(0, 7), "abc\u{00A0}def");
        let ef = root.children()[3].children()[0].children()[0].id();
        assert_eq!(layout.leaf_span(ef), Some((5, 7)));
    }

    #[test]
    fn moves_clamp_and_report_distance() {
        let root = tree();
        let mut range = range_at(&root, 3, 3);
        assert_eq!(range.move_start(-1000), -3);
        assert_eq!(range.move_start(-1), 0);
        assert_eq!(range.move_end(1000), 4);
        assert_eq!(range.text(), "abc\u{00A0}def");
        assert_eq!(range.move_start(9), 7);
        assert_eq!(range.bounds(), (7, 7));
    }

    #[test]
    fn container_is_parent_or_common_ancestor() {
        let root = tree();
        let first_p = root.children()[2].id();
        let b = root.children()[3].children()[0].id();

        assert_eq!(range_at(&root, 3, 3).container(), Container::Element(first_p));
        assert_eq!(range_at(&root, 6, 6).container(), Container::Element(b));
        assert_eq!(range_at(&root, 7, 7).container(), Container::Element(b));
        assert_eq!(range_at(&root, 2, 4).container(), Container::Element(first_p));
        assert_eq!(range_at(&root, 1, 6).container(), Container::Element(root.id()));
    }

    #[test]
    fn unfocused_surface_resolves_to_body() {
        let root = tree();
        let mut probe = LinearProbe::new();
        let mut range = probe.selection_range(&root);
        assert_eq!(range.container(), Container::Body);
        assert_eq!(range.move_start(-5), 0);

        probe.focus(&root);
        let range = probe.selection_range(&root);
        assert_eq!(range.container(), Container::Element(root.id()));
        assert_eq!(range.bounds(), (0, 0));
    }

    #[test]
    fn commit_records_bounds() {
        let root = tree();
        let mut probe = LinearProbe::new();
        probe.focus(&root);
        let mut range = probe.selection_range(&root);
        range.move_end(2);
        probe.commit(&range);
        assert_eq!(probe.committed(), Some((0, 2)));

        ProbeSurface::blur(&mut probe);
        assert!(!probe.is_focused());
        assert_eq!(probe.committed(), None);
    }
}
