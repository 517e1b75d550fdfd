//! Markup insertion at the selection.

use dom::{Caret, Node, parse_fragment, splice_leaf};
use selection_core::SelectionHandle;

/// Inserts markup into the tree in place of a selected span.
pub trait MarkupHost {
    /// Replace `span` with `markup`. Returns where the caret belongs
    /// afterwards, or `None` if nothing was inserted.
    fn insert_markup(
        &mut self,
        root: &mut Node,
        span: SelectionHandle,
        markup: &str,
    ) -> Option<Caret>;
}

/// Parses the markup as a fragment and splices it into the selected leaf.
#[derive(Clone, Copy, Debug, Default)]
pub struct FragmentHost;

impl MarkupHost for FragmentHost {
    fn insert_markup(
        &mut self,
        root: &mut Node,
        span: SelectionHandle,
        markup: &str,
    ) -> Option<Caret> {
        let nodes = parse_fragment(markup);
        splice_leaf(root, span.leaf, span.range.start, span.range.end, nodes)
    }
}
