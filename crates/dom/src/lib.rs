//! # dom
//!
//! The node tree an editable region is made of: elements, text leaves and
//! comments, each with a stable [`Id`]. Also home to the helpers every other
//! crate in the workspace classifies nodes with (breaking tags, NBSP
//! normalization) and to the markup fragment parser used for insertion.

pub mod fragment;
pub mod tags;
pub mod text;
pub mod traverse;

mod entities;
mod types;

pub use crate::fragment::parse_fragment;
pub use crate::tags::{BreakingTags, DEFAULT_BREAKING_TAGS, is_line_break};
pub use crate::text::{byte_offset, char_len, escape_text, normalize_space};
pub use crate::traverse::{
    Caret, Removed, assign_node_ids, find_node_by_id, last_leaf, remove_node, splice_leaf,
};
pub use crate::types::{Id, Node, NodeId};
