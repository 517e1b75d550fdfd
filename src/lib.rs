//! # editable
//!
//! Reads and writes the logical text of a `contenteditable` region and maps
//! selections to text positions, independent of how the engine represented
//! line breaks.
//!
//! ```
//! use dom::{Node, parse_fragment};
//! use editable::Editable;
//!
//! let root = Node::editable_root(parse_fragment("hi<div>there</div>"));
//! let mut region = Editable::new(root).expect("root is contenteditable");
//! assert_eq!(region.text(), "hi\nthere");
//!
//! let leaf = region.leaves()[1].id;
//! region.select(leaf, 0, 5);
//! region.insert_markup("where");
//! assert_eq!(region.text(), "hi\nwhere");
//! ```
//!
//! The pieces live in their own crates:
//!
//! - `dom`: node tree, fragment parser, traversal;
//! - `text_extract`: text reconstruction and engine artifact filters;
//! - `selection_core`: selection backends (native and probe based).

mod config;
mod editable;
mod error;
mod host;

pub use config::EditableConfig;
pub use editable::Editable;
pub use error::{EditableError, InvalidRoot};
pub use host::{FragmentHost, MarkupHost};

pub use selection_core::{
    LinearProbe, Locus, NativeSelectionBackend, ProbeConfig, ProbeSelectionBackend,
    SelectionBackend, SelectionHandle, SelectionRange,
};
pub use text_extract::{EngineQuirks, ExtractConfig, NodeOverride};
