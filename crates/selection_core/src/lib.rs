//! # selection_core
//!
//! Maps between an engine's selection and positions in the text leaves of an
//! editable tree, in both directions:
//!
//! - selection → [`Locus`] (leaf and char offset);
//! - leaf and char range → committed selection ([`SelectionHandle`]).
//!
//! The engine is abstracted behind [`SelectionBackend`]. Engines with a
//! DOM-range API use [`NativeSelectionBackend`]; engines that only expose a
//! steppable text range go through [`ProbeSelectionBackend`], which recovers
//! loci by diffing content. [`LinearProbe`] is an in-process probe engine for
//! hosts and tests that have no real one.
//!
//! Offsets count chars of the leaf's normalized value (NBSP read as space).

mod backend;
mod error;
mod leaves;
mod native;
pub mod probe;
mod range;

pub use backend::SelectionBackend;
pub use error::SelectionError;
pub use leaves::{LeafRef, collect_leaves, collect_leaves_of, leaf_value};
pub use native::NativeSelectionBackend;
pub use probe::{
    Container, LinearProbe, LinearRange, ProbeConfig, ProbeRange, ProbeSelectionBackend,
    ProbeSurface, TextLayout,
};
pub use range::{Locus, SelectionHandle, SelectionRange};
