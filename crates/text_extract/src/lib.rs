//! # text_extract
//!
//! Reconstructs the plain text of an editable region with one canonical
//! line-break convention, whether the engine produced `<br>` markers or
//! block wrappers:
//!
//! - a breaking element starts a new line;
//! - breaking elements nested inside one another collapse to a single boundary;
//! - `<br>` always ends a line;
//! - non-breaking spaces read as ordinary spaces.
//!
//! ```
//! use dom::Node;
//! use text_extract::extract_text;
//!
//! let nodes = vec![
//!     Node::text("hi"),
//!     Node::element("br", vec![]),
//!     Node::element("div", vec![Node::text("there")]),
//! ];
//! assert_eq!(extract_text(&nodes, false, None), "hi\n\nthere");
//! ```

mod artifacts;
mod extract;

pub use artifacts::{ArtifactFilter, EngineQuirks, LeafContext, NoArtifacts, Pass};
pub use extract::{ExtractConfig, Extractor, NodeOverride, extract_text};
