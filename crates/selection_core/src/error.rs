use crate::range::Locus;
use dom::Id;
use std::fmt;

/// Why a backend could not answer a selection query.
///
/// None of these are fatal: the `editable` facade recovers each one locally.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectionError {
    /// Nothing is selected inside the editable region.
    NoSelection,
    /// The id does not name a text leaf in the tree, or its text could not be
    /// located by the engine.
    LeafNotFound(Id),
    /// Content diffing ran out of leaves without an exact match. `best` is the
    /// last candidate it consumed.
    AmbiguousMatch { best: Locus },
}

impl SelectionError {
    /// The locus worth reporting anyway, if any.
    pub fn best_effort(&self) -> Option<Locus> {
        match self {
            SelectionError::AmbiguousMatch { best } => Some(*best),
            _ => None,
        }
    }
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionError::NoSelection => write!(f, "no selection inside the editable region"),
            SelectionError::LeafNotFound(id) => write!(f, "text leaf {} not found", id.0),
            SelectionError::AmbiguousMatch { best } => write!(
                f,
                "selection could not be matched exactly; best candidate is leaf {} at {}",
                best.leaf.0, best.offset
            ),
        }
    }
}

impl std::error::Error for SelectionError {}
