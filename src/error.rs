use std::fmt;

/// Why a node cannot serve as an editable root.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvalidRoot {
    /// Text and comment nodes cannot hold content.
    NotAnElement,
    /// The element does not opt into editing through `contenteditable`.
    NotEditable,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditableError {
    InvalidRoot(InvalidRoot),
}

impl fmt::Display for EditableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditableError::InvalidRoot(InvalidRoot::NotAnElement) => {
                write!(f, "editable root must be an element")
            }
            EditableError::InvalidRoot(InvalidRoot::NotEditable) => {
                write!(f, "editable root must be contenteditable")
            }
        }
    }
}

impl std::error::Error for EditableError {}

impl From<InvalidRoot> for EditableError {
    fn from(reason: InvalidRoot) -> Self {
        EditableError::InvalidRoot(reason)
    }
}
