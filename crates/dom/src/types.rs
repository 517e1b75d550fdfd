use crate::text::normalize_space;
use std::borrow::Cow;

pub type NodeId = u32;

/// Stable node identity. `Id(0)` means "not assigned yet".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(pub NodeId);

impl Id {
    pub const UNASSIGNED: Id = Id(0);
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Element {
        id: Id,
        name: String,
        attributes: Vec<(String, Option<String>)>,
        children: Vec<Node>,
    },
    Text {
        id: Id,
        text: String,
    },
    Comment {
        id: Id,
        text: String,
    },
}

impl Node {
    /// Element with no attributes. The name is stored ASCII-lowercase.
    pub fn element(name: &str, children: Vec<Node>) -> Self {
        Node::Element {
            id: Id::UNASSIGNED,
            name: name.to_ascii_lowercase(),
            attributes: Vec::new(),
            children,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Node::Text {
            id: Id::UNASSIGNED,
            text: text.into(),
        }
    }

    pub fn comment(text: impl Into<String>) -> Self {
        Node::Comment {
            id: Id::UNASSIGNED,
            text: text.into(),
        }
    }

    /// A `contenteditable` root element holding `children`.
    pub fn editable_root(children: Vec<Node>) -> Self {
        Node::Element {
            id: Id::UNASSIGNED,
            name: "div".to_string(),
            attributes: vec![("contenteditable".to_string(), Some("true".to_string()))],
            children,
        }
    }

    pub fn with_attribute(mut self, key: &str, value: Option<&str>) -> Self {
        if let Node::Element { attributes, .. } = &mut self {
            attributes.push((key.to_ascii_lowercase(), value.map(str::to_string)));
        }
        self
    }

    pub fn id(&self) -> Id {
        match self {
            Node::Element { id, .. } => *id,
            Node::Text { id, .. } => *id,
            Node::Comment { id, .. } => *id,
        }
    }

    pub fn set_id(&mut self, new_id: Id) {
        match self {
            Node::Element { id, .. } => *id = new_id,
            Node::Text { id, .. } => *id = new_id,
            Node::Comment { id, .. } => *id = new_id,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Node::Element { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Element { children, .. } => children,
            _ => &[],
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Element { children, .. } => Some(children),
            _ => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Text { .. })
    }

    /// Raw value of a text leaf.
    pub fn leaf_text(&self) -> Option<&str> {
        match self {
            Node::Text { text, .. } => Some(text),
            _ => None,
        }
    }

    /// Value of a text leaf with non-breaking spaces turned into spaces.
    ///
    /// Recomputed on every call; nothing is cached on the node.
    pub fn normalized_text(&self) -> Option<Cow<'_, str>> {
        self.leaf_text().map(normalize_space)
    }

    pub fn attr(&self, key: &str) -> Option<Option<&str>> {
        match self {
            Node::Element { attributes, .. } => attributes
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(key))
                .map(|(_, v)| v.as_deref()),
            _ => None,
        }
    }

    /// Whether this element opts into editing through `contenteditable`.
    pub fn is_editable(&self) -> bool {
        match self.attr("contenteditable") {
            Some(None) => true,
            Some(Some(value)) => {
                let value = value.trim();
                value.is_empty()
                    || value.eq_ignore_ascii_case("true")
                    || value.eq_ignore_ascii_case("plaintext-only")
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_names_are_lowercased() {
        let node = Node::element("DIV", vec![]);
        assert_eq!(node.name(), Some("div"));
    }

    #[test]
    fn editable_flag_follows_attribute_value() {
        let plain = Node::element("div", vec![]);
        assert!(!plain.is_editable());

        let bare = Node::element("div", vec![]).with_attribute("contenteditable", None);
        assert!(bare.is_editable());

        let empty = Node::element("div", vec![]).with_attribute("contenteditable", Some(""));
        assert!(empty.is_editable());

        let off = Node::element("div", vec![]).with_attribute("contentEditable", Some("false"));
        assert!(!off.is_editable());

        assert!(Node::editable_root(vec![]).is_editable());
        assert!(!Node::text("x").is_editable());
    }

    #[test]
    fn normalized_text_replaces_nbsp() {
        let leaf = Node::text("hi\u{00A0}there");
        assert_eq!(leaf.normalized_text().as_deref(), Some("hi there"));
        assert_eq!(leaf.leaf_text(), Some("hi\u{00A0}there"));
        assert!(Node::element("b", vec![]).normalized_text().is_none());
    }
}
