//! Node storage
//!
//! Nodes keep parent/child links as arena ids and carry their variant data
//! inline. Only the node kinds the table model reads exist: the document
//! root, elements, and text.

use crate::NodeId;

/// A single node in the arena.
#[derive(Debug)]
pub struct Node {
    /// Parent node (`None` for the document root).
    pub parent: Option<NodeId>,
    /// Children in document order.
    pub children: Vec<NodeId>,
    /// Node-specific data.
    pub data: NodeData,
}

impl Node {
    pub(crate) fn new(data: NodeData) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            data,
        }
    }

    /// Check if this is an element.
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    /// Check if this is a text node.
    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self.data, NodeData::Text(_))
    }

    /// Get element data if this is an element.
    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get text content if this is a text node.
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// Node-specific data.
#[derive(Debug)]
pub enum NodeData {
    /// Document root.
    Document,
    /// Element with tag and attributes.
    Element(ElementData),
    /// Text content.
    Text(String),
}

/// Element-specific data.
#[derive(Debug)]
pub struct ElementData {
    /// Tag name, ASCII-lowercased at creation.
    pub tag: String,
    /// Attributes in source order.
    pub attrs: Vec<Attr>,
}

impl ElementData {
    pub(crate) fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: Vec::new(),
        }
    }

    /// Get an attribute value by (case-insensitive) name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
            .map(|a| a.value.as_str())
    }

    /// Set an attribute, replacing any existing value.
    pub fn set_attr(&mut self, name: &str, value: &str) {
        let name = name.to_ascii_lowercase();
        for attr in self.attrs.iter_mut() {
            if attr.name == name {
                attr.value = value.to_string();
                return;
            }
        }
        self.attrs.push(Attr {
            name,
            value: value.to_string(),
        });
    }
}

/// A single attribute.
#[derive(Debug)]
pub struct Attr {
    /// Attribute name, ASCII-lowercased at creation.
    pub name: String,
    /// Attribute value, verbatim.
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_attrs_are_case_insensitive() {
        let mut elem = ElementData::new("TD");
        elem.set_attr("COLSPAN", "2");

        assert_eq!(elem.tag, "td");
        assert_eq!(elem.attr("colspan"), Some("2"));
        assert_eq!(elem.attr("Colspan"), Some("2"));
        assert_eq!(elem.attr("rowspan"), None);
    }

    #[test]
    fn test_set_attr_replaces_existing() {
        let mut elem = ElementData::new("th");
        elem.set_attr("scope", "row");
        elem.set_attr("scope", "col");

        assert_eq!(elem.attrs.len(), 1);
        assert_eq!(elem.attr("scope"), Some("col"));
    }
}
