//! DOM tree (arena-based allocation)

use crate::node::{ElementData, Node, NodeData};
use crate::NodeId;

/// Arena-based DOM tree.
///
/// Node 0 is always the document root. Ids are only meaningful for the
/// tree that issued them; the tree is append-only (nodes are created and
/// linked, never removed), which keeps every issued id valid.
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a tree containing only the document root.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeData::Document)],
        }
    }

    /// The document root id.
    pub fn document(&self) -> NodeId {
        NodeId::DOCUMENT
    }

    /// Get a node by id.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree holds nothing but the document root.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Create a detached element node.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(Node::new(NodeData::Element(ElementData::new(tag))))
    }

    /// Create a detached element node with attributes.
    pub fn create_element_with(&mut self, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
        let id = self.create_element(tag);
        for (name, value) in attrs {
            self.set_attr(id, name, value);
        }
        id
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.push(Node::new(NodeData::Text(content.to_string())))
    }

    /// Append `child` as the last child of `parent`.
    ///
    /// A node already linked elsewhere is not re-parented; the call is
    /// ignored with a warning since the table model only ever consumes
    /// freshly built snapshots.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if parent.index() >= self.nodes.len() || child.index() >= self.nodes.len() {
            tracing::warn!(?parent, ?child, "append_child with unknown id ignored");
            return;
        }
        if self.nodes[child.index()].parent.is_some() {
            tracing::warn!(?child, "append_child on already-linked node ignored");
            return;
        }
        self.nodes[child.index()].parent = Some(parent);
        self.nodes[parent.index()].children.push(child);
    }

    /// Set an attribute on an element node; ignored for other node kinds.
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        if let Some(node) = self.nodes.get_mut(id.index()) {
            if let NodeData::Element(elem) = &mut node.data {
                elem.set_attr(name, value);
            }
        }
    }

    /// Parent of a node.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// All children of a node, in document order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Element children of a node, in document order.
    pub fn child_elements(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|&c| self.get(c).is_some_and(|n| n.is_element()))
            .collect()
    }

    /// Tag name of an element node (lowercased), `None` otherwise.
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.get(id)?.as_element().map(|e| e.tag.as_str())
    }

    /// Attribute value on an element node.
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.get(id)?.as_element()?.attr(name)
    }

    /// Concatenated text of the subtree, in document order.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.get(id) else { return };
        if let Some(text) = node.as_text() {
            out.push_str(text);
        }
        for &child in &node.children {
            self.collect_text(child, out);
        }
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}
