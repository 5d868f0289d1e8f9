//! DomView capability trait
//!
//! The table structure model never touches a concrete platform tree; it
//! reads through this interface. [`DomTree`] implements it for fixtures
//! and parsed documents; a browser host would implement it over its own
//! node handles after snapshotting.

use crate::selector::Selector;
use crate::tree::DomTree;
use crate::NodeId;

/// Read-only view of a document tree.
///
/// Implementations must be stable for the duration of a call into the
/// table model: the model assumes an immutable snapshot and performs no
/// writes.
pub trait DomView {
    /// Lowercased tag name of an element, `None` for non-elements.
    fn tag_name(&self, id: NodeId) -> Option<&str>;

    /// Attribute value on an element, `None` when absent or not an element.
    fn attribute(&self, id: NodeId, name: &str) -> Option<&str>;

    /// Parent node, `None` at the root.
    fn parent(&self, id: NodeId) -> Option<NodeId>;

    /// Element children in document order.
    fn child_elements(&self, id: NodeId) -> Vec<NodeId>;

    /// Concatenated text of the subtree.
    fn text_content(&self, id: NodeId) -> String;

    /// `matches(selector)`-style predicate over tag/id/class/attributes.
    fn matches(&self, id: NodeId, selector: &Selector) -> bool
    where
        Self: Sized,
    {
        selector.matches(self, id)
    }
}

impl DomView for DomTree {
    fn tag_name(&self, id: NodeId) -> Option<&str> {
        DomTree::tag_name(self, id)
    }

    fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        DomTree::attribute(self, id, name)
    }

    fn parent(&self, id: NodeId) -> Option<NodeId> {
        DomTree::parent(self, id)
    }

    fn child_elements(&self, id: NodeId) -> Vec<NodeId> {
        DomTree::child_elements(self, id)
    }

    fn text_content(&self, id: NodeId) -> String {
        DomTree::text_content(self, id)
    }
}

/// All element descendants of `id` in document order, `id` excluded.
pub fn descendant_elements<V: DomView + ?Sized>(view: &V, id: NodeId) -> Vec<NodeId> {
    let mut out = Vec::new();
    let mut stack: Vec<NodeId> = view.child_elements(id);
    stack.reverse();
    while let Some(next) = stack.pop() {
        out.push(next);
        let mut children = view.child_elements(next);
        children.reverse();
        stack.extend(children);
    }
    out
}
