//! AxGrid DOM - minimal document tree
//!
//! Arena-backed tree of element and text nodes, plus the `DomView`
//! capability trait that the table structure model consumes. Hosts with a
//! live document (a browser, a fixture builder, a parser) either snapshot
//! into a [`DomTree`] or implement [`DomView`] over their own tree.

mod node;
mod selector;
mod tree;
mod view;

pub use node::{Attr, ElementData, Node, NodeData};
pub use selector::{Selector, SelectorError};
pub use tree::DomTree;
pub use view::{descendant_elements, DomView};

/// Node identifier (index into the arena).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// The document node every tree starts with.
    pub const DOCUMENT: NodeId = NodeId(0);

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}
