//! Caller-owned cache of built tables, keyed by root node.
//!
//! The model itself never memoizes; evaluators that visit many cells of
//! the same table thread one of these through their pass and drop it
//! when the pass ends.

use std::collections::HashMap;

use axgrid_dom::{DomView, NodeId};

use crate::grid::Table;

#[derive(Debug, Default)]
pub struct TableRegistry {
    tables: HashMap<NodeId, Table>,
}

impl TableRegistry {
    pub fn new() -> TableRegistry {
        TableRegistry::default()
    }

    /// Table for `root`, building it on first request.
    pub fn get_or_build<V: DomView + ?Sized>(&mut self, view: &V, root: NodeId) -> &Table {
        self.tables
            .entry(root)
            .or_insert_with(|| Table::build(view, root))
    }

    /// Already-built table for `root`, if any.
    pub fn get(&self, root: NodeId) -> Option<&Table> {
        self.tables.get(&root)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Drops every cached table, ending the pass.
    pub fn clear(&mut self) {
        self.tables.clear();
    }
}
