//! Tabular structure model.
//!
//! Reconstructs the logical row/column grid behind a native `<table>`
//! or an ARIA `table`/`grid`/`treegrid` subtree: row and column
//! groups, spanning cells, explicit ARIA index overrides, and the
//! header cells that describe each data cell. The model answers the
//! two questions accessibility diagnostics keep asking: "what grid
//! position does this cell occupy?" and "which headers describe it?".
//!
//! The tree is read through the [`axgrid_dom::DomView`] capability
//! trait, so any host tree can back the model. Construction is a pure
//! synchronous pass over an immutable snapshot and never fails;
//! malformed markup degrades to sequential placement.

pub mod aria;
mod grid;
mod headers;
pub mod locate;
mod registry;
mod snapshot;

pub use aria::Role;
pub use grid::{Cell, ColGroup, HeaderScope, RowGroup, Table, MAX_COL_SPAN, MAX_ROW_SPAN};
pub use locate::{
    cell_elements, col_group_spans, is_empty_cell_element, row_elements, row_group_elements,
};
pub use registry::TableRegistry;
pub use snapshot::{CellSnapshot, ColGroupSnapshot, RowGroupSnapshot, TableSnapshot};
