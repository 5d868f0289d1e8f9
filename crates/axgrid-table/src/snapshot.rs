//! Serializable dump of a built table, for diagnostics and golden
//! tests. Positions are 1-based display strings, header references are
//! flattened to their text.

use axgrid_dom::{DomView, NodeId};
use serde::Serialize;

use crate::grid::{HeaderScope, Table};
use crate::locate;

#[derive(Debug, Serialize)]
pub struct TableSnapshot {
    pub row_count: usize,
    pub col_count: usize,
    pub row_groups: Vec<RowGroupSnapshot>,
    pub col_groups: Vec<ColGroupSnapshot>,
    pub cells: Vec<CellSnapshot>,
}

#[derive(Debug, Serialize)]
pub struct RowGroupSnapshot {
    pub tag: Option<String>,
    pub y: usize,
    pub height: usize,
}

#[derive(Debug, Serialize)]
pub struct ColGroupSnapshot {
    pub x: usize,
    pub width: usize,
}

#[derive(Debug, Serialize)]
pub struct CellSnapshot {
    pub position: String,
    pub width: usize,
    pub height: usize,
    pub scope: HeaderScope,
    pub empty: bool,
    pub text: String,
    pub headers: Vec<String>,
}

impl TableSnapshot {
    /// Captures the whole grid, cell by cell in origin-row order.
    pub fn capture<V: DomView + ?Sized>(view: &V, table: &Table) -> TableSnapshot {
        let row_groups = table
            .row_groups
            .iter()
            .map(|group| RowGroupSnapshot {
                tag: group.node.and_then(|node| view.tag_name(node)).map(str::to_owned),
                y: group.y,
                height: group.height,
            })
            .collect();

        let col_groups = table
            .col_groups
            .iter()
            .map(|group| ColGroupSnapshot {
                x: group.x,
                width: group.width,
            })
            .collect();

        let mut cells = Vec::new();
        for row in &table.cells {
            for cell in row {
                let headers = table
                    .header_elements(view, cell)
                    .into_iter()
                    .map(|header| collapsed_text(view, header))
                    .collect();
                cells.push(CellSnapshot {
                    position: cell.position_label(),
                    width: cell.width,
                    height: cell.height,
                    scope: cell.scope,
                    empty: locate::is_empty_cell_element(view, cell.node),
                    text: collapsed_text(view, cell.node),
                    headers,
                });
            }
        }

        TableSnapshot {
            row_count: table.row_count,
            col_count: table.col_count,
            row_groups,
            col_groups,
            cells,
        }
    }
}

fn collapsed_text<V: DomView + ?Sized>(view: &V, node: NodeId) -> String {
    view.text_content(node)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
