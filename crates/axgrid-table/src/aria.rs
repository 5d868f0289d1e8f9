//! Role resolution for table structure.
//!
//! Only the table-related slice of the ARIA role vocabulary is modelled
//! here. An element's structural role comes from the first recognized
//! token of its `role` attribute; when no token is recognized the native
//! tag mapping applies.

use axgrid_dom::{DomView, NodeId};

/// Structural roles that participate in the table model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Table,
    Grid,
    TreeGrid,
    Row,
    RowGroup,
    Cell,
    GridCell,
    ColumnHeader,
    RowHeader,
    Presentation,
}

impl Role {
    /// Parses a single role token, case-insensitively.
    pub fn parse(token: &str) -> Option<Role> {
        match token.to_ascii_lowercase().as_str() {
            "table" => Some(Role::Table),
            "grid" => Some(Role::Grid),
            "treegrid" => Some(Role::TreeGrid),
            "row" => Some(Role::Row),
            "rowgroup" => Some(Role::RowGroup),
            "cell" => Some(Role::Cell),
            "gridcell" => Some(Role::GridCell),
            "columnheader" => Some(Role::ColumnHeader),
            "rowheader" => Some(Role::RowHeader),
            "none" | "presentation" => Some(Role::Presentation),
            _ => None,
        }
    }

    /// True for the three roles that establish a table root.
    pub fn is_table_root(self) -> bool {
        matches!(self, Role::Table | Role::Grid | Role::TreeGrid)
    }

    /// True for any role that denotes a cell slot, header or data.
    pub fn is_cell(self) -> bool {
        matches!(
            self,
            Role::Cell | Role::GridCell | Role::ColumnHeader | Role::RowHeader
        )
    }
}

/// First recognized token of the element's `role` attribute.
///
/// The `role` attribute takes an ordered fallback list; unknown tokens
/// are skipped rather than treated as presentational.
pub fn explicit_role<V: DomView + ?Sized>(view: &V, id: NodeId) -> Option<Role> {
    let value = view.attribute(id, "role")?;
    value.split_whitespace().find_map(Role::parse)
}

/// True when the element anchors a table: a native `<table>` without a
/// recognized role override, or any element with an explicit
/// `table`/`grid`/`treegrid` role.
pub fn is_table_root<V: DomView + ?Sized>(view: &V, id: NodeId) -> bool {
    match explicit_role(view, id) {
        Some(role) => role.is_table_root(),
        None => view.tag_name(id) == Some("table"),
    }
}

/// True for `<thead>`/`<tbody>`/`<tfoot>` and `role="rowgroup"` elements.
pub fn is_row_group<V: DomView + ?Sized>(view: &V, id: NodeId) -> bool {
    match explicit_role(view, id) {
        Some(role) => role == Role::RowGroup,
        None => matches!(
            view.tag_name(id),
            Some("thead") | Some("tbody") | Some("tfoot")
        ),
    }
}

/// True for `<tr>` and `role="row"` elements.
pub fn is_row<V: DomView + ?Sized>(view: &V, id: NodeId) -> bool {
    match explicit_role(view, id) {
        Some(role) => role == Role::Row,
        None => view.tag_name(id) == Some("tr"),
    }
}

/// True for `<td>`/`<th>` and the four ARIA cell roles.
///
/// A recognized role override wins in both directions: `<div
/// role="cell">` is a cell, and `<td role="row">` is not.
pub fn is_cell<V: DomView + ?Sized>(view: &V, id: NodeId) -> bool {
    match explicit_role(view, id) {
        Some(role) => role.is_cell(),
        None => matches!(view.tag_name(id), Some("td") | Some("th")),
    }
}

/// True when the element removes itself from the structure tree via
/// `role="presentation"` or its synonym `role="none"`.
pub fn is_presentational<V: DomView + ?Sized>(view: &V, id: NodeId) -> bool {
    explicit_role(view, id) == Some(Role::Presentation)
}
