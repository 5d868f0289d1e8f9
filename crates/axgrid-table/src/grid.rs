//! Grid allocation: places located cells into the logical slot grid.
//!
//! Rows are processed in grid order (head groups first, foot groups
//! last). Within a row a column cursor walks left to right, skipping
//! slots still occupied by cells spanning down from earlier rows.
//! Explicit `aria-rowindex`/`aria-colindex` values override the cursor;
//! everything invalid falls back to sequential placement. Construction
//! never fails.

use std::collections::{HashMap, HashSet};
use std::ops::Range;

use axgrid_dom::{DomView, NodeId};
use serde::Serialize;

use crate::aria::{self, Role};
use crate::headers;
use crate::locate;

/// Largest honored column span; wider declarations clamp down.
pub const MAX_COL_SPAN: usize = 1000;

/// Largest honored row span; taller declarations clamp down.
pub const MAX_ROW_SPAN: usize = 65534;

/// Largest honored explicit 1-based index. Values beyond this are
/// treated like any other invalid index and fall back to sequential
/// placement, which keeps hostile markup from inflating the grid.
const MAX_EXPLICIT_INDEX: usize = 65534;

/// Axis a header cell describes.
///
/// `Auto` is a header with no declared axis; inference decides per
/// query whether it acts as a row or column header. `None` marks a
/// plain data cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderScope {
    Row,
    Col,
    RowGroup,
    ColGroup,
    Auto,
    None,
}

impl HeaderScope {
    fn from_token(token: &str) -> Option<HeaderScope> {
        match token.to_ascii_lowercase().as_str() {
            "row" => Some(HeaderScope::Row),
            "col" => Some(HeaderScope::Col),
            "rowgroup" => Some(HeaderScope::RowGroup),
            "colgroup" => Some(HeaderScope::ColGroup),
            _ => None,
        }
    }

    /// True for every header scope, including `Auto`.
    pub fn is_header(self) -> bool {
        self != HeaderScope::None
    }
}

/// Derives the header scope of a cell element, fixed at construction.
///
/// A valid `scope` attribute wins outright, even on a data-tagged cell.
/// Otherwise the explicit role decides; a `<th>` demoted to a data role
/// stays a data cell, and a bare `<th>` is `Auto`.
pub(crate) fn header_scope<V: DomView + ?Sized>(view: &V, id: NodeId) -> HeaderScope {
    if let Some(scope) = view
        .attribute(id, "scope")
        .map(str::trim)
        .and_then(HeaderScope::from_token)
    {
        return scope;
    }
    match aria::explicit_role(view, id) {
        Some(Role::ColumnHeader) => HeaderScope::Col,
        Some(Role::RowHeader) => HeaderScope::Row,
        Some(Role::Cell) | Some(Role::GridCell) => HeaderScope::None,
        _ if view.tag_name(id) == Some("th") => HeaderScope::Auto,
        _ => HeaderScope::None,
    }
}

/// One placed cell: origin slot, span, and header scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub node: NodeId,
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
    pub scope: HeaderScope,
}

impl Cell {
    /// Columns covered by this cell's span.
    pub fn x_range(&self) -> Range<usize> {
        self.x..self.x.saturating_add(self.width)
    }

    /// Rows covered by this cell's span.
    pub fn y_range(&self) -> Range<usize> {
        self.y..self.y.saturating_add(self.height)
    }

    /// True when the span covers slot `(x, y)`.
    pub fn covers(&self, x: usize, y: usize) -> bool {
        self.x_range().contains(&x) && self.y_range().contains(&y)
    }

    pub(crate) fn covers_row(&self, y: usize) -> bool {
        self.y_range().contains(&y)
    }

    /// 1-based `"column,row"` display position.
    pub fn position_label(&self) -> String {
        format!("{},{}", self.x + 1, self.y + 1)
    }

    /// True for header cells of any scope.
    pub fn is_header(&self) -> bool {
        self.scope.is_header()
    }
}

/// A head/body/foot-equivalent run of rows.
///
/// `node` is `None` only for rows sitting directly under the table
/// root; the builder never records a group for those, so materialized
/// entries always carry a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowGroup {
    pub node: Option<NodeId>,
    pub y: usize,
    pub height: usize,
}

/// A declared column group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColGroup {
    pub node: NodeId,
    pub x: usize,
    pub width: usize,
}

/// Reconstructed logical grid for one table root.
///
/// `cells[y]` holds the distinct cells whose origin slot lies on row
/// `y`, in placement order. Spanning cells appear once, at their
/// origin, and are discoverable at every covered slot through
/// [`Table::slot_cells`].
#[derive(Debug, Clone)]
pub struct Table {
    pub root: NodeId,
    pub row_groups: Vec<RowGroup>,
    pub col_groups: Vec<ColGroup>,
    pub cells: Vec<Vec<Cell>>,
    pub row_count: usize,
    pub col_count: usize,
    by_node: HashMap<NodeId, (usize, usize)>,
    placement: Vec<(usize, usize)>,
}

impl Table {
    /// Builds the grid for `root`.
    ///
    /// Construction never fails: malformed attributes degrade to
    /// sequential placement, and a root with no placeable cells yields
    /// an empty table with zero counts.
    pub fn build<V: DomView + ?Sized>(view: &V, root: NodeId) -> Table {
        let sections = locate::sections(view, root);

        let mut row_groups = Vec::new();
        let mut placed: Vec<Cell> = Vec::new();
        // Group records follow the sequential row order; explicit row
        // indices move cells, not groups.
        let mut seq = 0usize;
        let mut next_y = 0usize;
        for section in &sections {
            let group_start = seq;
            for &row in &section.rows {
                let y = explicit_index(view, row, "aria-rowindex").unwrap_or(next_y);
                next_y = y + 1;
                seq += 1;
                place_row(view, row, y, &mut placed);
            }
            if let Some(node) = section.node {
                row_groups.push(RowGroup {
                    node: Some(node),
                    y: group_start,
                    height: seq - group_start,
                });
            }
        }

        if placed.is_empty() {
            return Table::empty(root);
        }

        let mut col_groups = Vec::new();
        let mut seeded_cols = 0usize;
        for (node, width) in locate::col_group_spans(view, root) {
            col_groups.push(ColGroup {
                node,
                x: seeded_cols,
                width,
            });
            seeded_cols += width;
        }
        if let Some(declared) = view.attribute(root, "aria-colcount").and_then(parse_positive) {
            seeded_cols = seeded_cols.max(declared.min(MAX_EXPLICIT_INDEX));
        }

        let row_count = placed
            .iter()
            .map(|cell| cell.y_range().end)
            .max()
            .unwrap_or(0);
        let col_count = placed
            .iter()
            .map(|cell| cell.x_range().end)
            .max()
            .unwrap_or(0)
            .max(seeded_cols);

        let mut cells: Vec<Vec<Cell>> = vec![Vec::new(); row_count];
        let mut by_node = HashMap::with_capacity(placed.len());
        let mut placement = Vec::with_capacity(placed.len());
        for cell in placed {
            let slot = (cell.y, cells[cell.y].len());
            by_node.insert(cell.node, slot);
            placement.push(slot);
            cells[cell.y].push(cell);
        }

        tracing::debug!(
            ?root,
            rows = row_count,
            cols = col_count,
            groups = row_groups.len(),
            "table grid built"
        );

        Table {
            root,
            row_groups,
            col_groups,
            cells,
            row_count,
            col_count,
            by_node,
            placement,
        }
    }

    fn empty(root: NodeId) -> Table {
        Table {
            root,
            row_groups: Vec::new(),
            col_groups: Vec::new(),
            cells: Vec::new(),
            row_count: 0,
            col_count: 0,
            by_node: HashMap::new(),
            placement: Vec::new(),
        }
    }

    /// Cell record for a node, if the node was placed in this table.
    pub fn cell(&self, node: NodeId) -> Option<&Cell> {
        let &(y, i) = self.by_node.get(&node)?;
        Some(&self.cells[y][i])
    }

    /// All cells covering slot `(x, y)`, in placement order.
    ///
    /// More than one cell appears only for overlapping spans or
    /// conflicting explicit indices; the last entry is the
    /// latest-placed winner.
    pub fn slot_cells(&self, x: usize, y: usize) -> Vec<&Cell> {
        self.in_placement_order()
            .filter(|cell| cell.covers(x, y))
            .collect()
    }

    /// Latest-placed cell covering slot `(x, y)`.
    pub(crate) fn winning_cell_at(&self, x: usize, y: usize) -> Option<&Cell> {
        self.in_placement_order()
            .filter(|cell| cell.covers(x, y))
            .last()
    }

    /// Cells in the order the allocator placed them.
    pub(crate) fn in_placement_order(&self) -> impl Iterator<Item = &Cell> {
        self.placement.iter().map(|&(y, i)| &self.cells[y][i])
    }

    /// Row group whose rows contain grid row `y`.
    pub fn row_group_of(&self, y: usize) -> Option<&RowGroup> {
        self.row_groups
            .iter()
            .find(|group| group.y <= y && y < group.y + group.height)
    }

    /// Column group whose columns contain grid column `x`.
    pub fn col_group_of(&self, x: usize) -> Option<&ColGroup> {
        self.col_groups
            .iter()
            .find(|group| group.x <= x && x < group.x + group.width)
    }

    /// True when some row group's rows intersect both cells' spans.
    pub(crate) fn share_row_group(&self, a: &Cell, b: &Cell) -> bool {
        self.row_groups.iter().any(|group| {
            let rows = group.y..group.y + group.height;
            ranges_intersect(&rows, &a.y_range()) && ranges_intersect(&rows, &b.y_range())
        })
    }

    /// True when some column group's columns intersect both cells' spans.
    pub(crate) fn share_col_group(&self, a: &Cell, b: &Cell) -> bool {
        self.col_groups.iter().any(|group| {
            let cols = group.x..group.x + group.width;
            ranges_intersect(&cols, &a.x_range()) && ranges_intersect(&cols, &b.x_range())
        })
    }

    /// Header nodes describing `cell`: explicit `headers` references
    /// when present, implicit scope inference otherwise.
    pub fn header_elements<V: DomView + ?Sized>(&self, view: &V, cell: &Cell) -> Vec<NodeId> {
        headers::header_elements(view, self, cell)
    }
}

fn ranges_intersect(a: &Range<usize>, b: &Range<usize>) -> bool {
    !a.is_empty() && !b.is_empty() && a.start < b.end && b.start < a.end
}

fn place_row<V: DomView + ?Sized>(view: &V, row: NodeId, y: usize, placed: &mut Vec<Cell>) {
    // Slots of row `y` claimed by cells growing down from earlier rows.
    let mut taken: HashSet<usize> = HashSet::new();
    for cell in placed.iter().filter(|cell| cell.covers_row(y)) {
        taken.extend(cell.x_range());
    }

    let mut cursor = explicit_index(view, row, "aria-colindex").unwrap_or(0);
    for node in locate::cell_elements(view, row) {
        let width = span_attr(view, node, "colspan", "aria-colspan", MAX_COL_SPAN);
        let height = span_attr(view, node, "rowspan", "aria-rowspan", MAX_ROW_SPAN);
        let cell_y = explicit_index(view, node, "aria-rowindex").unwrap_or(y);
        let x = match explicit_index(view, node, "aria-colindex") {
            Some(explicit) => {
                if taken.contains(&explicit) {
                    tracing::trace!(
                        ?node,
                        x = explicit,
                        "explicit column index lands on an occupied slot"
                    );
                }
                explicit
            }
            None => {
                let mut x = cursor;
                while taken.contains(&x) {
                    x += 1;
                }
                x
            }
        };
        let cell = Cell {
            node,
            x,
            y: cell_y,
            width,
            height,
            scope: header_scope(view, node),
        };
        if cell.covers_row(y) {
            taken.extend(cell.x_range());
        }
        cursor = x + width;
        placed.push(cell);
    }
}

/// Parses a strictly positive integer attribute value.
pub(crate) fn parse_positive(value: &str) -> Option<usize> {
    let n: usize = value.trim().parse().ok()?;
    (n >= 1).then_some(n)
}

/// Reads a span from the native attribute, falling back to the ARIA
/// analogue, defaulting to 1 and clamping to `max`.
fn span_attr<V: DomView + ?Sized>(
    view: &V,
    id: NodeId,
    native: &str,
    aria: &str,
    max: usize,
) -> usize {
    view.attribute(id, native)
        .and_then(parse_positive)
        .or_else(|| view.attribute(id, aria).and_then(parse_positive))
        .unwrap_or(1)
        .min(max)
}

/// Reads a 1-based explicit index attribute, returned 0-based.
///
/// Non-numeric, non-positive, and out-of-range values are all invalid
/// and yield `None`, letting the caller fall back to sequential
/// placement.
fn explicit_index<V: DomView + ?Sized>(view: &V, id: NodeId, attr: &str) -> Option<usize> {
    let n = view.attribute(id, attr).and_then(parse_positive)?;
    if n > MAX_EXPLICIT_INDEX {
        tracing::trace!(?id, attr, value = n, "explicit index out of range, ignored");
        return None;
    }
    Some(n - 1)
}
