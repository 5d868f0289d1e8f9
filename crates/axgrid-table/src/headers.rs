//! Header association: which header nodes describe a given cell.
//!
//! Explicit `headers` id-lists win outright; cells without one get
//! implicit inference over the built grid: the nearest row/auto header
//! left of each covered row, the nearest col/auto header above each
//! covered column, and any group-scoped header sharing a row or column
//! group with the cell. Results are deduplicated by node, in a stable
//! order.

use std::collections::HashSet;

use axgrid_dom::{descendant_elements, DomView, NodeId};

use crate::grid::{Cell, HeaderScope, Table};

pub(crate) fn header_elements<V: DomView + ?Sized>(
    view: &V,
    table: &Table,
    cell: &Cell,
) -> Vec<NodeId> {
    if let Some(ids) = explicit_tokens(view, cell.node) {
        // Any non-empty id list suppresses inference, even when nothing
        // resolves.
        return resolve_ids(view, table.root, cell.node, &ids);
    }
    inferred(table, cell)
}

fn explicit_tokens<'a, V: DomView + ?Sized>(view: &'a V, node: NodeId) -> Option<Vec<&'a str>> {
    let value = view.attribute(node, "headers")?;
    let tokens: Vec<&str> = value.split_whitespace().collect();
    if tokens.is_empty() { None } else { Some(tokens) }
}

/// Resolves id tokens against elements inside the table subtree, in
/// token order, skipping duplicates and self-references.
fn resolve_ids<V: DomView + ?Sized>(
    view: &V,
    root: NodeId,
    cell: NodeId,
    ids: &[&str],
) -> Vec<NodeId> {
    let scope = descendant_elements(view, root);
    let mut out = Vec::new();
    let mut seen = HashSet::new();
    for &wanted in ids {
        let found = scope
            .iter()
            .copied()
            .find(|&el| view.attribute(el, "id") == Some(wanted));
        match found {
            Some(el) if el != cell => {
                if seen.insert(el) {
                    out.push(el);
                }
            }
            Some(_) => {}
            None => {
                tracing::trace!(id = wanted, "headers reference not found inside the table");
            }
        }
    }
    out
}

fn inferred(table: &Table, cell: &Cell) -> Vec<NodeId> {
    let mut out = Vec::new();
    let mut seen = HashSet::new();

    // Nearest row-axis header strictly left of each covered row. The
    // scan passes over data cells and col-scoped headers and stops at
    // the first match.
    for y in cell.y_range() {
        let mut x = cell.x;
        while x > 0 {
            x -= 1;
            if let Some(header) = table.winning_cell_at(x, y) {
                if header.node != cell.node
                    && matches!(header.scope, HeaderScope::Row | HeaderScope::Auto)
                {
                    push_unique(header.node, &mut seen, &mut out);
                    break;
                }
            }
        }
    }

    // Nearest column-axis header strictly above each covered column.
    for x in cell.x_range() {
        let mut y = cell.y;
        while y > 0 {
            y -= 1;
            if let Some(header) = table.winning_cell_at(x, y) {
                if header.node != cell.node
                    && matches!(header.scope, HeaderScope::Col | HeaderScope::Auto)
                {
                    push_unique(header.node, &mut seen, &mut out);
                    break;
                }
            }
        }
    }

    // Group-scoped headers apply to every cell sharing the group,
    // regardless of relative position.
    for header in table.in_placement_order() {
        if header.node == cell.node {
            continue;
        }
        let applies = match header.scope {
            HeaderScope::RowGroup => table.share_row_group(header, cell),
            HeaderScope::ColGroup => table.share_col_group(header, cell),
            _ => false,
        };
        if applies {
            push_unique(header.node, &mut seen, &mut out);
        }
    }

    out
}

fn push_unique(node: NodeId, seen: &mut HashSet<NodeId>, out: &mut Vec<NodeId>) {
    if seen.insert(node) {
        out.push(node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axgrid_dom::DomTree;

    fn child(tree: &mut DomTree, parent: NodeId, tag: &str) -> NodeId {
        let id = tree.create_element(tag);
        tree.append_child(parent, id);
        id
    }

    fn headers_of(tree: &DomTree, table: &Table, node: NodeId) -> Vec<NodeId> {
        let cell = table.cell(node).unwrap();
        table.header_elements(tree, cell)
    }

    /// 3x3 matrix: col headers on top, row headers on the left.
    fn matrix_fixture(tree: &mut DomTree) -> (NodeId, Vec<NodeId>, Vec<NodeId>, Vec<NodeId>) {
        let table = child(tree, NodeId::DOCUMENT, "table");
        let tbody = child(tree, table, "tbody");

        let top = child(tree, tbody, "tr");
        child(tree, top, "td");
        let col_headers: Vec<NodeId> = (0..2)
            .map(|_| {
                let th = child(tree, top, "th");
                tree.set_attr(th, "scope", "col");
                th
            })
            .collect();

        let mut row_headers = Vec::new();
        let mut data = Vec::new();
        for _ in 0..2 {
            let row = child(tree, tbody, "tr");
            let th = child(tree, row, "th");
            tree.set_attr(th, "scope", "row");
            row_headers.push(th);
            for _ in 0..2 {
                data.push(child(tree, row, "td"));
            }
        }
        (table, col_headers, row_headers, data)
    }

    #[test]
    fn test_matrix_cells_get_row_and_col_headers() {
        let mut tree = DomTree::new();
        let (table, col_headers, row_headers, data) = matrix_fixture(&mut tree);
        let grid = Table::build(&tree, table);

        // data[3] sits at (2, 2): row header of row 2, col header of col 2.
        assert_eq!(
            headers_of(&tree, &grid, data[3]),
            vec![row_headers[1], col_headers[1]]
        );
        assert_eq!(
            headers_of(&tree, &grid, data[0]),
            vec![row_headers[0], col_headers[0]]
        );
    }

    #[test]
    fn test_explicit_headers_suppress_inference() {
        let mut tree = DomTree::new();
        let (table, col_headers, _, data) = matrix_fixture(&mut tree);
        tree.set_attr(col_headers[0], "id", "first");
        tree.set_attr(data[3], "headers", "first");

        let grid = Table::build(&tree, table);
        // Inference would give the row-2/col-2 headers; the attribute
        // replaces them with col_headers[0].
        assert_eq!(headers_of(&tree, &grid, data[3]), vec![col_headers[0]]);
    }

    #[test]
    fn test_unresolvable_explicit_ids_still_suppress() {
        let mut tree = DomTree::new();
        let (table, _, _, data) = matrix_fixture(&mut tree);
        tree.set_attr(data[0], "headers", "ghost missing");

        let grid = Table::build(&tree, table);
        assert!(headers_of(&tree, &grid, data[0]).is_empty());
    }

    #[test]
    fn test_blank_headers_attribute_falls_back_to_inference() {
        let mut tree = DomTree::new();
        let (table, col_headers, row_headers, data) = matrix_fixture(&mut tree);
        tree.set_attr(data[0], "headers", "   ");

        let grid = Table::build(&tree, table);
        assert_eq!(
            headers_of(&tree, &grid, data[0]),
            vec![row_headers[0], col_headers[0]]
        );
    }

    #[test]
    fn test_spanning_header_reported_once() {
        let mut tree = DomTree::new();
        let table = child(&mut tree, NodeId::DOCUMENT, "table");
        let tbody = child(&mut tree, table, "tbody");
        let r0 = child(&mut tree, tbody, "tr");
        let wide = child(&mut tree, r0, "th");
        tree.set_attr(wide, "scope", "col");
        tree.set_attr(wide, "colspan", "2");
        let r1 = child(&mut tree, tbody, "tr");
        let under = child(&mut tree, r1, "td");
        tree.set_attr(under, "colspan", "2");

        let grid = Table::build(&tree, table);
        // Both covered columns lead to the same header node.
        assert_eq!(headers_of(&tree, &grid, under), vec![wide]);
    }

    #[test]
    fn test_rowgroup_scoped_header_stays_in_its_group() {
        let mut tree = DomTree::new();
        let table = child(&mut tree, NodeId::DOCUMENT, "table");

        let body_a = child(&mut tree, table, "tbody");
        let ra = child(&mut tree, body_a, "tr");
        let group_header = child(&mut tree, ra, "th");
        tree.set_attr(group_header, "scope", "rowgroup");
        let a_data = child(&mut tree, ra, "td");

        let body_b = child(&mut tree, table, "tbody");
        let rb = child(&mut tree, body_b, "tr");
        child(&mut tree, rb, "th");
        let b_data = child(&mut tree, rb, "td");

        let grid = Table::build(&tree, table);
        assert!(headers_of(&tree, &grid, a_data).contains(&group_header));
        assert!(!headers_of(&tree, &grid, b_data).contains(&group_header));
    }
}
