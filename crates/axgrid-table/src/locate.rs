//! Locators that walk the raw tree below a table root.
//!
//! All walks share the same descent rules: step into presentational
//! wrappers (`role="presentation"`/`"none"`) without counting them,
//! never step into a nested table root, and never step into a found
//! target. Elements that are neither targets, wrappers, nor
//! presentational are ignored along with their subtrees.

use axgrid_dom::{descendant_elements, DomView, NodeId};

use crate::aria;
use crate::grid::{parse_positive, MAX_COL_SPAN};

/// Position of a row group in the reordered sequence.
///
/// Variant order is the reordering: head groups first, body groups in
/// source order, foot groups last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum GroupKind {
    Head,
    Body,
    Foot,
}

impl GroupKind {
    fn of<V: DomView + ?Sized>(view: &V, id: NodeId) -> GroupKind {
        match view.tag_name(id) {
            Some("thead") => GroupKind::Head,
            Some("tfoot") => GroupKind::Foot,
            _ => GroupKind::Body,
        }
    }
}

/// One run of rows: either an explicit row group or a run of rows that
/// sit directly under the table root (`node` is `None` for those).
#[derive(Debug)]
pub(crate) struct Section {
    pub kind: GroupKind,
    pub node: Option<NodeId>,
    pub rows: Vec<NodeId>,
}

/// Sections in document order: groups and direct-row runs interleaved
/// as written.
pub(crate) fn sections_in_source_order<V: DomView + ?Sized>(
    view: &V,
    root: NodeId,
) -> Vec<Section> {
    let mut out = Vec::new();
    collect_sections(view, root, &mut out);
    out
}

/// Sections in grid order: head groups first, then body groups and
/// direct-row runs in source order, then foot groups. The sort is
/// stable, so source order is preserved within each kind.
pub(crate) fn sections<V: DomView + ?Sized>(view: &V, root: NodeId) -> Vec<Section> {
    let mut out = sections_in_source_order(view, root);
    let reordered = !out.is_sorted_by_key(|s| s.kind);
    out.sort_by_key(|s| s.kind);
    if reordered {
        tracing::debug!(?root, "row groups reordered to head/body/foot");
    }
    out
}

fn collect_sections<V: DomView + ?Sized>(view: &V, node: NodeId, out: &mut Vec<Section>) {
    for child in view.child_elements(node) {
        if aria::is_table_root(view, child) {
            continue;
        }
        if aria::is_row_group(view, child) {
            out.push(Section {
                kind: GroupKind::of(view, child),
                node: Some(child),
                rows: rows_within_group(view, child),
            });
        } else if aria::is_row(view, child) {
            // Consecutive direct rows form one anonymous body section.
            match out.last_mut() {
                Some(section) if section.node.is_none() => section.rows.push(child),
                _ => out.push(Section {
                    kind: GroupKind::Body,
                    node: None,
                    rows: vec![child],
                }),
            }
        } else if aria::is_presentational(view, child) {
            collect_sections(view, child, out);
        }
    }
}

fn rows_within_group<V: DomView + ?Sized>(view: &V, group: NodeId) -> Vec<NodeId> {
    let mut rows = Vec::new();
    collect_rows(view, group, &mut rows);
    rows
}

fn collect_rows<V: DomView + ?Sized>(view: &V, node: NodeId, rows: &mut Vec<NodeId>) {
    for child in view.child_elements(node) {
        if aria::is_table_root(view, child) {
            continue;
        }
        if aria::is_row(view, child) {
            rows.push(child);
        } else if aria::is_presentational(view, child) {
            collect_rows(view, child, rows);
        }
    }
}

/// Row-group elements of a table in grid order: head groups first,
/// then body groups in source order, then foot groups.
pub fn row_group_elements<V: DomView + ?Sized>(view: &V, root: NodeId) -> Vec<NodeId> {
    sections(view, root)
        .into_iter()
        .filter_map(|section| section.node)
        .collect()
}

/// All row elements of a table in document order, whether grouped or
/// sitting directly under the root.
pub fn row_elements<V: DomView + ?Sized>(view: &V, root: NodeId) -> Vec<NodeId> {
    sections_in_source_order(view, root)
        .into_iter()
        .flat_map(|section| section.rows)
        .collect()
}

/// Cell elements that belong to a row, in document order.
pub fn cell_elements<V: DomView + ?Sized>(view: &V, row: NodeId) -> Vec<NodeId> {
    let mut cells = Vec::new();
    collect_cells(view, row, &mut cells);
    cells
}

fn collect_cells<V: DomView + ?Sized>(view: &V, node: NodeId, cells: &mut Vec<NodeId>) {
    for child in view.child_elements(node) {
        if aria::is_table_root(view, child) {
            continue;
        }
        if aria::is_cell(view, child) {
            cells.push(child);
        } else if aria::is_presentational(view, child) {
            collect_cells(view, child, cells);
        }
    }
}

/// Declared column groups of a table, in document order, each with the
/// number of columns it spans.
///
/// A `<colgroup>` with `<col>` children spans the sum of their `span`
/// attributes; one without spans its own `span` attribute. Spans
/// default to 1 and are clamped the same way cell spans are.
pub fn col_group_spans<V: DomView + ?Sized>(view: &V, root: NodeId) -> Vec<(NodeId, usize)> {
    let mut out = Vec::new();
    collect_col_groups(view, root, &mut out);
    out
}

fn collect_col_groups<V: DomView + ?Sized>(
    view: &V,
    node: NodeId,
    out: &mut Vec<(NodeId, usize)>,
) {
    for child in view.child_elements(node) {
        if aria::is_presentational(view, child) {
            collect_col_groups(view, child, out);
            continue;
        }
        if view.tag_name(child) != Some("colgroup") {
            continue;
        }
        let cols: Vec<NodeId> = view
            .child_elements(child)
            .into_iter()
            .filter(|&col| view.tag_name(col) == Some("col"))
            .collect();
        let span = if cols.is_empty() {
            span_attr(view, child)
        } else {
            cols.iter().map(|&col| span_attr(view, col)).sum()
        };
        out.push((child, span));
    }
}

fn span_attr<V: DomView + ?Sized>(view: &V, id: NodeId) -> usize {
    view.attribute(id, "span")
        .and_then(parse_positive)
        .unwrap_or(1)
        .min(MAX_COL_SPAN)
}

/// Tags that make a cell perceivable even with no text in it.
const REPLACED_TAGS: &[&str] = &[
    "img", "picture", "svg", "canvas", "video", "audio", "object", "embed", "iframe", "input",
    "br", "hr", "meter", "progress",
];

/// True when a cell renders nothing perceivable: no non-whitespace text
/// and no replaced or `role="img"` descendant.
pub fn is_empty_cell_element<V: DomView + ?Sized>(view: &V, cell: NodeId) -> bool {
    if !view.text_content(cell).trim().is_empty() {
        return false;
    }
    !descendant_elements(view, cell).into_iter().any(|desc| {
        let replaced = view
            .tag_name(desc)
            .is_some_and(|tag| REPLACED_TAGS.contains(&tag));
        replaced || resolves_to_img(view, desc)
    })
}

/// True when the element's role resolves to `img`.
///
/// Same resolution rule as [`aria::explicit_role`], with `img`
/// recognized alongside the table vocabulary: unrecognized tokens are
/// skipped, and a recognized role ahead of `img` in the list wins.
fn resolves_to_img<V: DomView + ?Sized>(view: &V, id: NodeId) -> bool {
    let Some(value) = view.attribute(id, "role") else {
        return false;
    };
    value
        .split_whitespace()
        .find_map(|token| {
            if token.eq_ignore_ascii_case("img") {
                return Some(true);
            }
            aria::Role::parse(token).map(|_| false)
        })
        .unwrap_or(false)
}
