//! Header association tests: explicit `headers` references and
//! implicit scope inference over parsed fixtures.

use axgrid_dom::{DomTree, NodeId, Selector};
use axgrid_html::{find_first, parse_document};
use axgrid_table::Table;

fn select(tree: &DomTree, selector: &str) -> NodeId {
    let sel = Selector::parse(selector).unwrap();
    find_first(tree, &sel).unwrap()
}

fn table_from(html: &str) -> (DomTree, Table) {
    let tree = parse_document(html);
    let root = select(&tree, "table");
    let table = Table::build(&tree, root);
    (tree, table)
}

/// Header texts for the cell whose trimmed text is `text`.
fn headers_for(tree: &DomTree, table: &Table, text: &str) -> Vec<String> {
    let cell = table
        .cells
        .iter()
        .flatten()
        .find(|cell| tree.text_content(cell.node).trim() == text)
        .unwrap();
    table
        .header_elements(tree, cell)
        .into_iter()
        .map(|node| tree.text_content(node).trim().to_string())
        .collect()
}

// === explicit references =================================================

#[test]
fn test_headers_attribute_returns_referenced_nodes() {
    let (tree, table) = table_from(
        "<table>\
           <tr><th id=\"name\">Name</th><th id=\"age\">Age</th></tr>\
           <tr><td headers=\"name age\">Ada 36</td></tr>\
         </table>",
    );

    let cell = table.cell(select(&tree, "[headers]")).unwrap();
    let nodes = table.header_elements(&tree, cell);
    assert_eq!(nodes, vec![select(&tree, "#name"), select(&tree, "#age")]);
}

#[test]
fn test_headers_attribute_order_and_dedup() {
    let (tree, table) = table_from(
        "<table>\
           <tr><th id=\"a\">A</th><th id=\"b\">B</th></tr>\
           <tr><td headers=\"b a b\">x</td></tr>\
         </table>",
    );
    assert_eq!(headers_for(&tree, &table, "x"), vec!["B", "A"]);
}

#[test]
fn test_headers_attribute_beats_inference() {
    // Implicit inference would pick the column header directly above;
    // the attribute redirects to a different one.
    let (tree, table) = table_from(
        "<table>\
           <tr><th id=\"left\">Left</th><th id=\"right\">Right</th></tr>\
           <tr><td headers=\"right\">under-left</td><td>under-right</td></tr>\
         </table>",
    );
    assert_eq!(headers_for(&tree, &table, "under-left"), vec!["Right"]);
    assert_eq!(headers_for(&tree, &table, "under-right"), vec!["Right"]);
}

#[test]
fn test_unresolvable_headers_suppress_inference() {
    let (tree, table) = table_from(
        "<table>\
           <tr><th>Col</th></tr>\
           <tr><td headers=\"nope\">x</td></tr>\
         </table>",
    );
    assert!(headers_for(&tree, &table, "x").is_empty());
}

#[test]
fn test_partially_resolvable_headers_keep_found_ids() {
    let (tree, table) = table_from(
        "<table>\
           <tr><th id=\"real\">Real</th></tr>\
           <tr><td headers=\"ghost real\">x</td></tr>\
         </table>",
    );
    assert_eq!(headers_for(&tree, &table, "x"), vec!["Real"]);
}

#[test]
fn test_headers_ids_outside_the_table_do_not_resolve() {
    let tree = parse_document(
        "<p id=\"outside\">elsewhere</p>\
         <table>\
           <tr><td headers=\"outside\">x</td></tr>\
         </table>",
    );
    let table = Table::build(&tree, select(&tree, "table"));
    assert!(headers_for(&tree, &table, "x").is_empty());
}

// === implicit inference ==================================================

#[test]
fn test_matrix_with_scoped_headers() {
    let (tree, table) = table_from(
        "<table>\
           <tr><td></td><th scope=\"col\">Q1</th><th scope=\"col\">Q2</th></tr>\
           <tr><th scope=\"row\">North</th><td>10</td><td>20</td></tr>\
           <tr><th scope=\"row\">South</th><td>30</td><td>40</td></tr>\
         </table>",
    );

    assert_eq!(headers_for(&tree, &table, "10"), vec!["North", "Q1"]);
    assert_eq!(headers_for(&tree, &table, "20"), vec!["North", "Q2"]);
    assert_eq!(headers_for(&tree, &table, "40"), vec!["South", "Q2"]);
}

#[test]
fn test_bare_th_acts_on_both_axes() {
    // No scope attributes at all: the top th serves its column, the
    // left th serves its row.
    let (tree, table) = table_from(
        "<table>\
           <tr><td>corner</td><th>TopB</th></tr>\
           <tr><th>LeftC</th><td>data</td></tr>\
         </table>",
    );
    assert_eq!(headers_for(&tree, &table, "data"), vec!["LeftC", "TopB"]);
}

#[test]
fn test_nearest_column_header_wins() {
    let (tree, table) = table_from(
        "<table>\
           <tr><th scope=\"col\">Outer</th></tr>\
           <tr><td>early</td></tr>\
           <tr><th scope=\"col\">Inner</th></tr>\
           <tr><td>late</td></tr>\
         </table>",
    );
    assert_eq!(headers_for(&tree, &table, "early"), vec!["Outer"]);
    // A closer col header interrupts the column above.
    assert_eq!(headers_for(&tree, &table, "late"), vec!["Inner"]);
}

#[test]
fn test_spanning_column_header_serves_every_covered_column() {
    let (tree, table) = table_from(
        "<table>\
           <tr><th scope=\"col\" colspan=\"2\">Wide</th><th scope=\"col\">Solo</th></tr>\
           <tr><td>a</td><td>b</td><td>c</td></tr>\
         </table>",
    );
    assert_eq!(headers_for(&tree, &table, "a"), vec!["Wide"]);
    assert_eq!(headers_for(&tree, &table, "b"), vec!["Wide"]);
    assert_eq!(headers_for(&tree, &table, "c"), vec!["Solo"]);
}

#[test]
fn test_spanning_data_cell_collects_headers_per_covered_slot() {
    let (tree, table) = table_from(
        "<table>\
           <tr><th scope=\"col\">A</th><th scope=\"col\">B</th></tr>\
           <tr><td colspan=\"2\">wide</td></tr>\
         </table>",
    );
    assert_eq!(headers_for(&tree, &table, "wide"), vec!["A", "B"]);
}

#[test]
fn test_row_header_spanning_rows_serves_each_one() {
    let (tree, table) = table_from(
        "<table>\
           <tr><th scope=\"row\" rowspan=\"2\">Pair</th><td>one</td></tr>\
           <tr><td>two</td></tr>\
         </table>",
    );
    assert_eq!(headers_for(&tree, &table, "one"), vec!["Pair"]);
    assert_eq!(headers_for(&tree, &table, "two"), vec!["Pair"]);
}

#[test]
fn test_data_cells_between_header_and_target_are_passed_over() {
    let (tree, table) = table_from(
        "<table>\
           <tr><th scope=\"row\">Label</th><td>mid</td><td>far</td></tr>\
         </table>",
    );
    // The scan passes over the intervening data cell.
    assert_eq!(headers_for(&tree, &table, "far"), vec!["Label"]);
}

#[test]
fn test_td_with_scope_serves_as_header() {
    let (tree, table) = table_from(
        "<table>\
           <tr><td scope=\"row\">Pseudo</td><td>x</td></tr>\
         </table>",
    );
    assert_eq!(headers_for(&tree, &table, "x"), vec!["Pseudo"]);
}

#[test]
fn test_demoted_th_is_not_a_header() {
    let (tree, table) = table_from(
        "<table>\
           <tr><th scope=\"row\">Real</th><th role=\"cell\">fake</th><td>x</td></tr>\
         </table>",
    );
    // The demoted th is passed over like any data cell.
    assert_eq!(headers_for(&tree, &table, "x"), vec!["Real"]);
    assert_eq!(headers_for(&tree, &table, "fake"), vec!["Real"]);
}

#[test]
fn test_header_cells_have_headers_too() {
    let (tree, table) = table_from(
        "<table>\
           <tr><th scope=\"col\">Top</th></tr>\
           <tr><th scope=\"row\">Side</th></tr>\
         </table>",
    );
    // The row header is described by the column header above it, never
    // by itself.
    assert_eq!(headers_for(&tree, &table, "Side"), vec!["Top"]);
    assert!(headers_for(&tree, &table, "Top").is_empty());
}

// === group scopes ========================================================

#[test]
fn test_rowgroup_headers_cover_their_group_only() {
    let (tree, table) = table_from(
        "<table>\
           <tbody>\
             <tr><th scope=\"rowgroup\" rowspan=\"2\">G1</th><td>a1</td></tr>\
             <tr><td>a2</td></tr>\
           </tbody>\
           <tbody>\
             <tr><th scope=\"rowgroup\">G2</th><td>b1</td></tr>\
           </tbody>\
         </table>",
    );

    assert_eq!(headers_for(&tree, &table, "a1"), vec!["G1"]);
    // The row scan passes over the rowgroup-scoped header; a2 reaches
    // it through the shared row group alone.
    assert_eq!(headers_for(&tree, &table, "a2"), vec!["G1"]);
    assert_eq!(headers_for(&tree, &table, "b1"), vec!["G2"]);
}

#[test]
fn test_colgroup_headers_cover_their_columns_only() {
    let (tree, table) = table_from(
        "<table>\
           <colgroup span=\"2\"></colgroup>\
           <colgroup span=\"2\"></colgroup>\
           <tr><th scope=\"colgroup\" colspan=\"2\">First</th>\
               <th scope=\"colgroup\" colspan=\"2\">Second</th></tr>\
           <tr><td>a</td><td>b</td><td>c</td><td>d</td></tr>\
         </table>",
    );

    assert_eq!(headers_for(&tree, &table, "a"), vec!["First"]);
    assert_eq!(headers_for(&tree, &table, "b"), vec!["First"]);
    assert_eq!(headers_for(&tree, &table, "c"), vec!["Second"]);
    assert_eq!(headers_for(&tree, &table, "d"), vec!["Second"]);
}

#[test]
fn test_group_scoped_header_without_groups_matches_nothing() {
    // rowgroup scope in a table with no row groups at all: the header
    // applies to no one, and the scan passes over it.
    let tree = parse_document(
        "<div role=\"table\">\
           <div role=\"row\">\
             <div role=\"cell\" scope=\"rowgroup\">G</div>\
             <div role=\"cell\">x</div>\
           </div>\
         </div>",
    );
    let table = Table::build(&tree, select(&tree, "[role=table]"));

    let g = table.cell(select(&tree, "[scope]")).unwrap();
    assert_eq!(g.scope, axgrid_table::HeaderScope::RowGroup);
    assert!(headers_for(&tree, &table, "x").is_empty());
}

// === ARIA header roles ===================================================

#[test]
fn test_aria_header_roles_infer_like_native_scopes() {
    let tree = parse_document(
        "<div role=\"grid\">\
           <div role=\"row\">\
             <div role=\"columnheader\">Name</div>\
             <div role=\"columnheader\">Age</div>\
           </div>\
           <div role=\"row\">\
             <div role=\"rowheader\">Ada</div>\
             <div role=\"gridcell\">36</div>\
           </div>\
         </div>",
    );
    let table = Table::build(&tree, select(&tree, "[role=grid]"));

    assert_eq!(headers_for(&tree, &table, "36"), vec!["Ada", "Age"]);
    assert_eq!(headers_for(&tree, &table, "Ada"), vec!["Name"]);
}
