//! AxGrid HTML - document ingestion
//!
//! Parses HTML through html5ever's `RcDom` and converts the result into
//! the arena [`DomTree`] the table model reads. Only elements and text
//! survive the conversion; comments, doctypes and processing instructions
//! carry nothing the structure model looks at.
//!
//! Note that a compliant HTML parser rewrites some table markup before we
//! ever see it (a stray `<tr>` gains an implicit `tbody` parent, stray
//! text is foster-parented out of the table). Fixtures that need the
//! pre-rewrite shape are built programmatically on [`DomTree`] or
//! expressed as ARIA tables, which the parser leaves alone.

mod parser;

pub use parser::{parse_document, parse_file, HtmlError};

use axgrid_dom::{descendant_elements, DomTree, NodeId, Selector};

/// All elements under the document root matching `selector`.
pub fn find_all(tree: &DomTree, selector: &Selector) -> Vec<NodeId> {
    descendant_elements(tree, tree.document())
        .into_iter()
        .filter(|&id| selector.matches(tree, id))
        .collect()
}

/// First element under the document root matching `selector`.
pub fn find_first(tree: &DomTree, selector: &Selector) -> Option<NodeId> {
    find_all(tree, selector).into_iter().next()
}
