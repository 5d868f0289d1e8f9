//! html5ever to arena conversion
//!
//! Uses html5ever's built-in RcDom and converts to our DOM format, which
//! is simpler and more reliable than implementing TreeSink directly.

use axgrid_dom::{DomTree, NodeId};
use html5ever::parse_document as h5_parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// HTML ingestion failure.
#[derive(Debug, thiserror::Error)]
pub enum HtmlError {
    #[error("failed to read {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Parse an HTML string into a [`DomTree`].
pub fn parse_document(html: &str) -> DomTree {
    let dom = h5_parse_document(RcDom::default(), Default::default()).one(html);
    convert(&dom)
}

/// Parse an HTML file into a [`DomTree`].
pub fn parse_file(path: impl AsRef<Path>) -> Result<DomTree, HtmlError> {
    let path = path.as_ref();
    let wrap = |source| HtmlError::Io {
        path: path.display().to_string(),
        source,
    };

    let file = File::open(path).map_err(&wrap)?;
    let dom = h5_parse_document(RcDom::default(), Default::default())
        .from_utf8()
        .read_from(&mut BufReader::new(file))
        .map_err(&wrap)?;
    Ok(convert(&dom))
}

fn convert(dom: &RcDom) -> DomTree {
    let mut tree = DomTree::new();
    let document = tree.document();
    for child in dom.document.children.borrow().iter() {
        convert_node(child, &mut tree, document);
    }
    tracing::debug!(nodes = tree.len(), "converted parsed document");
    tree
}

/// Convert one RcDom node (and its subtree) under `parent`.
fn convert_node(handle: &Handle, tree: &mut DomTree, parent: NodeId) {
    match &handle.data {
        RcNodeData::Element { name, attrs, .. } => {
            let id = tree.create_element(&name.local);
            for attr in attrs.borrow().iter() {
                tree.set_attr(id, &attr.name.local, &attr.value);
            }
            tree.append_child(parent, id);
            for child in handle.children.borrow().iter() {
                convert_node(child, tree, id);
            }
        }
        RcNodeData::Text { contents } => {
            let text = contents.borrow();
            if !text.trim().is_empty() {
                let id = tree.create_text(&text);
                tree.append_child(parent, id);
            }
        }
        // Comments, doctypes and processing instructions carry no table
        // structure; the document node is handled by the caller.
        _ => {}
    }
}
