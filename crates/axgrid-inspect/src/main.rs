//! Table inspector entry point.
//!
//! Parses an HTML file, rebuilds the logical grid of every table-like
//! root in it (native or ARIA), and prints the snapshots as JSON on
//! stdout. Logs go to stderr so the output stays pipeable; set
//! `RUST_LOG=axgrid_table=trace` to watch the allocator work.

use anyhow::{bail, Context, Result};
use axgrid_dom::descendant_elements;
use axgrid_html::parse_file;
use axgrid_table::{aria, TableRegistry, TableSnapshot};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let Some(path) = std::env::args().nth(1) else {
        bail!("usage: axgrid-inspect <page.html>");
    };

    let tree = parse_file(&path).with_context(|| format!("reading {path}"))?;

    let roots: Vec<_> = descendant_elements(&tree, tree.document())
        .into_iter()
        .filter(|&id| aria::is_table_root(&tree, id))
        .collect();
    tracing::info!(tables = roots.len(), path = %path, "inspecting");

    let mut registry = TableRegistry::new();
    let mut snapshots = Vec::with_capacity(roots.len());
    for root in roots {
        let table = registry.get_or_build(&tree, root);
        snapshots.push(TableSnapshot::capture(&tree, table));
    }

    println!("{}", serde_json::to_string_pretty(&snapshots)?);
    Ok(())
}
