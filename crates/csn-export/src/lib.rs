#![forbid(unsafe_code)]
//! Gephi table export for conformational state networks.
//!
//! Writes the node and edge CSV tables the Gephi network visualization tool
//! imports, fed by the deterministic record enumeration from
//! [`csn_core::network::records`]. Works on the full state graph or on a
//! trimmed subgraph; in the trimmed case the exported ids are the original
//! state indices.
//!
//! The node table has an `Id` column followed by one column per attribute
//! name (the sorted union across all nodes; nodes missing an attribute get
//! an empty field). The edge table is `Source,Target,Weight`.
//!
//! This crate is deliberately thin: all graph semantics live in `csn-core`,
//! and the file layout here is a convenience rather than a contract.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use petgraph::graph::DiGraph;
use serde_json::Value;
use tracing::{debug, instrument};

use csn_core::StateNode;
use csn_core::network::records::{edge_records, node_records};

/// Write both Gephi tables for `graph`.
///
/// # Errors
///
/// Returns an error if either file cannot be created or written.
#[instrument(skip(graph))]
pub fn write_gephi(
    graph: &DiGraph<StateNode, f64>,
    node_path: &Path,
    edge_path: &Path,
) -> Result<()> {
    let node_file = File::create(node_path)
        .with_context(|| format!("create node table {}", node_path.display()))?;
    write_node_table(&mut BufWriter::new(node_file), graph)
        .with_context(|| format!("write node table {}", node_path.display()))?;

    let edge_file = File::create(edge_path)
        .with_context(|| format!("create edge table {}", edge_path.display()))?;
    write_edge_table(&mut BufWriter::new(edge_file), graph)
        .with_context(|| format!("write edge table {}", edge_path.display()))?;

    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "exported gephi tables"
    );
    Ok(())
}

/// Write the node table (`Id` plus one column per attribute name) to `out`.
///
/// # Errors
///
/// Returns an error on a failed write to `out`.
pub fn write_node_table<W: Write>(out: &mut W, graph: &DiGraph<StateNode, f64>) -> Result<()> {
    let records = node_records(graph);

    // Sorted union of attribute names across all nodes.
    let columns: BTreeSet<&str> = records
        .iter()
        .flat_map(|record| record.attrs.keys().map(String::as_str))
        .collect();

    write!(out, "Id")?;
    for name in &columns {
        write!(out, ",{}", csv_field(name))?;
    }
    writeln!(out)?;

    for record in &records {
        write!(out, "{}", record.id)?;
        for name in &columns {
            let rendered = record.attrs.get(*name).map(render_value).unwrap_or_default();
            write!(out, ",{}", csv_field(&rendered))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Write the `Source,Target,Weight` edge table to `out`.
///
/// # Errors
///
/// Returns an error on a failed write to `out`.
pub fn write_edge_table<W: Write>(out: &mut W, graph: &DiGraph<StateNode, f64>) -> Result<()> {
    writeln!(out, "Source,Target,Weight")?;
    for record in edge_records(graph) {
        writeln!(out, "{},{},{}", record.source, record.target, record.weight)?;
    }
    Ok(())
}

/// Render an attribute value as a flat CSV cell: strings unquoted, null
/// empty, everything else in JSON notation.
fn render_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Quote a field when it contains a comma, quote, or newline.
fn csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use csn_core::{Csn, TrimConfig};
    use serde_json::json;

    fn cycle3() -> Csn {
        Csn::new(
            vec![
                vec![0.0, 5.0, 0.0],
                vec![0.0, 0.0, 5.0],
                vec![5.0, 0.0, 0.0],
            ],
            false,
        )
        .expect("3-cycle builds")
    }

    #[test]
    fn edge_table_lists_sorted_edges() {
        let csn = cycle3();
        let mut out = Vec::new();
        write_edge_table(&mut out, csn.graph()).expect("write");
        let text = String::from_utf8(out).expect("utf8");
        assert_eq!(text, "Source,Target,Weight\n0,1,1\n1,2,1\n2,0,1\n");
    }

    #[test]
    fn node_table_has_one_column_per_attribute() {
        let mut csn = cycle3();
        csn.add_attr("population", vec![json!(10), json!(20), json!(30)])
            .expect("attr");
        csn.add_attr("label", vec![json!("a"), json!("b, c"), json!("d")])
            .expect("attr");

        let mut out = Vec::new();
        write_node_table(&mut out, csn.graph()).expect("write");
        let text = String::from_utf8(out).expect("utf8");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Id,label,population");
        assert_eq!(lines[1], "0,a,10");
        assert_eq!(lines[2], "1,\"b, c\",20", "comma field is quoted");
        assert_eq!(lines[3], "2,d,30");
    }

    #[test]
    fn nodes_without_attributes_export_bare_ids() {
        let csn = cycle3();
        let mut out = Vec::new();
        write_node_table(&mut out, csn.graph()).expect("write");
        let text = String::from_utf8(out).expect("utf8");
        assert_eq!(text, "Id\n0\n1\n2\n");
    }

    #[test]
    fn files_are_written_to_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let node_path = dir.path().join("node.csv");
        let edge_path = dir.path().join("edge.csv");

        let csn = cycle3();
        write_gephi(csn.graph(), &node_path, &edge_path).expect("export");

        let nodes = std::fs::read_to_string(&node_path).expect("node file");
        let edges = std::fs::read_to_string(&edge_path).expect("edge file");
        assert!(nodes.starts_with("Id"));
        assert!(edges.starts_with("Source,Target,Weight"));
        assert_eq!(edges.lines().count(), 4);
    }

    #[test]
    fn trimmed_graph_exports_original_ids() {
        let csn = Csn::new(
            vec![
                vec![0.0, 0.0, 0.0],
                vec![0.0, 4.0, 2.0],
                vec![0.0, 1.0, 0.0],
            ],
            false,
        )
        .expect("builds");
        let view = csn.trim(&TrimConfig::default());

        let mut out = Vec::new();
        write_node_table(&mut out, &view.graph).expect("write");
        let text = String::from_utf8(out).expect("utf8");
        assert_eq!(text, "Id\n1\n2\n");
    }
}
