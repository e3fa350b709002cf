//! Stable node/edge enumerations for export collaborators.
//!
//! Visualization tooling wants flat tables rather than a graph structure.
//! These listings are deterministic — nodes sorted by original state id,
//! edges by `(source, target)` — so repeated exports of the same network
//! produce identical output. They work on both the full graph and a trimmed
//! subgraph; in the trimmed case the reported indices are the original state
//! ids carried by the node payloads.

use std::collections::BTreeMap;

use petgraph::graph::DiGraph;
use petgraph::visit::EdgeRef;
use serde::Serialize;
use serde_json::Value;

use crate::network::build::StateNode;

/// One row of the node table: state id plus its attributes.
#[derive(Debug, Clone, Serialize)]
pub struct NodeRecord<'a> {
    /// Original state index.
    pub id: usize,
    /// Caller-added attributes of the node.
    pub attrs: &'a BTreeMap<String, Value>,
}

/// One row of the edge table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EdgeRecord {
    /// Original state index of the source node.
    pub source: usize,
    /// Original state index of the target node.
    pub target: usize,
    /// Transition probability carried by the edge.
    pub weight: f64,
}

/// Enumerate `(node id, attributes)` pairs, sorted by id.
#[must_use]
pub fn node_records(graph: &DiGraph<StateNode, f64>) -> Vec<NodeRecord<'_>> {
    let mut records: Vec<NodeRecord<'_>> = graph
        .node_weights()
        .map(|node| NodeRecord {
            id: node.id,
            attrs: &node.attrs,
        })
        .collect();
    records.sort_by_key(|record| record.id);
    records
}

/// Enumerate `(source, target, weight)` triples, sorted by `(source, target)`.
#[must_use]
pub fn edge_records(graph: &DiGraph<StateNode, f64>) -> Vec<EdgeRecord> {
    let mut records: Vec<EdgeRecord> = graph
        .edge_references()
        .map(|edge| EdgeRecord {
            source: graph[edge.source()].id,
            target: graph[edge.target()].id,
            weight: *edge.weight(),
        })
        .collect();
    records.sort_by(|a, b| (a.source, a.target).cmp(&(b.source, b.target)));
    records
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::build::Csn;
    use crate::network::trim::TrimConfig;
    use serde_json::json;

    #[test]
    fn node_records_are_sorted_and_carry_attrs() {
        let mut csn = Csn::new(vec![vec![0.0, 2.0], vec![2.0, 0.0]], false).expect("builds");
        csn.add_attr("label", vec![json!("a"), json!("b")]).expect("lengths match");

        let records = node_records(csn.graph());
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, 0);
        assert_eq!(records[1].id, 1);
        assert_eq!(records[1].attrs.get("label"), Some(&json!("b")));
    }

    #[test]
    fn edge_records_are_sorted_by_endpoints() {
        let csn = Csn::new(
            vec![
                vec![0.0, 5.0, 0.0],
                vec![0.0, 0.0, 5.0],
                vec![5.0, 0.0, 0.0],
            ],
            false,
        )
        .expect("builds");

        let records = edge_records(csn.graph());
        let endpoints: Vec<(usize, usize)> =
            records.iter().map(|r| (r.source, r.target)).collect();
        assert_eq!(endpoints, vec![(0, 1), (1, 2), (2, 0)]);
        assert!(records.iter().all(|r| (r.weight - 1.0).abs() < 1e-12));
    }

    #[test]
    fn trimmed_records_report_original_ids() {
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
        assert_eq!(view.indices, vec![1, 2]);

        let nodes = node_records(&view.graph);
        assert_eq!(nodes.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 2]);

        let edges = edge_records(&view.graph);
        assert!(edges.iter().any(|r| r.source == 1 && r.target == 2));
        assert!(edges.iter().all(|r| r.source != 0 && r.target != 0));
    }
}
