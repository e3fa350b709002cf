//! Trimming a network down to the subnetwork connected to the MSN.
//!
//! # Overview
//!
//! The most-sampled node (MSN) anchors the analysis: states that cannot
//! exchange probability with it are usually sampling noise. [`Csn::trim`]
//! keeps only the nodes passing every enabled filter:
//!
//! - `by_outflow` — reachable **from** the MSN along directed edges;
//! - `by_inflow` — able to reach the MSN (reachability in the reversed
//!   graph);
//! - `min_count` — total row count at least the threshold (keep-if-qualifies,
//!   same polarity as the flow filters).
//!
//! The MSN passes both flow filters by self-reachability: the DFS visits its
//! start node. Nothing is guaranteed to survive `min_count`, though — a
//! threshold above the maximum row total yields an empty view, which is not
//! an error.
//!
//! # Index remapping
//!
//! The trimmed matrices are physically re-indexed to contiguous `M×M` form,
//! while subgraph nodes keep their original state `id` in the payload. Row
//! `k` of the reduced matrices, node `k` of the subgraph, and
//! `indices[k]` in the full network all refer to the same state.

use nalgebra::DMatrix;
use nalgebra_sparse::CooMatrix;
use nalgebra_sparse::convert::serial::{convert_coo_dense, convert_dense_coo};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::{Dfs, EdgeRef, Reversed};
use tracing::{debug, instrument};

use crate::matrix::{row_stochastic, symmetrize};
use crate::network::build::{Csn, StateNode};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Filter toggles for [`Csn::trim`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrimConfig {
    /// Keep only nodes that can reach the MSN.
    pub by_inflow: bool,
    /// Keep only nodes reachable from the MSN.
    pub by_outflow: bool,
    /// Keep only nodes whose total row count is at least this value.
    pub min_count: f64,
}

impl Default for TrimConfig {
    fn default() -> Self {
        Self {
            by_inflow: true,
            by_outflow: true,
            min_count: 0.0,
        }
    }
}

// ---------------------------------------------------------------------------
// TrimmedView
// ---------------------------------------------------------------------------

/// The reduced network produced by [`Csn::trim`].
///
/// An immutable value: repeated trims of the same [`Csn`] are independent,
/// and callers wanting history keep their own references to earlier views.
#[derive(Debug, Clone)]
pub struct TrimmedView {
    /// Retained original state indices, strictly ascending.
    pub indices: Vec<usize>,
    /// Subgraph induced on the retained nodes. Node `k` carries the payload
    /// of state `indices[k]`; edge weights are those of the full graph.
    pub graph: DiGraph<StateNode, f64>,
    /// Count matrix sliced to the retained rows/columns (re-symmetrized if
    /// the network was built with symmetrization).
    pub countmat: CooMatrix<f64>,
    /// Transition matrix re-derived from the reduced count matrix.
    pub transmat: CooMatrix<f64>,
}

impl TrimmedView {
    /// Number of retained states.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.indices.len()
    }

    /// Map a row of the reduced matrices back to its original state index.
    #[must_use]
    pub fn original_index(&self, k: usize) -> Option<usize> {
        self.indices.get(k).copied()
    }
}

// ---------------------------------------------------------------------------
// Trim operation
// ---------------------------------------------------------------------------

impl Csn {
    /// Reduce the network to the nodes passing every enabled filter in
    /// `config`, anchored at the most-sampled node.
    ///
    /// Never fails: if no node passes (for example, a `min_count` above the
    /// maximum row total), the view is empty — zero indices, an empty graph,
    /// and 0×0 matrices.
    #[must_use]
    #[instrument(skip(self))]
    pub fn trim(&self, config: &TrimConfig) -> TrimmedView {
        let n = self.nnodes();
        let totals = self.total_counts();
        let msn = NodeIndex::new(self.most_sampled_node());

        let mut keep = vec![true; n];
        if config.by_outflow {
            intersect(&mut keep, &reachable_forward(&self.graph, msn));
        }
        if config.by_inflow {
            intersect(&mut keep, &reachable_backward(&self.graph, msn));
        }
        for (i, total) in totals.iter().enumerate() {
            if *total < config.min_count {
                keep[i] = false;
            }
        }

        let indices: Vec<usize> = (0..n).filter(|&i| keep[i]).collect();
        let graph = induce_subgraph(&self.graph, &keep, &indices);

        let mut countmat = slice_counts(&self.countmat, &indices);
        if self.is_symmetrized() {
            countmat = symmetrize(&countmat);
        }
        let transmat = row_stochastic(&countmat);

        debug!(
            msn = msn.index(),
            retained = indices.len(),
            dropped = n - indices.len(),
            "trimmed state network"
        );
        TrimmedView {
            indices,
            graph,
            countmat,
            transmat,
        }
    }
}

fn intersect(keep: &mut [bool], other: &[bool]) {
    for (k, o) in keep.iter_mut().zip(other) {
        *k &= *o;
    }
}

/// Nodes reachable from `start` along edge direction, `start` included.
fn reachable_forward(graph: &DiGraph<StateNode, f64>, start: NodeIndex) -> Vec<bool> {
    let mut seen = vec![false; graph.node_count()];
    let mut dfs = Dfs::new(graph, start);
    while let Some(node) = dfs.next(graph) {
        seen[node.index()] = true;
    }
    seen
}

/// Nodes that can reach `start`, `start` included.
fn reachable_backward(graph: &DiGraph<StateNode, f64>, start: NodeIndex) -> Vec<bool> {
    let reversed = Reversed(graph);
    let mut seen = vec![false; graph.node_count()];
    let mut dfs = Dfs::new(reversed, start);
    while let Some(node) = dfs.next(reversed) {
        seen[node.index()] = true;
    }
    seen
}

/// Build the induced subgraph over the retained nodes, cloning payloads so
/// original ids and attributes survive.
fn induce_subgraph(
    graph: &DiGraph<StateNode, f64>,
    keep: &[bool],
    indices: &[usize],
) -> DiGraph<StateNode, f64> {
    let mut sub = DiGraph::with_capacity(indices.len(), 0);
    let mut remap: Vec<Option<NodeIndex>> = vec![None; keep.len()];
    for &orig in indices {
        let idx = sub.add_node(graph[NodeIndex::new(orig)].clone());
        remap[orig] = Some(idx);
    }
    for edge in graph.edge_references() {
        if let (Some(source), Some(target)) =
            (remap[edge.source().index()], remap[edge.target().index()])
        {
            sub.add_edge(source, target, *edge.weight());
        }
    }
    sub
}

/// Slice the count matrix to the `M×M` block of retained rows and columns,
/// in `indices` order, and re-sparsify.
fn slice_counts(counts: &CooMatrix<f64>, indices: &[usize]) -> CooMatrix<f64> {
    let dense = convert_coo_dense(counts);
    let m = indices.len();
    let sliced = DMatrix::from_fn(m, m, |r, c| dense[(indices[r], indices[c])]);
    convert_dense_coo(&sliced)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
