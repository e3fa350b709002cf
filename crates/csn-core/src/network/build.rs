//! Construction of a conformational state network from transition counts.
//!
//! # Node identity
//!
//! Nodes are added in state order, so state `i` is always `NodeIndex::new(i)`
//! in the full graph and the [`StateNode`] payload records `i` as its `id`.
//! Nodes are never removed from the full graph, keeping that correspondence
//! stable for the lifetime of the [`Csn`].
//!
//! # Edge direction
//!
//! Edge `i → j` means "a transition from state i to state j was observed";
//! its weight is the transition probability `transmat[i, j]`. Zero entries of
//! the sparse transition matrix are simply absent, so the edge set is exactly
//! the non-zero support of the transition matrix.

#![allow(clippy::module_name_repetitions)]

use std::collections::BTreeMap;

use nalgebra_sparse::CooMatrix;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::error::CsnError;
use crate::matrix::input::CountsInput;
use crate::matrix::{row_stochastic, row_totals, symmetrize};

// ---------------------------------------------------------------------------
// StateNode
// ---------------------------------------------------------------------------

/// Payload of one graph node: the original state index plus caller-added
/// attributes.
///
/// The `id` survives trimming unchanged, so a node in a trimmed subgraph can
/// always be mapped back to its row in the full matrices.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateNode {
    /// Original state index in `[0, nnodes)` of the full network.
    pub id: usize,
    /// Caller-added attributes, keyed by attribute name.
    pub attrs: BTreeMap<String, Value>,
}

impl StateNode {
    fn new(id: usize) -> Self {
        Self {
            id,
            attrs: BTreeMap::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Csn
// ---------------------------------------------------------------------------

/// A conformational state network.
///
/// Owns the (optionally symmetrized) count matrix, the row-stochastic
/// transition matrix derived from it, and the directed weighted state graph.
/// The matrices are fixed at construction; only node attributes can be
/// mutated afterwards, via [`Csn::add_attr`].
#[derive(Debug, Clone)]
pub struct Csn {
    pub(crate) countmat: CooMatrix<f64>,
    pub(crate) transmat: CooMatrix<f64>,
    pub(crate) graph: DiGraph<StateNode, f64>,
    pub(crate) symmetrize: bool,
}

impl Csn {
    /// Build a network from transition counts.
    ///
    /// `counts` is anything convertible to [`CountsInput`] (nested rows, a
    /// dense matrix, a COO matrix, or raw triplets). When `symmetrize` is
    /// set, the count matrix is replaced with `0.5 * (M + Mᵀ)` before the
    /// transition matrix is derived, and the flag is remembered so trimming
    /// re-symmetrizes the reduced counts the same way.
    ///
    /// # Errors
    ///
    /// Returns a [`CsnError`] if the input is ragged, non-square, empty, or
    /// carries out-of-bounds triplet coordinates. After a successful return
    /// no operation on the instance fails except [`Csn::add_attr`] with a
    /// wrong-length value sequence.
    #[instrument(skip(counts))]
    pub fn new(counts: impl Into<CountsInput>, symmetrize_counts: bool) -> Result<Self, CsnError> {
        let mut countmat = counts.into().into_coo()?;
        if symmetrize_counts {
            countmat = symmetrize(&countmat);
        }
        let transmat = row_stochastic(&countmat);

        let nnodes = countmat.nrows();
        let mut graph = DiGraph::with_capacity(nnodes, transmat.nnz());
        for id in 0..nnodes {
            graph.add_node(StateNode::new(id));
        }
        for (i, j, weight) in transmat.triplet_iter() {
            if *weight > 0.0 {
                graph.add_edge(NodeIndex::new(i), NodeIndex::new(j), *weight);
            }
        }

        debug!(
            nnodes,
            edges = graph.edge_count(),
            symmetrized = symmetrize_counts,
            "constructed state network"
        );
        Ok(Self {
            countmat,
            transmat,
            graph,
            symmetrize: symmetrize_counts,
        })
    }

    /// The count matrix (post-symmetrization, if requested).
    #[must_use]
    pub const fn countmat(&self) -> &CooMatrix<f64> {
        &self.countmat
    }

    /// The row-stochastic transition matrix.
    #[must_use]
    pub const fn transmat(&self) -> &CooMatrix<f64> {
        &self.transmat
    }

    /// The directed weighted state graph.
    #[must_use]
    pub const fn graph(&self) -> &DiGraph<StateNode, f64> {
        &self.graph
    }

    /// Number of states (and graph nodes).
    #[must_use]
    pub fn nnodes(&self) -> usize {
        self.countmat.nrows()
    }

    /// Whether the count matrix was symmetrized at construction.
    #[must_use]
    pub const fn is_symmetrized(&self) -> bool {
        self.symmetrize
    }

    /// The payload of state `id`, or `None` if `id >= nnodes()`.
    #[must_use]
    pub fn state(&self, id: usize) -> Option<&StateNode> {
        self.graph.node_weight(NodeIndex::new(id))
    }

    /// Per-state total outgoing counts (row sums of the count matrix).
    #[must_use]
    pub fn total_counts(&self) -> Vec<f64> {
        row_totals(&self.countmat)
    }

    /// Index of the most-sampled node: the state with the maximum total
    /// count, first occurrence on ties.
    #[must_use]
    pub fn most_sampled_node(&self) -> usize {
        let totals = self.total_counts();
        let mut msn = 0;
        for (i, &total) in totals.iter().enumerate().skip(1) {
            if total > totals[msn] {
                msn = i;
            }
        }
        msn
    }

    /// Attach attribute `name` to every node, taking `values[i]` for state
    /// `i`. Overwrites an existing attribute of the same name. The matrices
    /// are never touched.
    ///
    /// # Errors
    ///
    /// Returns [`CsnError::AttributeLength`] unless exactly one value per
    /// node is supplied; no node is modified in that case.
    pub fn add_attr(&mut self, name: &str, values: Vec<Value>) -> Result<(), CsnError> {
        if values.len() != self.nnodes() {
            return Err(CsnError::AttributeLength {
                name: name.to_string(),
                got: values.len(),
                expected: self.nnodes(),
            });
        }
        for (i, value) in values.into_iter().enumerate() {
            self.graph[NodeIndex::new(i)].attrs.insert(name.to_string(), value);
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
