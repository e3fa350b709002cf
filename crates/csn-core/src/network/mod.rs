//! State-graph construction, annotation, and trimming.
//!
//! # Overview
//!
//! [`build::Csn`] owns the count matrix, the derived transition matrix, and
//! the [`petgraph`] directed graph with one node per state. [`trim`] reduces
//! the network to the subnetwork connected to the most-sampled node, and
//! [`records`] exposes the deterministic node/edge listings consumed by
//! export collaborators.

pub mod build;
pub mod records;
pub mod trim;

pub use build::{Csn, StateNode};
pub use records::{EdgeRecord, NodeRecord, edge_records, node_records};
pub use trim::{TrimConfig, TrimmedView};
