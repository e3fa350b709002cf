#![forbid(unsafe_code)]
//! Conformational state network (CSN) analysis.
//!
//! A CSN is a directed, weighted graph derived from a square matrix of
//! observed transition counts between discrete states (for example,
//! clustered simulation frames). Counts are normalized into per-state
//! transition probabilities and exposed as a [`petgraph`] graph whose
//! nodes carry caller-supplied attributes.
//!
//! ## Pipeline
//!
//! ```text
//! counts (rows / dense / COO / triplets)
//!        ↓  CountsInput → validated CooMatrix
//! count matrix (optionally symmetrized)
//!        ↓  matrix::row_stochastic()
//! transition matrix (row sums 1.0, or 0.0 for unsampled states)
//!        ↓  Csn::new()
//! state graph (node i ↔ state i, edge weight = transition probability)
//!        ↓  Csn::trim()
//! TrimmedView (subnetwork connected to the most-sampled node)
//! ```
//!
//! ## Conventions
//!
//! - **Errors**: construction and annotation return [`CsnError`]; trimming
//!   never fails — degenerate filters produce empty structures.
//! - **Logging**: `tracing` macros (`debug!`, `trace!`) on the non-trivial
//!   operations.

pub mod error;
pub mod matrix;
pub mod network;

pub use error::CsnError;
pub use matrix::input::CountsInput;
pub use network::build::{Csn, StateNode};
pub use network::records::{EdgeRecord, NodeRecord};
pub use network::trim::{TrimConfig, TrimmedView};
