//! Count-matrix ingestion and normalization.
//!
//! # Overview
//!
//! The CSN pipeline treats the sparse matrix as an external capability:
//! [`nalgebra_sparse::CooMatrix`] supplies the coordinate representation and
//! `nalgebra` dense matrices back the working copies used during
//! normalization and trimming. This module adds the two pieces the pipeline
//! needs on top:
//!
//! - [`input::CountsInput`] — the closed set of accepted count
//!   representations (nested rows, dense matrix, COO matrix, raw triplets),
//!   each with a validated conversion into a square COO matrix.
//! - [`normalize`] — pure functions deriving the row-stochastic transition
//!   matrix and the symmetrized count matrix.
//!
//! Dense intermediates make the memory cost of normalization O(N²) even for
//! sparse inputs; the trade is accepted for the matrix sizes this crate
//! targets.

pub mod input;
pub mod normalize;

pub use normalize::{row_stochastic, row_totals, symmetrize};
