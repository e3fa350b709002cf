//! Row-stochastic normalization and symmetrization of count matrices.
//!
//! # Zero-row policy
//!
//! A state that was never observed leaving (row sum 0) keeps an all-zero
//! transition row. It is not renormalized to a uniform distribution and it is
//! not an error; the state simply has no outgoing edges in the graph. This
//! is a deliberate policy, not an oversight.

use nalgebra_sparse::CooMatrix;
use nalgebra_sparse::convert::serial::{convert_coo_dense, convert_dense_coo};

/// Derive the row-stochastic transition matrix from a count matrix.
///
/// Each row is divided by its row sum; rows summing to zero pass through
/// unchanged. Works on a dense copy internally and re-sparsifies the result,
/// so the non-zero support of the output equals that of the input.
#[must_use]
pub fn row_stochastic(counts: &CooMatrix<f64>) -> CooMatrix<f64> {
    let mut dense = convert_coo_dense(counts);
    for i in 0..dense.nrows() {
        let total: f64 = dense.row(i).sum();
        if total > 0.0 {
            let mut row = dense.row_mut(i);
            row /= total;
        }
    }
    convert_dense_coo(&dense)
}

/// Symmetrize a count matrix: `0.5 * (M + Mᵀ)`.
///
/// Mirrors counts across the diagonal, which may introduce non-zero
/// positions where only the transposed entry was populated. The result is
/// symmetric, so applying this twice equals applying it once.
#[must_use]
pub fn symmetrize(counts: &CooMatrix<f64>) -> CooMatrix<f64> {
    let dense = convert_coo_dense(counts);
    let mirrored = (&dense + &dense.transpose()) * 0.5;
    convert_dense_coo(&mirrored)
}

/// Per-state total outgoing counts (row sums), without a dense round-trip.
#[must_use]
pub fn row_totals(counts: &CooMatrix<f64>) -> Vec<f64> {
    let mut totals = vec![0.0; counts.nrows()];
    for (i, _, value) in counts.triplet_iter() {
        totals[i] += *value;
    }
    totals
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
