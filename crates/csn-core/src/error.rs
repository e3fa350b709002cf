//! Error type for CSN construction and annotation.
//!
//! All failures are raised synchronously at the offending call and none are
//! recovered internally: construction either fully succeeds or returns an
//! error before any instance is usable. Trimming has no error path at all —
//! an empty surviving set degrades to empty structures.

use thiserror::Error;

/// Errors raised while building or annotating a conformational state network.
#[derive(Debug, Error)]
pub enum CsnError {
    /// The count matrix is not square.
    #[error("count matrix is not square: {rows}x{cols}")]
    NotSquare {
        /// Number of rows in the offending input.
        rows: usize,
        /// Number of columns in the offending input.
        cols: usize,
    },

    /// Nested-row input where some row has a different length than the first.
    #[error("ragged count rows: row {row} has {got} entries, expected {expected}")]
    RaggedRows {
        /// Index of the first offending row.
        row: usize,
        /// Length of the offending row.
        got: usize,
        /// Length of row 0.
        expected: usize,
    },

    /// The count matrix has zero states; a CSN needs at least one.
    #[error("count matrix is empty")]
    Empty,

    /// Triplet input with a coordinate outside the declared dimension.
    #[error("triplet ({row}, {col}) out of bounds for a {dim}x{dim} count matrix")]
    TripletOutOfBounds {
        /// Row coordinate of the offending triplet.
        row: usize,
        /// Column coordinate of the offending triplet.
        col: usize,
        /// Declared matrix dimension.
        dim: usize,
    },

    /// `add_attr` was called with a value sequence whose length is not the
    /// node count.
    #[error("attribute '{name}' has {got} values, expected {expected} (one per node)")]
    AttributeLength {
        /// Attribute name being attached.
        name: String,
        /// Number of values supplied.
        got: usize,
        /// Node count of the network.
        expected: usize,
    },
}
