//! Accepted count-matrix input representations.
//!
//! # Closed conversion set
//!
//! A [`Csn`](crate::Csn) can be built from any of:
//!
//! - nested rows (`Vec<Vec<f64>>`), row-major;
//! - a dense [`DMatrix<f64>`];
//! - a sparse [`CooMatrix<f64>`] in coordinate form;
//! - raw `(row, col, value)` triplets with a declared dimension.
//!
//! Each representation has one documented conversion rule into a square COO
//! matrix, and each conversion validates shape up front: ragged rows,
//! non-square shapes, empty matrices, and out-of-bounds triplet coordinates
//! are construction errors. There is no duck-typed fallback — anything not
//! in this set does not convert.

use nalgebra::DMatrix;
use nalgebra_sparse::CooMatrix;
use nalgebra_sparse::convert::serial::convert_dense_coo;

use crate::error::CsnError;

// ---------------------------------------------------------------------------
// CountsInput
// ---------------------------------------------------------------------------

/// A count matrix in one of the recognized source representations.
///
/// Obtained via `From` impls (or [`CountsInput::triplets`]) and consumed by
/// [`Csn::new`](crate::Csn::new). Conversion to COO form is deferred until
/// construction so that all shape validation happens in one place.
#[derive(Debug, Clone)]
pub enum CountsInput {
    /// Row-major nested rows; every row must have the same length.
    Rows(Vec<Vec<f64>>),
    /// A dense matrix, converted by enumerating its non-zero entries.
    Dense(DMatrix<f64>),
    /// An already-sparse coordinate matrix, passed through after shape checks.
    Coo(CooMatrix<f64>),
    /// Raw coordinate triplets for a `dim`×`dim` matrix.
    Triplets {
        /// Declared square dimension.
        dim: usize,
        /// `(row, col, value)` entries; duplicates are summed.
        entries: Vec<(usize, usize, f64)>,
    },
}

impl CountsInput {
    /// Build a triplet input for a `dim`×`dim` matrix.
    #[must_use]
    pub const fn triplets(dim: usize, entries: Vec<(usize, usize, f64)>) -> Self {
        Self::Triplets { dim, entries }
    }

    /// Convert into a validated square COO matrix.
    ///
    /// # Errors
    ///
    /// - [`CsnError::RaggedRows`] if nested rows differ in length.
    /// - [`CsnError::NotSquare`] if the shape is rectangular.
    /// - [`CsnError::Empty`] if the matrix has zero states.
    /// - [`CsnError::TripletOutOfBounds`] if a triplet coordinate is outside
    ///   the declared dimension.
    pub fn into_coo(self) -> Result<CooMatrix<f64>, CsnError> {
        match self {
            Self::Rows(rows) => rows_to_coo(&rows),
            Self::Dense(dense) => {
                check_square(dense.nrows(), dense.ncols())?;
                Ok(convert_dense_coo(&dense))
            }
            Self::Coo(coo) => {
                check_square(coo.nrows(), coo.ncols())?;
                Ok(coo)
            }
            Self::Triplets { dim, entries } => triplets_to_coo(dim, &entries),
        }
    }
}

impl From<Vec<Vec<f64>>> for CountsInput {
    fn from(rows: Vec<Vec<f64>>) -> Self {
        Self::Rows(rows)
    }
}

impl From<DMatrix<f64>> for CountsInput {
    fn from(dense: DMatrix<f64>) -> Self {
        Self::Dense(dense)
    }
}

impl From<CooMatrix<f64>> for CountsInput {
    fn from(coo: CooMatrix<f64>) -> Self {
        Self::Coo(coo)
    }
}

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

fn check_square(rows: usize, cols: usize) -> Result<(), CsnError> {
    if rows != cols {
        return Err(CsnError::NotSquare { rows, cols });
    }
    if rows == 0 {
        return Err(CsnError::Empty);
    }
    Ok(())
}

fn rows_to_coo(rows: &[Vec<f64>]) -> Result<CooMatrix<f64>, CsnError> {
    let Some(first) = rows.first() else {
        return Err(CsnError::Empty);
    };
    let expected = first.len();
    for (row, values) in rows.iter().enumerate() {
        if values.len() != expected {
            return Err(CsnError::RaggedRows {
                row,
                got: values.len(),
                expected,
            });
        }
    }
    check_square(rows.len(), expected)?;

    let n = rows.len();
    let mut coo = CooMatrix::new(n, n);
    for (i, values) in rows.iter().enumerate() {
        for (j, &value) in values.iter().enumerate() {
            if value != 0.0 {
                coo.push(i, j, value);
            }
        }
    }
    Ok(coo)
}

fn triplets_to_coo(dim: usize, entries: &[(usize, usize, f64)]) -> Result<CooMatrix<f64>, CsnError> {
    if dim == 0 {
        return Err(CsnError::Empty);
    }
    let mut coo = CooMatrix::new(dim, dim);
    for &(row, col, value) in entries {
        if row >= dim || col >= dim {
            return Err(CsnError::TripletOutOfBounds { row, col, dim });
        }
        coo.push(row, col, value);
    }
    Ok(coo)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
