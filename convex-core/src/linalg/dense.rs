//! Dense matrix helpers shared by the function and KKT layers.

use nalgebra::{DMatrix, DVector};

use crate::error::{ConvexError, ConvexResult};

/// Tolerance used when checking that a user-supplied matrix is symmetric.
pub const SYMMETRY_TOL: f64 = 1e-6;

/// Check that `m` is square and symmetric within `tol`.
///
/// Entry pairs are compared with a mixed absolute/relative test:
/// `|m[i,j] - m[j,i]| <= tol * max(1, |m[i,j]|, |m[j,i]|)`.
/// Returns the first offending (row, col) pair in the upper triangle.
pub fn check_symmetric(m: &DMatrix<f64>, tol: f64) -> ConvexResult<()> {
    check_square(m)?;
    let n = m.nrows();
    for i in 0..n {
        for j in (i + 1)..n {
            let a = m[(i, j)];
            let b = m[(j, i)];
            let scale = a.abs().max(b.abs()).max(1.0);
            let diff = (a - b).abs();
            // NaN entries are reported as asymmetric
            if diff.is_nan() || diff > tol * scale {
                return Err(ConvexError::NotSymmetric { row: i, col: j, tolerance: tol });
            }
        }
    }
    Ok(())
}

/// Check that `m` is square.
pub fn check_square(m: &DMatrix<f64>) -> ConvexResult<()> {
    if m.nrows() != m.ncols() {
        return Err(ConvexError::DimensionMismatch {
            expected: m.nrows(),
            actual: m.ncols(),
        });
    }
    Ok(())
}

/// Check that `at` is the transpose of `a` within `tol`, using the same
/// mixed absolute/relative test as [`check_symmetric`].
///
/// Shapes must already agree (`at` is `a.ncols() × a.nrows()`).
pub fn check_transpose(a: &DMatrix<f64>, at: &DMatrix<f64>, tol: f64) -> ConvexResult<()> {
    for i in 0..a.nrows() {
        for j in 0..a.ncols() {
            let x = a[(i, j)];
            let y = at[(j, i)];
            let diff = (x - y).abs();
            if diff.is_nan() || diff > tol * x.abs().max(y.abs()).max(1.0) {
                return Err(ConvexError::InvalidArgument(format!(
                    "Aᵀ[{}, {}] = {} does not match A[{}, {}] = {}",
                    j, i, y, i, j, x
                )));
            }
        }
    }
    Ok(())
}

/// Check that a matrix has the expected shape (rows first, then columns).
pub fn check_shape(m: &DMatrix<f64>, rows: usize, cols: usize) -> ConvexResult<()> {
    if m.nrows() != rows {
        return Err(ConvexError::DimensionMismatch { expected: rows, actual: m.nrows() });
    }
    if m.ncols() != cols {
        return Err(ConvexError::DimensionMismatch { expected: cols, actual: m.ncols() });
    }
    Ok(())
}

/// Build a dense matrix from nested rows, rejecting ragged input.
pub fn from_rows(rows: &[Vec<f64>]) -> ConvexResult<DMatrix<f64>> {
    let nrows = rows.len();
    let ncols = rows.first().map_or(0, |r| r.len());
    for row in rows {
        if row.len() != ncols {
            return Err(ConvexError::DimensionMismatch { expected: ncols, actual: row.len() });
        }
    }
    Ok(DMatrix::from_fn(nrows, ncols, |i, j| rows[i][j]))
}

/// Euclidean norm of `lhs * x - rhs`.
pub fn residual_norm(lhs: &DMatrix<f64>, x: &DVector<f64>, rhs: &DVector<f64>) -> f64 {
    (lhs * x - rhs).norm()
}
