//! Sparse symmetric input.
//!
//! Quadratic terms are often supplied as the upper triangle of a symmetric
//! CSC (Compressed Sparse Column) matrix. The function layer works on dense
//! `nalgebra` matrices, so this module builds such upper triangles and
//! expands them to full dense storage.

use nalgebra::DMatrix;
use sprs::{CsMat, TriMat};

use crate::error::{ConvexError, ConvexResult};

/// Sparse symmetric matrix in CSC format (upper triangle only).
pub type SparseSymmetricCsc = CsMat<f64>;

fn below_diagonal(row: usize, col: usize) -> ConvexError {
    ConvexError::InvalidArgument(format!(
        "entry ({}, {}) lies below the diagonal of an upper-triangle matrix",
        row, col
    ))
}

/// Build an n×n upper triangle from (row, col, value) entries.
///
/// Duplicate entries are summed.
///
/// # Errors
///
/// - [`ConvexError::DimensionMismatch`] if an index is outside n×n
/// - [`ConvexError::InvalidArgument`] for an entry with row > col
pub fn upper_triangle<I>(n: usize, entries: I) -> ConvexResult<SparseSymmetricCsc>
where
    I: IntoIterator<Item = (usize, usize, f64)>,
{
    let mut tri = TriMat::new((n, n));
    for (row, col, val) in entries {
        let last = row.max(col);
        if last >= n {
            return Err(ConvexError::DimensionMismatch { expected: n, actual: last + 1 });
        }
        if row > col {
            return Err(below_diagonal(row, col));
        }
        tri.add_triplet(row, col, val);
    }
    Ok(tri.to_csc())
}

/// Expand an upper-triangle symmetric matrix to full dense storage.
///
/// Off-diagonal entries are mirrored. Any stored entry below the diagonal is
/// rejected, so a full symmetric matrix cannot be mistaken for a triangle.
pub fn symmetric_upper_to_dense(p: &SparseSymmetricCsc) -> ConvexResult<DMatrix<f64>> {
    let mut dense = DMatrix::zeros(p.rows(), p.cols());
    for (&val, (row, col)) in p.iter() {
        if row > col {
            return Err(below_diagonal(row, col));
        }
        dense[(row, col)] += val;
        if row != col {
            dense[(col, row)] += val;
        }
    }
    Ok(dense)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upper_triangle_sums_duplicates() {
        // (0, 1) split in two
        let p = upper_triangle(2, vec![(0, 0, 4.0), (0, 1, 0.25), (0, 1, 0.75), (1, 1, 3.0)]).unwrap();
        assert_eq!(p.rows(), 2);
        assert_eq!(p.cols(), 2);

        let dense = symmetric_upper_to_dense(&p).unwrap();
        assert_eq!(dense, DMatrix::from_row_slice(2, 2, &[4.0, 1.0, 1.0, 3.0]));
    }

    #[test]
    fn test_upper_triangle_rejects_lower_entries() {
        assert!(matches!(
            upper_triangle(2, vec![(0, 0, 1.0), (1, 0, 1.0)]),
            Err(ConvexError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_upper_triangle_rejects_out_of_range() {
        assert!(matches!(
            upper_triangle(2, vec![(0, 2, 1.0)]),
            Err(ConvexError::DimensionMismatch { expected: 2, actual: 3 })
        ));
    }

    #[test]
    fn test_dense_expansion_rejects_full_symmetric() {
        // Both triangles of [[2, 1], [1, 3]] stored
        let mut tri = TriMat::new((2, 2));
        tri.add_triplet(0, 0, 2.0);
        tri.add_triplet(0, 1, 1.0);
        tri.add_triplet(1, 0, 1.0);
        tri.add_triplet(1, 1, 3.0);
        let full: SparseSymmetricCsc = tri.to_csc();

        assert!(matches!(
            symmetric_upper_to_dense(&full),
            Err(ConvexError::InvalidArgument(_))
        ));
    }
}
