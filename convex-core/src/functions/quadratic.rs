//! Quadratic functions.
//!
//! f(x) = ½ xᵀAx + bᵀx + c
//!
//! # Derivatives
//!
//! - Gradient: ∇f = Ax + b
//! - Hessian: ∇²f = A (constant)
//!
//! With A = 0 this is an affine function, the usual form of a linear
//! inequality constraint aᵢᵀx - bᵢ ≤ 0.

use nalgebra::{DMatrix, DVector};

use super::traits::{assert_dim, DifferentiableFunction};
use crate::error::{ConvexError, ConvexResult};
use crate::linalg::dense::{self, SYMMETRY_TOL};
use crate::linalg::sparse::{self, SparseSymmetricCsc};

/// Quadratic function ½ xᵀAx + bᵀx + c with symmetric A.
#[derive(Debug, Clone, PartialEq)]
pub struct QuadraticFunction {
    a: DMatrix<f64>,
    b: DVector<f64>,
    c: f64,
}

impl QuadraticFunction {
    /// Create a quadratic function from copies of `a` and `b`.
    ///
    /// # Errors
    ///
    /// - [`ConvexError::ZeroDimension`] if `b` is empty
    /// - [`ConvexError::DimensionMismatch`] if `a` is not `len(b) × len(b)`
    /// - [`ConvexError::NotSymmetric`] if `a` is not symmetric within 1e-6
    pub fn new(a: &DMatrix<f64>, b: &DVector<f64>, c: f64) -> ConvexResult<Self> {
        let n = b.len();
        if n < 1 {
            return Err(ConvexError::ZeroDimension);
        }
        if a.nrows() != n {
            return Err(ConvexError::DimensionMismatch { expected: n, actual: a.nrows() });
        }
        dense::check_symmetric(a, SYMMETRY_TOL)?;

        Ok(Self { a: a.clone(), b: b.clone(), c })
    }

    /// Create a quadratic function from row-major nested arrays.
    pub fn from_rows(a: &[Vec<f64>], b: &[f64], c: f64) -> ConvexResult<Self> {
        let a = dense::from_rows(a)?;
        Self::new(&a, &DVector::from_column_slice(b), c)
    }

    /// Create a quadratic function whose A is given as the upper triangle of a
    /// sparse symmetric matrix.
    pub fn from_sparse_upper(p: &SparseSymmetricCsc, b: &[f64], c: f64) -> ConvexResult<Self> {
        if p.rows() != p.cols() {
            return Err(ConvexError::DimensionMismatch { expected: p.rows(), actual: p.cols() });
        }
        let a = sparse::symmetric_upper_to_dense(p)?;
        Self::new(&a, &DVector::from_column_slice(b), c)
    }

    /// Create the affine function bᵀx + c.
    pub fn linear(b: &DVector<f64>, c: f64) -> ConvexResult<Self> {
        let n = b.len();
        Self::new(&DMatrix::zeros(n, n), b, c)
    }

    /// Quadratic term A.
    pub fn a(&self) -> &DMatrix<f64> {
        &self.a
    }

    /// Linear term b.
    pub fn b(&self) -> &DVector<f64> {
        &self.b
    }

    /// Constant term c.
    pub fn c(&self) -> f64 {
        self.c
    }
}

impl DifferentiableFunction for QuadraticFunction {
    fn dim(&self) -> usize {
        self.b.len()
    }

    fn value(&self, x: &DVector<f64>) -> f64 {
        assert_dim(x, self.dim());
        0.5 * (&self.a * x).dot(x) + self.b.dot(x) + self.c
    }

    fn gradient(&self, x: &DVector<f64>) -> DVector<f64> {
        assert_dim(x, self.dim());
        &self.a * x + &self.b
    }

    fn hessian(&self, x: &DVector<f64>) -> DMatrix<f64> {
        assert_dim(x, self.dim());
        self.a.clone()
    }
}
