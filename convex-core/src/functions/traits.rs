//! Twice-differentiable function trait definition.
//!
//! Every objective and constraint handed to the barrier layer implements this
//! trait. The barrier composition itself implements it as well, so an
//! external Newton driver sees a single interface.

use std::sync::Arc;

use nalgebra::{DMatrix, DVector};

/// Core twice-differentiable function interface.
///
/// # Contract
///
/// - `value`, `gradient` and `hessian` are pure: calling them at the same `x`
///   in any order yields identical results.
/// - `x.len()` must equal `dim()`. Passing a vector of a different length is
///   a caller bug and panics.
/// - `gradient` is ∇`value` and `hessian` is ∇²`value`. This is not checked at
///   runtime; see [`crate::util::numerics::check_derivatives`] for a
///   finite-difference verifier.
/// - `hessian` returns a freshly allocated symmetric matrix that the caller
///   owns.
pub trait DifferentiableFunction: Send + Sync {
    /// Number of variables n.
    fn dim(&self) -> usize;

    /// Evaluate f(x).
    fn value(&self, x: &DVector<f64>) -> f64;

    /// Evaluate ∇f(x), a vector of length n.
    fn gradient(&self, x: &DVector<f64>) -> DVector<f64>;

    /// Evaluate ∇²f(x), an n×n symmetric matrix.
    fn hessian(&self, x: &DVector<f64>) -> DMatrix<f64>;

    /// Evaluate f at a raw slice of length n.
    fn value_slice(&self, x: &[f64]) -> f64 {
        self.value(&DVector::from_column_slice(x))
    }

    /// Evaluate ∇f at a raw slice of length n.
    fn gradient_slice(&self, x: &[f64]) -> DVector<f64> {
        self.gradient(&DVector::from_column_slice(x))
    }

    /// Evaluate ∇²f at a raw slice of length n.
    fn hessian_slice(&self, x: &[f64]) -> DMatrix<f64> {
        self.hessian(&DVector::from_column_slice(x))
    }
}

/// Shared handle to a function, as stored by composite functions.
pub type SharedFunction = Arc<dyn DifferentiableFunction>;

/// Panic with a uniform message when `x` has the wrong length.
#[inline]
pub(crate) fn assert_dim(x: &DVector<f64>, n: usize) {
    assert_eq!(x.len(), n, "input has length {}, function dimension is {}", x.len(), n);
}
