//! Error types for function construction and KKT solves.

use thiserror::Error;

/// Errors raised by function constructors and KKT solvers.
///
/// Infeasibility is deliberately absent: a barrier evaluated outside the
/// strict interior returns `+∞` instead of an error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConvexError {
    /// Dimension mismatch between two objects that must agree
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimension
        expected: usize,
        /// Actual dimension
        actual: usize,
    },

    /// A function must have at least one variable
    #[error("Dimension must be nonzero")]
    ZeroDimension,

    /// Matrix required to be symmetric is not
    #[error("Matrix is not symmetric: entries ({row}, {col}) and ({col}, {row}) differ by more than {tolerance:e}")]
    NotSymmetric {
        /// Row of the first offending entry
        row: usize,
        /// Column of the first offending entry
        col: usize,
        /// Tolerance that was exceeded
        tolerance: f64,
    },

    /// Invalid scalar parameter or setting
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// KKT system (or reduced system) is singular to working precision
    #[error("Singular KKT system: {0}")]
    SingularSystem(String),

    /// Hessian not positive definite (on the null space of A, for the block system)
    #[error("Hessian not positive definite: {0}")]
    NotPositiveDefinite(String),
}

/// Result type for convex-core operations.
pub type ConvexResult<T> = Result<T, ConvexError>;
