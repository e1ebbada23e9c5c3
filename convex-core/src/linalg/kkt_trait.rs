//! KKT solver trait for Newton step computation.
//!
//! An interior-point driver needs one linear solve per Newton iteration:
//!
//! ```text
//! [ H  Aᵀ ] [ v ]   [ -g ]
//! [ A  0  ] [ w ] = [ -h ]
//! ```
//!
//! where H is the barrier Hessian, A the equality-constraint Jacobian, g the
//! gradient and h the equality residual. Without equality constraints this
//! reduces to Hv = -g.
//!
//! The trait only fixes inputs and outputs. Implementations may exploit
//! structure in H (diagonal, block-diagonal, sparse); see
//! [`super::dense_kkt::DenseKktSolver`] for the general dense default.

use nalgebra::{DMatrix, DVector};

use crate::error::ConvexResult;

/// Newton step returned by a [`KktSolver`].
#[derive(Debug, Clone, PartialEq)]
pub struct KktSolution {
    /// Primal step Δx
    pub v: DVector<f64>,

    /// Dual step Δν for the equality constraints (None for the unconstrained solve)
    pub w: Option<DVector<f64>>,

    /// Newton decrement squared λ²
    pub lambda_squared: f64,
}

impl KktSolution {
    /// Newton decrement λ = sqrt(λ²), clamped at zero for roundoff.
    pub fn newton_decrement(&self) -> f64 {
        self.lambda_squared.max(0.0).sqrt()
    }
}

/// Trait for KKT system solvers.
///
/// Implementations are stateless with respect to a solve: both methods take
/// `&self` and may be called concurrently.
///
/// # Errors
///
/// - [`crate::ConvexError::DimensionMismatch`] for inconsistent shapes
/// - [`crate::ConvexError::InvalidArgument`] if `at` is not the transpose of `a`
/// - [`crate::ConvexError::SingularSystem`] when the system is singular
/// - [`crate::ConvexError::NotPositiveDefinite`] when H is not positive
///   definite (on the null space of A, for the block system)
///
/// Regularization and retry policy belong to the implementation or the
/// driver, not to this contract.
pub trait KktSolver: Send + Sync {
    /// Solve the block system for (v, w).
    ///
    /// λ² is reported as vᵀHv.
    fn solve(
        &self,
        h: &DMatrix<f64>,
        a: &DMatrix<f64>,
        at: &DMatrix<f64>,
        g: &DVector<f64>,
        r: &DVector<f64>,
    ) -> ConvexResult<KktSolution>;

    /// Solve Hv = -g.
    ///
    /// λ² is reported as -gᵀv and `w` is None.
    fn solve_unconstrained(&self, h: &DMatrix<f64>, g: &DVector<f64>) -> ConvexResult<KktSolution>;
}
