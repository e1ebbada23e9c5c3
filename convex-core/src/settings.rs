//! Configuration for the dense KKT solver.

use crate::error::{ConvexError, ConvexResult};

/// Dense KKT solver settings.
///
/// `Default` reads a few environment overrides so that a driver can be tuned
/// without recompiling:
///
/// - `CONVEX_KKT_STATIC_REG` (f64)
/// - `CONVEX_KKT_REFINE_ITERS` (usize)
/// - `CONVEX_KKT_CHECK_INERTIA` (`0`/`false` disables)
/// - `CONVEX_VERBOSE` (`1` enables)
#[derive(Debug, Clone)]
pub struct KktSettings {
    /// Static regularization added to the diagonal of H before factoring.
    /// Refinement always runs against the unregularized system.
    pub static_reg: f64,

    /// Iterative refinement steps after the initial solve
    pub refine_iters: usize,

    /// Relative pivot threshold below which a factorization is declared singular
    pub pivot_tol: f64,

    /// Verify the inertia of the block KKT matrix before solving
    pub check_inertia: bool,

    /// Enable debug logging of residuals and factorization details
    pub verbose: bool,
}

impl Default for KktSettings {
    fn default() -> Self {
        let static_reg = std::env::var("CONVEX_KKT_STATIC_REG")
            .ok()
            .and_then(|s| s.parse::<f64>().ok())
            .unwrap_or(0.0);

        let refine_iters = std::env::var("CONVEX_KKT_REFINE_ITERS")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(2);

        let check_inertia = std::env::var("CONVEX_KKT_CHECK_INERTIA")
            .ok()
            .map(|s| s != "0" && s.to_lowercase() != "false")
            .unwrap_or(true);

        Self {
            static_reg,
            refine_iters,
            pivot_tol: 1e-13,
            check_inertia,
            verbose: std::env::var("CONVEX_VERBOSE")
                .ok()
                .map(|s| s == "1")
                .unwrap_or(false),
        }
    }
}

impl KktSettings {
    /// Check that the numeric settings are usable.
    pub fn validate(&self) -> ConvexResult<()> {
        if !self.static_reg.is_finite() || self.static_reg < 0.0 {
            return Err(ConvexError::InvalidArgument(format!(
                "static_reg must be finite and non-negative, got {}",
                self.static_reg
            )));
        }
        if !self.pivot_tol.is_finite() || self.pivot_tol <= 0.0 {
            return Err(ConvexError::InvalidArgument(format!(
                "pivot_tol must be finite and positive, got {}",
                self.pivot_tol
            )));
        }
        Ok(())
    }
}
