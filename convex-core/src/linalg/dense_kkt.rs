//! Dense KKT solver.
//!
//! General-purpose [`KktSolver`] that makes no structural assumptions about H.
//!
//! Reduced system (no equality constraints):
//! ```text
//! (H + εI) v = -g          Cholesky
//! ```
//!
//! Block system (p equality constraints):
//! ```text
//! [ H + εI   Aᵀ  ] [ v ]   [ -g ]
//! [ A       -εI  ] [ w ] = [ -h ]      partial-pivot LU
//! ```
//!
//! ε is the static regularization from [`KktSettings`] (zero by default).
//! Iterative refinement is always performed against the unregularized system,
//! so a small ε only affects conditioning, not the converged answer.
//!
//! Before the LU, the inertia of the block matrix is checked with a
//! symmetric eigendecomposition. The KKT matrix has inertia (n, p, 0) exactly
//! when A has full row rank and H is positive definite on null(A), which is
//! the condition for the Newton step to be a descent direction.

use nalgebra::{Cholesky, DMatrix, DVector, SymmetricEigen};

use super::dense;
use super::kkt_trait::{KktSolution, KktSolver};
use crate::error::{ConvexError, ConvexResult};
use crate::settings::KktSettings;

/// Dense Cholesky/LU KKT solver.
#[derive(Debug, Clone, Default)]
pub struct DenseKktSolver {
    settings: KktSettings,
}

impl DenseKktSolver {
    /// Create a solver with the given settings.
    pub fn new(settings: KktSettings) -> Self {
        Self { settings }
    }

    /// Active settings.
    pub fn settings(&self) -> &KktSettings {
        &self.settings
    }

    /// Assemble the (n+p)×(n+p) block matrix, with `reg` added to the
    /// (1,1) block diagonal and subtracted from the (2,2) block diagonal.
    fn assemble(h: &DMatrix<f64>, a: &DMatrix<f64>, at: &DMatrix<f64>, reg: f64) -> DMatrix<f64> {
        let n = h.nrows();
        let p = a.nrows();
        let mut kkt = DMatrix::zeros(n + p, n + p);
        kkt.view_mut((0, 0), (n, n)).copy_from(h);
        kkt.view_mut((0, n), (n, p)).copy_from(at);
        kkt.view_mut((n, 0), (p, n)).copy_from(a);

        if reg > 0.0 {
            for i in 0..n {
                kkt[(i, i)] += reg;
            }
            for i in n..(n + p) {
                kkt[(i, i)] -= reg;
            }
        }
        kkt
    }

    /// Verify that `kkt` has inertia (n, p, 0).
    fn check_inertia(&self, kkt: &DMatrix<f64>, n: usize, p: usize) -> ConvexResult<()> {
        let eig = SymmetricEigen::new(kkt.clone());
        let scale = eig.eigenvalues.amax();
        let tol = self.settings.pivot_tol * scale;

        let mut pos = 0usize;
        let mut neg = 0usize;
        let mut zero = 0usize;
        for &lambda in eig.eigenvalues.iter() {
            if lambda.is_nan() || lambda.abs() <= tol {
                zero += 1;
            } else if lambda > 0.0 {
                pos += 1;
            } else {
                neg += 1;
            }
        }

        if zero > 0 {
            log::warn!("KKT matrix has {} near-zero eigenvalues (scale {:.3e})", zero, scale);
            return Err(ConvexError::SingularSystem(format!(
                "{} of {} eigenvalues below {:.3e}",
                zero,
                n + p,
                tol
            )));
        }
        if pos != n || neg != p {
            log::warn!("KKT inertia ({}, {}, 0), expected ({}, {}, 0)", pos, neg, n, p);
            return Err(ConvexError::NotPositiveDefinite(format!(
                "KKT inertia is ({}, {}, 0), expected ({}, {}, 0)",
                pos, neg, n, p
            )));
        }
        Ok(())
    }

    /// Iterative refinement: x += solve(rhs - lhs·x), `refine_iters` times.
    fn refine<F>(&self, lhs: &DMatrix<f64>, rhs: &DVector<f64>, x: &mut DVector<f64>, solve: F)
    where
        F: Fn(&DVector<f64>) -> Option<DVector<f64>>,
    {
        for _ in 0..self.settings.refine_iters {
            let resid = rhs - lhs * &*x;
            if resid.norm() == 0.0 {
                break;
            }
            match solve(&resid) {
                Some(dx) => *x += dx,
                None => break,
            }
        }
    }
}

impl KktSolver for DenseKktSolver {
    fn solve(
        &self,
        h: &DMatrix<f64>,
        a: &DMatrix<f64>,
        at: &DMatrix<f64>,
        g: &DVector<f64>,
        r: &DVector<f64>,
    ) -> ConvexResult<KktSolution> {
        self.settings.validate()?;

        let n = g.len();
        let p = r.len();
        if n == 0 {
            return Err(ConvexError::ZeroDimension);
        }
        dense::check_shape(h, n, n)?;
        dense::check_shape(a, p, n)?;
        dense::check_shape(at, n, p)?;
        // The inertia check reads A, the LU reads Aᵀ
        dense::check_transpose(a, at, dense::SYMMETRY_TOL)?;

        let kkt = Self::assemble(h, a, at, 0.0);
        let kkt_reg = Self::assemble(h, a, at, self.settings.static_reg);

        if self.settings.check_inertia {
            self.check_inertia(&kkt_reg, n, p)?;
        }

        let dim = n + p;
        let lu = kkt_reg.lu();

        let u_diag = lu.u().diagonal();
        let max_pivot = u_diag.amax();
        let min_pivot = u_diag.amin();
        if min_pivot.is_nan() || min_pivot <= self.settings.pivot_tol * max_pivot {
            log::warn!(
                "KKT LU factorization failed: min pivot {:.3e}, max pivot {:.3e}",
                min_pivot,
                max_pivot
            );
            return Err(ConvexError::SingularSystem(format!(
                "LU pivot {:.3e} below {:.3e} relative to {:.3e}",
                min_pivot, self.settings.pivot_tol, max_pivot
            )));
        }

        let rhs = DVector::from_iterator(dim, g.iter().chain(r.iter()).map(|x| -x));
        let mut sol = lu
            .solve(&rhs)
            .ok_or_else(|| ConvexError::SingularSystem("LU solve failed".to_string()))?;
        self.refine(&kkt, &rhs, &mut sol, |res| lu.solve(res));

        if self.settings.verbose {
            log::debug!(
                "block KKT solve: n={}, p={}, static_reg={:.1e}, residual={:.3e}",
                n,
                p,
                self.settings.static_reg,
                dense::residual_norm(&kkt, &sol, &rhs)
            );
        }

        let v = sol.rows(0, n).into_owned();
        let w = sol.rows(n, p).into_owned();
        let lambda_squared = v.dot(&(h * &v));

        Ok(KktSolution { v, w: Some(w), lambda_squared })
    }

    fn solve_unconstrained(&self, h: &DMatrix<f64>, g: &DVector<f64>) -> ConvexResult<KktSolution> {
        self.settings.validate()?;

        let n = g.len();
        if n == 0 {
            return Err(ConvexError::ZeroDimension);
        }
        dense::check_shape(h, n, n)?;

        let mut h_reg = h.clone();
        for i in 0..n {
            h_reg[(i, i)] += self.settings.static_reg;
        }

        let chol = Cholesky::new(h_reg).ok_or_else(|| {
            log::warn!("Cholesky factorization of {}x{} Hessian failed", n, n);
            ConvexError::NotPositiveDefinite(format!("Cholesky factorization of {}x{} Hessian failed", n, n))
        })?;

        let rhs = -g;
        let mut v = chol.solve(&rhs);
        self.refine(h, &rhs, &mut v, |res| Some(chol.solve(res)));

        let lambda_squared = -g.dot(&v);

        if self.settings.verbose {
            log::debug!(
                "reduced KKT solve: n={}, static_reg={:.1e}, residual={:.3e}, lambda^2={:.3e}",
                n,
                self.settings.static_reg,
                dense::residual_norm(h, &v, &rhs),
                lambda_squared
            );
        }

        Ok(KktSolution { v, w: None, lambda_squared })
    }
}
