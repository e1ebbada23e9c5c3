//! Logarithmic barrier composition.
//!
//! Folds the inequality constraints fᵢ(x) < 0 into an unconstrained objective:
//!
//! φ(x) = t·f₀(x) − ∑ᵢ log(−fᵢ(x))
//!
//! # Derivatives
//!
//! - Gradient: ∇φ = t·∇f₀ + ∑ᵢ (−1/fᵢ)·∇fᵢ
//! - Hessian: ∇²φ = t·∇²f₀ + ∑ᵢ [∇fᵢ∇fᵢᵀ / fᵢ² − ∇²fᵢ / fᵢ]
//!
//! # Domain
//!
//! φ is only defined on the strict interior {x : fᵢ(x) < 0 ∀i}. `value`
//! returns +∞ outside it so that a line search rejects the step. `gradient`
//! and `hessian` are not guarded: evaluating them outside the interior
//! propagates IEEE infinities/NaNs.

use nalgebra::{DMatrix, DVector};

use super::traits::{assert_dim, SharedFunction, DifferentiableFunction};
use crate::error::{ConvexError, ConvexResult};

/// Barrier-penalized objective t·f₀(x) − ∑ log(−fᵢ(x)).
///
/// The constraint list is copied at construction; the functions themselves
/// are immutable shared handles. A new instance is built for every barrier
/// weight (see [`LogBarrierFunction::with_weight`]).
#[derive(Clone)]
pub struct LogBarrierFunction {
    t: f64,
    f0: SharedFunction,
    constraints: Vec<SharedFunction>,
    n: usize,
}

impl LogBarrierFunction {
    /// Compose `objective` with `constraints` at barrier weight `t`.
    ///
    /// Accepts any ordered sequence of constraints (array, `Vec`, iterator).
    ///
    /// # Errors
    ///
    /// - [`ConvexError::InvalidArgument`] if `t` is negative or not finite
    /// - [`ConvexError::DimensionMismatch`] for the first constraint whose
    ///   dimension differs from the objective's
    pub fn new<I>(t: f64, objective: SharedFunction, constraints: I) -> ConvexResult<Self>
    where
        I: IntoIterator<Item = SharedFunction>,
    {
        Self::check_weight(t)?;

        let n = objective.dim();
        let constraints: Vec<SharedFunction> = constraints.into_iter().collect();
        for fi in &constraints {
            if fi.dim() != n {
                return Err(ConvexError::DimensionMismatch { expected: n, actual: fi.dim() });
            }
        }

        Ok(Self { t, f0: objective, constraints, n })
    }

    /// Same objective and constraints at a new barrier weight.
    pub fn with_weight(&self, t: f64) -> ConvexResult<Self> {
        Self::check_weight(t)?;
        Ok(Self {
            t,
            f0: self.f0.clone(),
            constraints: self.constraints.clone(),
            n: self.n,
        })
    }

    fn check_weight(t: f64) -> ConvexResult<()> {
        // t = 0 is the pure barrier (analytic center)
        if !t.is_finite() || t < 0.0 {
            return Err(ConvexError::InvalidArgument(format!(
                "barrier weight must be finite and non-negative, got {}",
                t
            )));
        }
        Ok(())
    }

    /// Barrier weight t.
    pub fn weight(&self) -> f64 {
        self.t
    }

    /// Wrapped objective f₀.
    pub fn objective(&self) -> &SharedFunction {
        &self.f0
    }

    /// Constraint functions fᵢ, in construction order.
    pub fn constraints(&self) -> &[SharedFunction] {
        &self.constraints
    }

    /// Number of inequality constraints m.
    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// True if every constraint is strictly satisfied at `x`.
    pub fn is_strictly_feasible(&self, x: &DVector<f64>) -> bool {
        assert_dim(x, self.n);
        self.constraints.iter().all(|fi| fi.value(x) < 0.0)
    }

    /// Upper bound m/t on f₀(x*(t)) − p* for the exact minimizer x*(t) of the barrier.
    pub fn duality_gap_bound(&self) -> f64 {
        let m = self.constraints.len() as f64;
        if m == 0.0 {
            0.0
        } else {
            m / self.t
        }
    }
}

impl DifferentiableFunction for LogBarrierFunction {
    fn dim(&self) -> usize {
        self.n
    }

    fn value(&self, x: &DVector<f64>) -> f64 {
        assert_dim(x, self.n);

        let mut v = self.t * self.f0.value(x);
        for (i, fi) in self.constraints.iter().enumerate() {
            let ti = fi.value(x);
            // NaN is treated as a violation
            if ti.is_nan() || ti >= 0.0 {
                log::trace!("barrier domain violated by constraint {}: f_i(x) = {:e}", i, ti);
                return f64::INFINITY;
            }
            v -= (-ti).ln();
        }
        v
    }

    fn gradient(&self, x: &DVector<f64>) -> DVector<f64> {
        assert_dim(x, self.n);

        let mut g = self.f0.gradient(x) * self.t;
        for fi in &self.constraints {
            let zi = -1.0 / fi.value(x);
            g.axpy(zi, &fi.gradient(x), 1.0);
        }
        g
    }

    fn hessian(&self, x: &DVector<f64>) -> DMatrix<f64> {
        assert_dim(x, self.n);

        let n = self.n;
        let mut h = self.f0.hessian(x) * self.t;
        for fi in &self.constraints {
            let vi = fi.value(x);
            let gi = fi.gradient(x);
            let hi = fi.hessian(x);
            let vi2 = vi * vi;
            for k in 0..n {
                for j in 0..n {
                    h[(j, k)] += gi[j] * gi[k] / vi2 - hi[(j, k)] / vi;
                }
            }
        }
        h
    }
}

impl std::fmt::Debug for LogBarrierFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogBarrierFunction")
            .field("t", &self.t)
            .field("dim", &self.n)
            .field("num_constraints", &self.constraints.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functions::QuadraticFunction;
    use std::sync::Arc;

    /// f0(x) = 0.5 ||x||², f1(x) = x1 - 1
    fn example_barrier(t: f64) -> LogBarrierFunction {
        let f0: SharedFunction = Arc::new(
            QuadraticFunction::new(&DMatrix::identity(2, 2), &DVector::zeros(2), 0.0).unwrap(),
        );
        let f1: SharedFunction = Arc::new(
            QuadraticFunction::linear(&DVector::from_vec(vec![1.0, 0.0]), -1.0).unwrap(),
        );
        LogBarrierFunction::new(t, f0, vec![f1]).unwrap()
    }

    #[test]
    fn test_barrier_value_at_origin() {
        let phi = example_barrier(1.0);
        // 0.5 * 0 - log(1) = 0
        assert_eq!(phi.value_slice(&[0.0, 0.0]), 0.0);
    }

    #[test]
    fn test_barrier_value_formula() {
        let phi = example_barrier(3.0);
        // f0 = 0.5 * (0.25 + 1) = 0.625, f1 = -0.5
        let expected = 3.0 * 0.625 - 0.5f64.ln();
        assert!((phi.value_slice(&[0.5, 1.0]) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_barrier_gradient_at_origin() {
        let phi = example_barrier(1.0);
        // ∇f0(0) = (0, 0), so only the barrier term remains: (-1/(0-1))·(1, 0) = (1, 0)
        let g = phi.gradient_slice(&[0.0, 0.0]);
        assert_eq!(g, DVector::from_vec(vec![1.0, 0.0]));
    }

    #[test]
    fn test_barrier_gradient_with_linear_objective_term() {
        // f0(x) = 0.5||x||² + x1 has ∇f0(0) = (1, 0) and f0(0) = 0
        let f0: SharedFunction = Arc::new(
            QuadraticFunction::new(&DMatrix::identity(2, 2), &DVector::from_vec(vec![1.0, 0.0]), 0.0)
                .unwrap(),
        );
        let f1: SharedFunction = Arc::new(
            QuadraticFunction::linear(&DVector::from_vec(vec![1.0, 0.0]), -1.0).unwrap(),
        );
        let phi = LogBarrierFunction::new(1.0, f0, [f1]).unwrap();

        assert_eq!(phi.value_slice(&[0.0, 0.0]), 0.0);
        // (1, 0)·1 + (1, 0) = (2, 0)
        assert_eq!(phi.gradient_slice(&[0.0, 0.0]), DVector::from_vec(vec![2.0, 0.0]));
    }

    #[test]
    fn test_barrier_gradient_off_origin() {
        let phi = example_barrier(1.0);
        // t·x + (-1/(-2))·(1, 0) = (-0.5, 2)
        let g = phi.gradient_slice(&[-1.0, 2.0]);
        assert!((g[0] - (-0.5)).abs() < 1e-12);
        assert!((g[1] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_barrier_hessian_rank_one_term() {
        let phi = example_barrier(2.0);
        // f1 = -1 at origin, ∇f1 = (1, 0), ∇²f1 = 0
        // H = 2·I + (1, 0)(1, 0)ᵀ / 1 = [[3, 0], [0, 2]]
        let h = phi.hessian_slice(&[0.0, 0.0]);
        assert_eq!(h, DMatrix::from_row_slice(2, 2, &[3.0, 0.0, 0.0, 2.0]));
    }

    #[test]
    fn test_barrier_infeasible_is_infinite() {
        let phi = example_barrier(1.0);
        assert_eq!(phi.value_slice(&[1.0, 0.0]), f64::INFINITY);
        assert_eq!(phi.value_slice(&[2.0, 0.0]), f64::INFINITY);
        assert!(!phi.is_strictly_feasible(&DVector::from_vec(vec![1.0, 0.0])));
        assert!(phi.is_strictly_feasible(&DVector::from_vec(vec![0.99, 0.0])));
    }

    #[test]
    fn test_barrier_dimension_mismatch() {
        let f0: SharedFunction = Arc::new(
            QuadraticFunction::linear(&DVector::from_vec(vec![1.0, 1.0]), 0.0).unwrap(),
        );
        let f1: SharedFunction = Arc::new(
            QuadraticFunction::linear(&DVector::from_vec(vec![1.0, 1.0, 1.0]), 0.0).unwrap(),
        );
        let result = LogBarrierFunction::new(1.0, f0, vec![f1]);
        assert!(matches!(
            result,
            Err(ConvexError::DimensionMismatch { expected: 2, actual: 3 })
        ));
    }

    #[test]
    fn test_barrier_rejects_bad_weight() {
        let phi = example_barrier(1.0);
        assert!(matches!(phi.with_weight(-1.0), Err(ConvexError::InvalidArgument(_))));
        assert!(matches!(phi.with_weight(f64::NAN), Err(ConvexError::InvalidArgument(_))));
        assert!(matches!(phi.with_weight(f64::INFINITY), Err(ConvexError::InvalidArgument(_))));
        assert!(phi.with_weight(0.0).is_ok());
    }

    #[test]
    fn test_with_weight_shares_functions() {
        let phi = example_barrier(1.0);
        let phi10 = phi.with_weight(10.0).unwrap();
        assert_eq!(phi10.weight(), 10.0);
        assert_eq!(phi10.num_constraints(), 1);
        assert!(Arc::ptr_eq(phi.objective(), phi10.objective()));
        assert!((phi10.duality_gap_bound() - 0.1).abs() < 1e-15);
    }

    #[test]
    fn test_no_constraints_scales_objective() {
        let f0: SharedFunction = Arc::new(
            QuadraticFunction::new(&DMatrix::identity(2, 2), &DVector::zeros(2), 1.0).unwrap(),
        );
        let phi = LogBarrierFunction::new(4.0, f0, Vec::new()).unwrap();
        assert_eq!(phi.value_slice(&[1.0, 1.0]), 8.0);
        assert_eq!(phi.duality_gap_bound(), 0.0);
    }
}
