//! Finite-difference derivative checks.
//!
//! The [`DifferentiableFunction`] contract requires gradient = ∇value and
//! hessian = ∇²value but nothing enforces it. These helpers compare the
//! analytic derivatives against central differences:
//!
//! - ∂f/∂xⱼ ≈ (f(x + hⱼeⱼ) − f(x − hⱼeⱼ)) / 2hⱼ
//! - ∇²f eⱼ ≈ (∇f(x + hⱼeⱼ) − ∇f(x − hⱼeⱼ)) / 2hⱼ
//!
//! with hⱼ = 1e-6 · max(|xⱼ|, 1).

use nalgebra::{DMatrix, DVector};

use crate::functions::DifferentiableFunction;

const FD_STEP: f64 = 1e-6;

#[inline]
fn step(xj: f64) -> f64 {
    FD_STEP * xj.abs().max(1.0)
}

/// Central-difference approximation of ∇f(x) from `value`.
pub fn finite_difference_gradient<F>(f: &F, x: &DVector<f64>) -> DVector<f64>
where
    F: DifferentiableFunction + ?Sized,
{
    let n = x.len();
    let mut grad = DVector::zeros(n);
    let mut x_pert = x.clone();

    for j in 0..n {
        let h = step(x[j]);

        x_pert[j] = x[j] + h;
        let f_plus = f.value(&x_pert);
        x_pert[j] = x[j] - h;
        let f_minus = f.value(&x_pert);
        x_pert[j] = x[j];

        grad[j] = (f_plus - f_minus) / (2.0 * h);
    }
    grad
}

/// Central-difference approximation of ∇²f(x) from `gradient`, symmetrized.
pub fn finite_difference_hessian<F>(f: &F, x: &DVector<f64>) -> DMatrix<f64>
where
    F: DifferentiableFunction + ?Sized,
{
    let n = x.len();
    let mut hess = DMatrix::zeros(n, n);
    let mut x_pert = x.clone();

    for j in 0..n {
        let h = step(x[j]);

        x_pert[j] = x[j] + h;
        let g_plus = f.gradient(&x_pert);
        x_pert[j] = x[j] - h;
        let g_minus = f.gradient(&x_pert);
        x_pert[j] = x[j];

        hess.set_column(j, &((g_plus - g_minus) / (2.0 * h)));
    }

    (&hess + hess.transpose()) * 0.5
}

/// Largest mixed absolute/relative discrepancy found by [`check_derivatives`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivativeCheck {
    /// max |gᵢ − g̃ᵢ| / max(1, |gᵢ|)
    pub gradient_error: f64,
    /// max |Hᵢⱼ − H̃ᵢⱼ| / max(1, |Hᵢⱼ|)
    pub hessian_error: f64,
}

impl DerivativeCheck {
    /// True if both errors are finite and within `tol`.
    pub fn passes(&self, tol: f64) -> bool {
        self.gradient_error <= tol && self.hessian_error <= tol
    }
}

fn max_rel_error<'a, I>(pairs: I) -> f64
where
    I: Iterator<Item = (&'a f64, &'a f64)>,
{
    pairs
        .map(|(&exact, &approx)| {
            let err = (exact - approx).abs() / exact.abs().max(1.0);
            // NaN must not be swallowed by f64::max
            if err.is_nan() { f64::INFINITY } else { err }
        })
        .fold(0.0, f64::max)
}

/// Compare the analytic gradient and Hessian of `f` at `x` with central differences.
pub fn check_derivatives<F>(f: &F, x: &DVector<f64>) -> DerivativeCheck
where
    F: DifferentiableFunction + ?Sized,
{
    let grad = f.gradient(x);
    let grad_fd = finite_difference_gradient(f, x);
    let hess = f.hessian(x);
    let hess_fd = finite_difference_hessian(f, x);

    DerivativeCheck {
        gradient_error: max_rel_error(grad.iter().zip(grad_fd.iter())),
        hessian_error: max_rel_error(hess.iter().zip(hess_fd.iter())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// f(x) = x0⁴ + x0·x1, deliberately paired with a wrong Hessian.
    struct QuarticWithBadHessian;

    impl DifferentiableFunction for QuarticWithBadHessian {
        fn dim(&self) -> usize {
            2
        }

        fn value(&self, x: &DVector<f64>) -> f64 {
            x[0].powi(4) + x[0] * x[1]
        }

        fn gradient(&self, x: &DVector<f64>) -> DVector<f64> {
            DVector::from_vec(vec![4.0 * x[0].powi(3) + x[1], x[0]])
        }

        fn hessian(&self, _x: &DVector<f64>) -> DMatrix<f64> {
            DMatrix::identity(2, 2)
        }
    }

    #[test]
    fn test_fd_gradient_matches_analytic() {
        let f = QuarticWithBadHessian;
        let x = DVector::from_vec(vec![1.5, -2.0]);
        let g_fd = finite_difference_gradient(&f, &x);
        let g = f.gradient(&x);
        assert!((g - g_fd).amax() < 1e-6);
    }

    #[test]
    fn test_check_detects_wrong_hessian() {
        let f = QuarticWithBadHessian;
        let x = DVector::from_vec(vec![1.5, -2.0]);
        let check = check_derivatives(&f, &x);

        assert!(check.gradient_error < 1e-6);
        // True Hessian is [[27, 1], [1, 0]]
        assert!(check.hessian_error > 1.0);
        assert!(!check.passes(1e-5));
    }

    #[test]
    fn test_nan_is_reported_as_failure() {
        let err = max_rel_error([1.0, f64::NAN].iter().zip([1.0, 0.0].iter()));
        assert_eq!(err, f64::INFINITY);
    }
}
