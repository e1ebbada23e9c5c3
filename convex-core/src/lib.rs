//! convex-core: the mathematical core of an interior-point convex optimizer.
//!
//! This library provides the pieces a Newton-type barrier method evaluates at
//! every iteration:
//!
//! - **Differentiable functions**: a value / gradient / Hessian capability
//!   shared by every objective and constraint
//! - **Quadratic functions**: ½ xᵀAx + bᵀx + c with exact derivatives,
//!   including affine constraints (A = 0)
//! - **Log-barrier composition**: t·f₀(x) − ∑ log(−fᵢ(x)), which folds
//!   inequality constraints fᵢ(x) < 0 into an unconstrained objective
//! - **KKT solves**: the Newton step of the equality-constrained (or
//!   unconstrained) barrier subproblem, behind a solver trait with a dense
//!   default implementation
//!
//! The outer barrier loop, line search and convergence control belong to the
//! driver that consumes these contracts.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use nalgebra::{DMatrix, DVector};
//! use convex_core::{
//!     DenseKktSolver, DifferentiableFunction, KktSolver, LogBarrierFunction,
//!     QuadraticFunction, SharedFunction,
//! };
//!
//! // minimize 0.5 ||x||²  subject to  x1 - 1 < 0
//! let f0: SharedFunction = Arc::new(
//!     QuadraticFunction::new(&DMatrix::identity(2, 2), &DVector::zeros(2), 0.0)?,
//! );
//! let f1: SharedFunction = Arc::new(
//!     QuadraticFunction::linear(&DVector::from_vec(vec![1.0, 0.0]), -1.0)?,
//! );
//! let phi = LogBarrierFunction::new(1.0, f0, vec![f1])?;
//!
//! let x = DVector::from_vec(vec![0.0, 0.0]);
//! let step = DenseKktSolver::default().solve_unconstrained(&phi.hessian(&x), &phi.gradient(&x))?;
//! assert!(step.lambda_squared > 0.0);
//! # Ok::<(), convex_core::ConvexError>(())
//! ```

#![warn(clippy::all)]

pub mod error;
pub mod functions;
pub mod linalg;
pub mod settings;
pub mod util;

// Re-export main types
pub use error::{ConvexError, ConvexResult};
pub use functions::{DifferentiableFunction, LogBarrierFunction, QuadraticFunction, SharedFunction};
pub use linalg::{DenseKktSolver, KktSolution, KktSolver};
pub use settings::KktSettings;
