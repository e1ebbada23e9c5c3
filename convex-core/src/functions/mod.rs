//! Twice-differentiable functions.
//!
//! This module provides the function capability consumed by Newton-type
//! drivers, the closed-form quadratic function, and the logarithmic barrier
//! composition that folds inequality constraints into the objective.

pub mod barrier;
pub mod quadratic;
pub mod traits;

pub use barrier::LogBarrierFunction;
pub use quadratic::QuadraticFunction;
pub use traits::{DifferentiableFunction, SharedFunction};
