//! Linear algebra layer.
//!
//! Dense helpers, sparse input builders, and the KKT solve contract with its
//! dense default implementation.

pub mod dense;
pub mod dense_kkt;
pub mod kkt_trait;
pub mod sparse;

pub use dense_kkt::DenseKktSolver;
pub use kkt_trait::{KktSolution, KktSolver};
