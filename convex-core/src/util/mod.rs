//! Utility functions.
//!
//! Numerical helpers for validating function implementations.

pub mod numerics;
