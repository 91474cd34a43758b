//! # Zerocurve Math
//!
//! Mathematical utilities for the Zerocurve zero-coupon curve library.
//!
//! This crate provides:
//!
//! - **Linear System Solver**: Dense Gaussian elimination with partial
//!   pivoting, used by the cubic-spline model to solve for its coefficients
//!
//! ## Design Philosophy
//!
//! - **Numerical Stability**: Partial pivoting and an explicit singularity
//!   guard instead of silent `NaN` propagation
//! - **Small Systems**: The curve engine solves systems of tens of
//!   equations; clarity wins over blocked algorithms

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::similar_names)]

pub mod error;
pub mod linear_system;

pub use error::{MathError, MathResult};
pub use linear_system::solve_gaussian;
