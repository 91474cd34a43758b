//! Error types for curve operations.

use thiserror::Error;
use zc_math::MathError;

/// A specialized Result type for curve operations.
pub type CurveResult<T> = Result<T, CurveError>;

/// Error types for curve construction, interpolation, and bootstrapping.
#[derive(Error, Debug, Clone)]
pub enum CurveError {
    /// A curve was sealed or queried with no knots.
    #[error("Empty curve: at least one knot is required")]
    EmptyCurve,

    /// Not enough knots for the requested interpolation model.
    #[error("Insufficient knots: need at least {required}, got {got}")]
    InsufficientKnots {
        /// Minimum required knots.
        required: usize,
        /// Actual number of knots.
        got: usize,
    },

    /// Query term outside what the extrapolation policy can resolve.
    ///
    /// Both shipped models extrapolate on either side of the knot range,
    /// so they never raise this; it is the catalogue slot for callers and
    /// future policies that bound their resolvable domain.
    #[error("Term {requested} out of range [{min}, {max}]")]
    TermOutOfRange {
        /// The requested term in years.
        requested: f64,
        /// Minimum resolvable term.
        min: f64,
        /// Maximum resolvable term.
        max: f64,
    },

    /// The closed-form zero-rate solve is undefined for this swap.
    #[error(
        "Bootstrap infeasible at term {term:.4}: discounted coupon sum {coupon_sum:.6} >= 1"
    )]
    BootstrapInfeasible {
        /// Swap maturity being bootstrapped.
        term: f64,
        /// Sum of discounted coupon cash flows.
        coupon_sum: f64,
    },

    /// A swap curve operation needed a cash-flow frequency the curve lacks.
    #[error("Missing cash-flow frequency on swap curve")]
    MissingFrequency,

    /// Error propagated from the linear solver.
    #[error("Math error: {0}")]
    Math(#[from] MathError),
}

impl CurveError {
    /// Creates an insufficient knots error.
    #[must_use]
    pub fn insufficient_knots(required: usize, got: usize) -> Self {
        Self::InsufficientKnots { required, got }
    }

    /// Creates a bootstrap infeasible error.
    #[must_use]
    pub fn bootstrap_infeasible(term: f64, coupon_sum: f64) -> Self {
        Self::BootstrapInfeasible { term, coupon_sum }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CurveError::insufficient_knots(3, 2);
        assert!(err.to_string().contains("at least 3"));

        let err = CurveError::bootstrap_infeasible(10.0, 1.02);
        assert!(err.to_string().contains("infeasible"));

        let err = CurveError::TermOutOfRange {
            requested: 12.0,
            min: 0.5,
            max: 10.0,
        };
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn test_math_error_conversion() {
        let math_err = MathError::singular_system(0.0, 1);
        let err: CurveError = math_err.into();
        assert!(matches!(err, CurveError::Math(_)));
    }
}
