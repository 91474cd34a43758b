//! Error types for mathematical operations.

use thiserror::Error;

/// A specialized Result type for mathematical operations.
pub type MathResult<T> = Result<T, MathError>;

/// Errors that can occur during mathematical operations.
#[derive(Error, Debug, Clone)]
pub enum MathError {
    /// The coefficient matrix is singular (no unique solution).
    #[error("Singular system: pivot {pivot:.2e} at row {row}")]
    SingularSystem {
        /// Absolute value of the offending pivot.
        pivot: f64,
        /// Pivot row where elimination broke down.
        row: usize,
    },

    /// Matrix and vector dimensions are incompatible.
    #[error("Incompatible dimensions: {rows}x{cols} matrix with length-{len} vector")]
    DimensionMismatch {
        /// Rows in the coefficient matrix.
        rows: usize,
        /// Columns in the coefficient matrix.
        cols: usize,
        /// Length of the constants vector.
        len: usize,
    },

    /// Invalid input parameter.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of the invalid input.
        reason: String,
    },
}

impl MathError {
    /// Creates a singular system error.
    #[must_use]
    pub fn singular_system(pivot: f64, row: usize) -> Self {
        Self::SingularSystem { pivot, row }
    }

    /// Creates a dimension mismatch error.
    #[must_use]
    pub fn dimension_mismatch(rows: usize, cols: usize, len: usize) -> Self {
        Self::DimensionMismatch { rows, cols, len }
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MathError::singular_system(1e-15, 3);
        assert!(err.to_string().contains("row 3"));

        let err = MathError::dimension_mismatch(3, 3, 4);
        assert!(err.to_string().contains("3x3"));
    }
}
