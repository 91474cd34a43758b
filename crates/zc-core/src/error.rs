//! Error types for core type construction.

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while constructing core domain types.
#[derive(Error, Debug, Clone)]
pub enum CoreError {
    /// A quote record carries a value the curve engine cannot work with.
    #[error("Invalid quote: {reason}")]
    InvalidQuote {
        /// Description of the invalid field.
        reason: String,
    },
}

impl CoreError {
    /// Creates an invalid quote error.
    #[must_use]
    pub fn invalid_quote(reason: impl Into<String>) -> Self {
        Self::InvalidQuote {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::invalid_quote("coupon base must be positive");
        assert!(err.to_string().contains("coupon base"));
    }
}
