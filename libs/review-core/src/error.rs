//! Error types for review-core.

use thiserror::Error;

/// Result type alias using CoreError.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised while validating scheduler input.
///
/// The scheduling functions themselves never fail; these errors come from
/// constructing their inputs at the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("quality must be between 0 and 5, got {0}")]
    InvalidQuality(i32),

    #[error("invalid review date: {0}")]
    InvalidDate(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_quality_message() {
        let error = CoreError::InvalidQuality(7);
        assert_eq!(error.to_string(), "quality must be between 0 and 5, got 7");
    }

    #[test]
    fn invalid_date_message() {
        let error = CoreError::InvalidDate("yesterday-ish".to_string());
        assert_eq!(error.to_string(), "invalid review date: yesterday-ish");
    }
}
