//! Error types for paired scoring
//!
//! Missing inputs are not errors: an absent string yields an absent score.
//! Only conditions that make a whole batch meaningless are reported here.

use thiserror::Error;

/// Errors that can occur while scoring a batch of string pairs
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScoreError {
    /// The two source sequences cannot be paired index by index
    #[error("Sequences have to be the same length: left has {left} elements, right has {right}")]
    LengthMismatch { left: usize, right: usize },

    /// Scoring parameters describe an incoherent scheme
    #[error("Invalid scoring configuration: {0}")]
    InvalidConfiguration(String),
}

pub type Result<T> = std::result::Result<T, ScoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ScoreError::LengthMismatch { left: 3, right: 4 };
        assert_eq!(
            err.to_string(),
            "Sequences have to be the same length: left has 3 elements, right has 4"
        );

        let err = ScoreError::InvalidConfiguration("match must be positive".to_string());
        assert!(err.to_string().contains("match must be positive"));
    }
}
