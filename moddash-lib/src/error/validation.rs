//! Validation error types

use crate::model::Platform;
use crate::model::ReviewOutcome;

/// Errors raised when backend rows or user input do not fit the model.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// A required column was null or absent in a backend row.
    #[error("{platform} row is missing required field '{field}'")]
    MissingField {
        platform: Platform,
        field: &'static str,
    },

    /// The review string is not part of the platform's vocabulary.
    #[error("'{value}' is not a {platform} review status")]
    UnknownReview { platform: Platform, value: String },

    /// The platform has no status for the requested outcome.
    #[error("{platform} has no review status for outcome {outcome:?}")]
    UnsupportedOutcome {
        platform: Platform,
        outcome: ReviewOutcome,
    },

    /// Unrecognized platform name.
    #[error("unknown platform '{0}'")]
    UnknownPlatform(String),

    /// Unrecognized review outcome name.
    #[error("unknown review outcome '{0}'")]
    UnknownOutcome(String),

    /// Tags must be non-empty after trimming.
    #[error("invalid tag '{0}'")]
    InvalidTag(String),

    /// A review status from one platform was used with another platform's entity.
    #[error("review status '{status}' does not belong to {platform}")]
    PlatformMismatch {
        platform: Platform,
        status: &'static str,
    },
}
