//! Error types

mod api;
mod validation;

pub use api::*;
pub use validation::*;

use std::sync::Arc;

use crate::model::EntityId;
use crate::model::Platform;

/// Top-level error returned by the data layer.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The remote API call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A backend row or user input failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The entity does not exist on the backend.
    #[error("{platform} entity {id} not found")]
    NotFound { platform: Platform, id: EntityId },

    /// Error produced by a lookup that another caller was already running.
    ///
    /// Single-flight lookups hand the same failure to every waiter.
    #[error(transparent)]
    Shared(Arc<Error>),
}

impl Error {
    /// Returns `true` if retrying the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Api(e) => e.is_retryable(),
            Self::Shared(e) => e.is_retryable(),
            Self::Validation(_) | Self::NotFound { .. } => false,
        }
    }

    /// Returns the HTTP status code, if the error came from an HTTP response.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api(e) => e.status_code(),
            Self::Shared(e) => e.status_code(),
            _ => None,
        }
    }
}

impl From<Arc<Error>> for Error {
    fn from(err: Arc<Error>) -> Self {
        Self::Shared(err)
    }
}
