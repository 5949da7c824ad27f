//! Binary error type

use moddash_lib::error::Error;
use moddash_lib::error::ValidationError;
use moddash_table::error::TableError;

use crate::config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Backend(#[from] Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error("failed to encode output: {0}")]
    Json(#[from] serde_json::Error),

    /// A page failed to load and there is nothing to show.
    #[error("failed to load rows: {0}")]
    Load(String),
}
