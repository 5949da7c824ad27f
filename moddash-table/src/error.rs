use thiserror::Error;

/// Column configuration errors, raised when building a column set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColumnError {
    #[error("column '{column}' reads unknown field '{field}'")]
    UnknownField { column: String, field: String },

    #[error("duplicate column id '{0}'")]
    DuplicateColumn(String),

    #[error("column '{column}' has unordered percentage thresholds")]
    UnorderedThresholds { column: String },

    #[error("column '{column}' has no actions")]
    EmptyActions { column: String },

    #[error("no columns defined")]
    NoColumns,
}

/// Errors raised while rendering or dispatching events.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("duplicate row key {key} at rows {first} and {second}")]
    DuplicateKey {
        key: String,
        first: usize,
        second: usize,
    },

    #[error("no row with key {0}")]
    UnknownKey(String),

    #[error("invalid table config: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Column(#[from] ColumnError),
}
