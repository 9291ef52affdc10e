use thiserror::Error;

/// Error type for studentdb operations
#[derive(Debug, Error)]
pub enum DbError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Expected {expected} row(s), got {actual}")]
    UnexpectedRowCount { expected: usize, actual: usize },

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Column {column} does not hold a value of type {expected}")]
    TypeMismatch {
        column: String,
        expected: &'static str,
    },

    #[error("Unsupported column type: {0}")]
    UnsupportedType(String),

    #[error("Invalid statement: {0}")]
    InvalidStatement(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for studentdb operations
pub type Result<T> = std::result::Result<T, DbError>;
