//! Error types / 错误类型

use thiserror::Error;

/// Natural-language query could not be turned into filters
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseFailure {
    #[error("Missing 'query' parameter")]
    MissingQuery,

    #[error("Unable to parse natural language query")]
    Unrecognized,

    #[error("Number out of range in query: {0}")]
    NumberOutOfRange(String),

    #[error("Query can never match: {0}")]
    Unsatisfiable(String),
}

/// Rejected client input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Missing '{0}' field")]
    Missing(&'static str),

    #[error("'{0}' must be a string")]
    WrongType(&'static str),

    #[error("Invalid value for '{field}': {value}")]
    Malformed { field: &'static str, value: String },
}

/// Record store failures / 存储错误
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Record already exists: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Corrupt record {id}: {reason}")]
    Corrupt { id: String, reason: String },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    InvalidInput(#[from] InputError),

    #[error("String already exists")]
    Conflict,

    #[error("String not found")]
    NotFound,

    #[error(transparent)]
    Parse(#[from] ParseFailure),

    #[error("Store error: {0}")]
    Store(StoreError),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(_) => AppError::Conflict,
            other => AppError::Store(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
