use thiserror::Error;

/// Errors raised while parsing a filter query.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("query text is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("query must be a JSON object, got {0}")]
    NotAnObject(String),

    #[error("operator {0} is not supported")]
    UnsupportedOperator(String),

    #[error("{op} expects {expected}")]
    BadOperand { op: String, expected: &'static str },

    #[error("empty field path in query")]
    EmptyPath,
}

/// Reasons a document is refused by the validator.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("document does not provide a valid name")]
    MissingName,

    #[error("{field} has no measurements")]
    EmptyField { field: String },

    #[error("{field}[{index}] has neither a value nor a distribution")]
    MissingValue { field: String, index: usize },

    #[error("{field}[{index}] has no reference")]
    MissingReference { field: String, index: usize },
}

/// Errors from mutating the in-memory database.
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("document has no name")]
    MissingName,

    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("no document named {0:?}")]
    UnknownName(String),
}
