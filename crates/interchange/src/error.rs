/// Errors while decoding interchange JSON.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InterchangeError {
    /// A schema fragment has the wrong JSON shape for its keyword.
    #[error("invalid schema at {path}: {message}")]
    InvalidSchema { path: String, message: String },

    /// A number cannot be represented as an integer or decimal.
    #[error("invalid number at {path}: {number}")]
    InvalidNumber { path: String, number: String },

    /// A record is missing a required key or has the wrong shape.
    #[error("invalid record: {0}")]
    InvalidRecord(String),
}
