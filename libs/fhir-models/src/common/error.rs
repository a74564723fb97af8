//! Error types for the resource models

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Expected a {expected} resource, got {actual}")]
    UnexpectedResourceType { expected: String, actual: String },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
