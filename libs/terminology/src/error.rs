//! Error types for the terminology engine

use thiserror::Error;

/// A catalog that violates its structural invariants
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Code group #{index} has an empty name")]
    EmptyGroupName { index: usize },

    #[error("Code group '{group}' has an empty code on its {entry}")]
    EmptyCode { group: String, entry: String },

    #[error("Code group '{group}' contains code '{code}' more than once")]
    DuplicateCode { group: String, code: String },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid catalog: {0}")]
    Validation(#[from] ValidationError),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid Bundle: {0}")]
    InvalidBundle(#[from] ayush_models::Error),

    #[error("Bundle type '{0}' is not accepted; expected transaction or collection")]
    UnsupportedBundleType(String),
}

pub type Result<T> = std::result::Result<T, Error>;
