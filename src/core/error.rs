use std::path::PathBuf;

use thiserror::Error;

/// A bounded value arrived outside its legal range.
///
/// Mutation paths inside the crate clamp, so this only surfaces at the
/// boundary: fallible constructors and deserialized records.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field} out of range: {value} (expected {min}..={max})")]
pub struct InvariantViolation {
    pub field: &'static str,
    pub value: i64,
    pub min: i64,
    pub max: i64,
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt record in {path:?}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Rejected record: {0}")]
    Invalid(#[from] InvariantViolation),
}

#[derive(Error, Debug)]
pub enum MangoError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Invariant violated: {0}")]
    Invariant(#[from] InvariantViolation),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MangoError>;
