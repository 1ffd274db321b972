use std::path::PathBuf;

use thiserror::Error;

/// Every way a tracker operation can be refused. None of these are fatal: the operation that
/// produced them did not touch the state.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("{field} is required")]
    MissingField { field: &'static str },

    #[error("{field} must be a number, got '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    #[error("{field} is out of range: {reason}")]
    OutOfRange { field: &'static str, reason: String },

    #[error("{entity} not found")]
    NotFound { entity: String },

    #[error("'{value}' is not a valid date, expected YYYY-MM-DD")]
    InvalidDate { value: String },

    #[error("Failed to access {path:?}: {source}")]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Stored data in {path:?} is corrupted: {source}")]
    Corrupted {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl TrackerError {
    pub fn missing(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    pub fn out_of_range(field: &'static str, reason: impl Into<String>) -> Self {
        Self::OutOfRange {
            field,
            reason: reason.into(),
        }
    }

    pub fn not_found(entity: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
        }
    }
}

pub type TrackerResult<T> = Result<T, TrackerError>;
