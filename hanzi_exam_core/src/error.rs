//! Error types for pool loading, configuration and exam setup

use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong before questions are generated.
///
/// Generation itself never fails once an [`crate::ExamAssembler`] exists;
/// degenerate pools are absorbed by filler options instead.
#[derive(Debug, Error)]
pub enum ExamError {
    #[error("vocabulary pool is empty")]
    EmptyPool,

    #[error("invalid exam configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse vocabulary JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read vocabulary CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to parse exam config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("missing required '{column}' column in file header")]
    MissingColumn { column: &'static str },

    #[error("unsupported file format: .{extension}")]
    UnsupportedFormat { extension: String },
}

impl ExamError {
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        ExamError::InvalidConfig {
            reason: reason.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ExamError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ExamError>;
