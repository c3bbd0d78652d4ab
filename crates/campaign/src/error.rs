use std::path::PathBuf;

use thiserror::Error;

use crate::core::LevelError;

#[derive(Debug, Error)]
pub enum CampaignError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("level catalog is empty")]
    EmptyCatalog,
    #[error("level {index} is invalid: {source}")]
    Level {
        index: usize,
        #[source]
        source: LevelError,
    },
}

pub type Result<T> = std::result::Result<T, CampaignError>;
