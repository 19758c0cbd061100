//! Error types shared by the scrape and organize steps.
//!
//! Fetch failures never surface here: the fetcher folds them into a
//! [`crate::models::FetchResult::failed`] result so a run always covers the
//! whole catalog. What remains are filesystem and serialization errors, and the
//! organize step's hard dependency on the metadata file.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResearchError {
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error writing {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("metadata file not found: {0}")]
    MissingMetadata(PathBuf),

    #[error("malformed metadata file {path}: {source}")]
    MalformedMetadata {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ResearchError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ResearchError>;
