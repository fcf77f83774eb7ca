// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PathVisError {
    #[error("I/O error: {source} (path: {})", path.display())]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("Malformed path data: {0}")]
    PathData(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, PathVisError>;

// Allow `?` on std::io::Error by converting to PathVisError::Io with unknown path.
impl From<std::io::Error> for PathVisError {
    fn from(source: std::io::Error) -> Self {
        PathVisError::Io {
            source,
            path: PathBuf::from("<unknown>"),
        }
    }
}

impl From<toml::de::Error> for PathVisError {
    fn from(e: toml::de::Error) -> Self {
        PathVisError::Config(e.to_string())
    }
}
