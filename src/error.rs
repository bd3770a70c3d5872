use std::path::PathBuf;
use thiserror::Error;
/// Run-level failures. Anything that only concerns a single scanned entry is
/// absorbed by the engine and never surfaces here.
#[derive(Debug, Error)]
pub enum TextcatError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to create output file {path}: {source}")]
    Output {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Walk error: {0}")]
    Walk(String),
    #[error("Invalid path: {0}")]
    InvalidPath(String),
    #[error("Invalid glob pattern '{pattern}': {message}")]
    Pattern { pattern: String, message: String },
    #[error("Invalid config file {path}: {source}")]
    Config {
        path: PathBuf,
        source: serde_json::Error,
    },
}
impl TextcatError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TextcatError::Io {
            path: path.into(),
            source,
        }
    }
    pub(crate) fn output(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TextcatError::Output {
            path: path.into(),
            source,
        }
    }
}
