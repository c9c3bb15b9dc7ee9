//! Errors raised around the inference core: loading, configuration and
//! output. Inference itself cannot fail.
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid config {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },

    #[error("input nesting depth {depth} exceeds the limit of {limit}")]
    DepthExceeded { depth: usize, limit: usize },

    #[error("max depth {requested} is above the supported ceiling of {ceiling}")]
    MaxDepthTooLarge { requested: usize, ceiling: usize },

    #[error("invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error(transparent)]
    Glob(#[from] glob::GlobError),

    #[error("glob pattern matched no files: {0}")]
    NoMatch(String),

    #[error("failed to serialize schema: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
