//! Load-time errors for globe data.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GlobeError {
    #[error("{path:?} not found: {source}")]
    ResourceNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid globe map {path:?}: {trailing} bytes after the last whole record")]
    MalformedData { path: PathBuf, trailing: usize },
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse globe rules: {0}")]
    Parse(#[from] serde_json::Error),
}
