//! Error type for stream rewrites.

use thiserror::Error;

/// Error is returned once a rewrite has consumed its whole input stream.
#[derive(Debug, Error)]
pub enum Error {
    /// No manifest in the stream matched the selector.
    #[error("manifest not found")]
    NotFound,

    /// The manifest matched but some dotted paths could not be set.
    #[error("unable to resolve path(s):\n{}", .0.join("\n"))]
    UnresolvablePath(Vec<String>),

    #[error("yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns true for failures decided by the manifest content rather than by
    /// reading or writing the stream.
    pub fn is_rewrite_failure(&self) -> bool {
        matches!(self, Error::NotFound | Error::UnresolvablePath(_))
    }
}
