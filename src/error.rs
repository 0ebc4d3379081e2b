/// Error taxonomy for the gallery core
///
/// Two failure classes cross the data-source boundary: transport errors
/// (the source could not deliver a page or photo; retryable) and
/// not-found (a single-photo lookup matched nothing; retrying is
/// pointless, the presentation layer should say so). Nothing here is
/// fatal to the process.

use thiserror::Error;

/// Failures reported by a [`PhotoSource`](crate::source::PhotoSource).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// The underlying transport (file, network, ...) failed to deliver.
    /// The requested page is retryable; no gallery state was consumed.
    #[error("transport error: {0}")]
    Transport(String),

    /// A single-photo lookup matched no record.
    #[error("photo {0} not found")]
    NotFound(u64),
}

impl From<std::io::Error> for SourceError {
    fn from(err: std::io::Error) -> Self {
        SourceError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Transport(format!("malformed catalog data: {err}"))
    }
}

impl SourceError {
    /// Whether a fresh invocation of the same request could succeed.
    /// Transport failures are retryable; not-found is definitive.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SourceError::Transport(_))
    }
}
