use thiserror::Error;

/// Errors reported by an update source.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SourceError {
    /// Checking for an update failed (e.g. transient network error).
    #[error("Update check failed: {0}")]
    Check(String),

    /// The platform refused to start an update flow.
    #[error("Update flow could not be started: {0}")]
    FlowRejected(String),

    /// Finalizing a downloaded update failed.
    #[error("Install completion failed: {0}")]
    Install(String),
}
