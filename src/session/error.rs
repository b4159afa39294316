use thiserror::Error;

use crate::source::SourceError;
use crate::store::StoreError;

/// Errors returned when executing an update command.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("Failed to record decline: {0}")]
    Store(#[from] StoreError),
}
