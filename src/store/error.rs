use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading or writing a decline record.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse decline record '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize decline record: {0}")]
    Serialize(#[from] toml::ser::Error),
}
