//! Storage of the single most recent decline.
//!
//! Exactly one [`DeclineRecord`] exists at a time; a write replaces it.
//! Stores publish through a `tokio::sync::watch` channel so the current
//! value can always be read without waiting.

mod error;
mod file;
mod memory;

use tokio::sync::watch;

use crate::model::DeclineRecord;

pub use error::StoreError;
pub use file::FileDeclineStore;
pub use memory::MemoryDeclineStore;

/// Persistence of the decline record.
pub trait DeclineStore: Send + Sync {
    /// Current record. Never blocks.
    fn current(&self) -> DeclineRecord;

    /// Observe the record. The receiver starts at the current value.
    fn subscribe(&self) -> watch::Receiver<DeclineRecord>;

    /// Replace the record. Last writer wins.
    fn write(&self, record: DeclineRecord) -> Result<(), StoreError>;

    /// Restore the "nothing ever declined" record.
    fn reset(&self) -> Result<(), StoreError> {
        self.write(DeclineRecord::default())
    }
}
