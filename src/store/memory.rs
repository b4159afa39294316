use tokio::sync::watch;

use crate::model::DeclineRecord;

use super::{DeclineStore, StoreError};

/// In-process decline store. Forgets everything on drop.
#[derive(Debug)]
pub struct MemoryDeclineStore {
    sender: watch::Sender<DeclineRecord>,
}

impl MemoryDeclineStore {
    pub fn new() -> Self {
        Self::with_record(DeclineRecord::default())
    }

    pub fn with_record(record: DeclineRecord) -> Self {
        let (sender, _) = watch::channel(record);
        Self { sender }
    }
}

impl Default for MemoryDeclineStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DeclineStore for MemoryDeclineStore {
    fn current(&self) -> DeclineRecord {
        *self.sender.borrow()
    }

    fn subscribe(&self) -> watch::Receiver<DeclineRecord> {
        self.sender.subscribe()
    }

    fn write(&self, record: DeclineRecord) -> Result<(), StoreError> {
        self.sender.send_replace(record);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn starts_with_empty_record() {
        let store = MemoryDeclineStore::new();
        assert!(store.current().is_empty());
    }

    #[test]
    fn write_overwrites_previous_record() {
        let store = MemoryDeclineStore::new();
        let now = Utc::now();
        store.write(DeclineRecord::new(41, now)).unwrap();
        store.write(DeclineRecord::new(42, now)).unwrap();
        assert_eq!(store.current(), DeclineRecord::new(42, now));
    }

    #[tokio::test]
    async fn subscribers_see_writes() {
        let store = MemoryDeclineStore::new();
        let mut rx = store.subscribe();
        let record = DeclineRecord::new(9, Utc::now());

        store.write(record).unwrap();
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), record);

        store.reset().unwrap();
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_empty());
    }
}
