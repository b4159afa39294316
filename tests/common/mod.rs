//! Shared test utilities and fake collaborators.

#![allow(dead_code, unused_imports)]

pub mod fake_source;

pub use fake_source::FakeUpdateSource;

use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use update_gate::model::{Availability, UpdateInfo};
use update_gate::session::Clock;
use update_gate::state::UpdateState;

const WAIT_TIMEOUT: Duration = Duration::from_secs(2);

/// Build an available update.
pub fn update(version_code: i64, priority: i32, staleness_days: i32) -> UpdateInfo {
    UpdateInfo {
        version_code,
        priority,
        staleness_days: Some(staleness_days),
        availability: Availability::Available,
        immediate_allowed: true,
        flexible_allowed: true,
    }
}

/// Wait until the state matches `predicate`, failing the test after a timeout.
pub async fn wait_for_state<F>(rx: &mut watch::Receiver<UpdateState>, predicate: F) -> UpdateState
where
    F: FnMut(&UpdateState) -> bool,
{
    let state = tokio::time::timeout(WAIT_TIMEOUT, rx.wait_for(predicate))
        .await
        .expect("timed out waiting for state")
        .expect("state channel closed");
    state.clone()
}

/// Wait for the first projected (non-loading) state.
pub async fn wait_for_projection(rx: &mut watch::Receiver<UpdateState>) -> UpdateState {
    wait_for_state(rx, |state| !state.is_loading()).await
}

/// Poll `condition` until it holds, failing the test after a timeout.
pub async fn wait_until<F>(mut condition: F)
where
    F: FnMut() -> bool,
{
    let deadline = tokio::time::Instant::now() + WAIT_TIMEOUT;
    while !condition() {
        assert!(
            tokio::time::Instant::now() < deadline,
            "timed out waiting for condition"
        );
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}

/// Clock that only moves when told to.
pub struct ManualClock {
    millis: AtomicI64,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            millis: AtomicI64::new(start.timestamp_millis()),
        }
    }

    pub fn advance(&self, by: chrono::Duration) {
        self.millis.fetch_add(by.num_milliseconds(), Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.millis.load(Ordering::SeqCst))
            .expect("clock out of range")
    }
}
