use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::config::PolicySettings;
use crate::model::{DeclineRecord, FlowResult, UpdateInfo, UpdateMode};
use crate::source::{PendingFlow, SourceError, UpdateSource};
use crate::store::{DeclineStore, StoreError};

use super::clock::Clock;

/// What handling a flow result did to the decline record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowOutcome {
    /// Accepted; progress arrives through the source.
    Accepted,
    /// Cancelled by the user. `recorded` is false for high-priority updates.
    Declined { recorded: bool },
    /// The flow errored. Not a user decision, nothing recorded.
    Failed,
    /// Unknown result code, or the host dropped the flow.
    Ignored,
}

/// Write a decline for `info` unless its priority reaches the high threshold.
///
/// High-priority updates are never offered as dismissible, so a decline of
/// one must not suppress a future mandatory prompt. Returns whether the
/// record was written.
pub fn record_decline(
    store: &dyn DeclineStore,
    info: &UpdateInfo,
    settings: &PolicySettings,
    now: DateTime<Utc>,
) -> Result<bool, StoreError> {
    if info.effective_priority() >= settings.high_priority_threshold {
        tracing::debug!(
            version = info.version_code,
            priority = info.priority,
            "Decline ignored for high-priority update"
        );
        return Ok(false);
    }

    store.write(DeclineRecord::new(info.version_code, now))?;
    tracing::info!(version = info.version_code, "Update declined");
    Ok(true)
}

/// Starts update flows and interprets their terminal results.
pub struct FlowController {
    source: Arc<dyn UpdateSource>,
    store: Arc<dyn DeclineStore>,
    settings: PolicySettings,
    clock: Arc<dyn Clock>,
}

impl FlowController {
    pub fn new(
        source: Arc<dyn UpdateSource>,
        store: Arc<dyn DeclineStore>,
        settings: PolicySettings,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            source,
            store,
            settings,
            clock,
        }
    }

    /// Ask the source to begin a flow of `mode` for `info`.
    pub fn start(&self, info: &UpdateInfo, mode: UpdateMode) -> Result<PendingFlow, SourceError> {
        tracing::info!(
            version = info.version_code,
            mode = %mode,
            "Starting update flow"
        );
        self.source.start_flow(info, mode).inspect_err(|err| {
            tracing::warn!(version = info.version_code, error = %err, "Update flow rejected");
        })
    }

    /// Classify a terminal result and update decline bookkeeping.
    ///
    /// `None` means the host dropped the flow without reporting a result.
    /// The caller re-projects afterwards regardless of the outcome.
    pub fn on_flow_result(
        &self,
        info: &UpdateInfo,
        result: Option<FlowResult>,
    ) -> Result<FlowOutcome, StoreError> {
        match result {
            Some(FlowResult::Accepted) => {
                tracing::info!(version = info.version_code, "Update flow result: accepted");
                Ok(FlowOutcome::Accepted)
            }
            Some(FlowResult::Cancelled) => {
                tracing::info!(version = info.version_code, "Update flow result: cancelled");
                let recorded = self.decline(info)?;
                Ok(FlowOutcome::Declined { recorded })
            }
            Some(FlowResult::Failed) => {
                tracing::info!(version = info.version_code, "Update flow result: failed");
                Ok(FlowOutcome::Failed)
            }
            Some(FlowResult::Unrecognized(code)) => {
                tracing::info!(
                    version = info.version_code,
                    code,
                    "Update flow result: unrecognized code"
                );
                Ok(FlowOutcome::Ignored)
            }
            None => {
                tracing::info!(version = info.version_code, "Update flow dropped without result");
                Ok(FlowOutcome::Ignored)
            }
        }
    }

    /// Record a decline of `info` at the current instant.
    pub fn decline(&self, info: &UpdateInfo) -> Result<bool, StoreError> {
        record_decline(self.store.as_ref(), info, &self.settings, self.clock.now())
    }

    /// Finalize a downloaded update. Failures go back to the caller.
    pub async fn complete_install(&self) -> Result<(), SourceError> {
        tracing::info!("Completing downloaded update");
        match self.source.complete_install().await {
            Ok(()) => {
                tracing::info!("Update install completed");
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "Update install failed");
                Err(err)
            }
        }
    }

    pub fn settings(&self) -> &PolicySettings {
        &self.settings
    }

    pub(crate) fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub(crate) fn source(&self) -> &dyn UpdateSource {
        self.source.as_ref()
    }

    pub(crate) fn store(&self) -> &dyn DeclineStore {
        self.store.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Availability;
    use crate::session::SystemClock;
    use crate::store::MemoryDeclineStore;

    fn info(priority: i32) -> UpdateInfo {
        UpdateInfo {
            version_code: 42,
            priority,
            staleness_days: Some(3),
            availability: Availability::Available,
            immediate_allowed: true,
            flexible_allowed: true,
        }
    }

    struct IdleSource;

    #[async_trait::async_trait]
    impl UpdateSource for IdleSource {
        fn observe(&self) -> crate::source::StatusReceiver {
            tokio::sync::mpsc::channel(1).1
        }

        fn start_flow(
            &self,
            _info: &UpdateInfo,
            _mode: UpdateMode,
        ) -> Result<PendingFlow, SourceError> {
            Err(SourceError::FlowRejected("idle".to_string()))
        }

        async fn complete_install(&self) -> Result<(), SourceError> {
            Ok(())
        }
    }

    fn controller(store: Arc<MemoryDeclineStore>) -> FlowController {
        FlowController::new(
            Arc::new(IdleSource),
            store,
            PolicySettings::default(),
            Arc::new(SystemClock),
        )
    }

    #[test]
    fn flow_results_only_cancel_touches_store() {
        let store = Arc::new(MemoryDeclineStore::new());
        let controller = controller(store.clone());
        let info = info(1);

        for (result, expected) in [
            (Some(FlowResult::Accepted), FlowOutcome::Accepted),
            (Some(FlowResult::Failed), FlowOutcome::Failed),
            (Some(FlowResult::Unrecognized(3)), FlowOutcome::Ignored),
            (None, FlowOutcome::Ignored),
        ] {
            assert_eq!(controller.on_flow_result(&info, result).unwrap(), expected);
            assert!(store.current().is_empty());
        }

        let outcome = controller
            .on_flow_result(&info, Some(FlowResult::Cancelled))
            .unwrap();
        assert_eq!(outcome, FlowOutcome::Declined { recorded: true });
        assert_eq!(store.current().version, 42);
    }

    #[test]
    fn cancel_of_high_priority_is_not_recorded() {
        let store = Arc::new(MemoryDeclineStore::new());
        let controller = controller(store.clone());

        let outcome = controller
            .on_flow_result(&info(5), Some(FlowResult::Cancelled))
            .unwrap();
        assert_eq!(outcome, FlowOutcome::Declined { recorded: false });
        assert!(store.current().is_empty());
    }

    #[test]
    fn rejected_start_is_reported() {
        let controller = controller(Arc::new(MemoryDeclineStore::new()));
        let err = controller.start(&info(1), UpdateMode::Flexible).unwrap_err();
        assert_eq!(err, SourceError::FlowRejected("idle".to_string()));
    }

    #[test]
    fn decline_writes_version_and_instant() {
        let store = MemoryDeclineStore::new();
        let now = Utc::now();
        let recorded = record_decline(&store, &info(2), &PolicySettings::default(), now).unwrap();
        assert!(recorded);
        assert_eq!(store.current(), DeclineRecord::new(42, now));
    }

    #[test]
    fn decline_of_high_priority_is_noop() {
        let previous = DeclineRecord::new(7, Utc::now());
        let store = MemoryDeclineStore::with_record(previous);
        let settings = PolicySettings::default();

        for priority in [settings.high_priority_threshold, 5] {
            let recorded = record_decline(&store, &info(priority), &settings, Utc::now()).unwrap();
            assert!(!recorded);
            assert_eq!(store.current(), previous);
        }
    }

    #[test]
    fn decline_of_malformed_priority_is_recorded() {
        let store = MemoryDeclineStore::new();
        let recorded =
            record_decline(&store, &info(77), &PolicySettings::default(), Utc::now()).unwrap();
        assert!(recorded);
        assert_eq!(store.current().version, 42);
    }
}
