use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::config::PolicySettings;
use crate::model::{RawStatus, UpdateInfo};
use crate::source::{PendingFlow, UpdateSource};
use crate::state::{project, UpdateCommand, UpdateState};
use crate::store::DeclineStore;

use super::clock::{Clock, SystemClock};
use super::controller::FlowController;
use super::error::SessionError;

/// A live update-check session.
///
/// Owns a single observation of the update source and the decline store.
/// Every emission of either input re-projects the state, and every flow
/// result cancels the observation and subscribes again. Dropping the
/// session stops the observation.
pub struct UpdateSession {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    controller: FlowController,
    state_tx: watch::Sender<UpdateState>,
    observer: Mutex<Observer>,
}

/// The running observation task and its generation.
///
/// A task only publishes while its generation is current, so an aborted
/// task that is still unwinding can never overwrite a newer state. Once
/// `stopped` is set no new observation is started, so a flow resolving
/// after the session is gone cannot subscribe again.
struct Observer {
    generation: u64,
    stopped: bool,
    task: Option<JoinHandle<()>>,
}

impl UpdateSession {
    /// Start observing. Must be called from within a tokio runtime.
    pub fn start(
        source: Arc<dyn UpdateSource>,
        store: Arc<dyn DeclineStore>,
        settings: PolicySettings,
    ) -> Self {
        Self::with_clock(source, store, settings, Arc::new(SystemClock))
    }

    /// [`UpdateSession::start`] with an explicit clock.
    pub fn with_clock(
        source: Arc<dyn UpdateSource>,
        store: Arc<dyn DeclineStore>,
        settings: PolicySettings,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let (state_tx, _) = watch::channel(UpdateState::Loading);
        let inner = Arc::new(SessionInner {
            controller: FlowController::new(source, store, settings, clock),
            state_tx,
            observer: Mutex::new(Observer {
                generation: 0,
                stopped: false,
                task: None,
            }),
        });
        inner.restart();
        Self { inner }
    }

    /// Latest projected state.
    pub fn current(&self) -> UpdateState {
        self.inner.state_tx.borrow().clone()
    }

    /// Observe state changes. Intermediate states may be superseded before
    /// a slow receiver sees them.
    pub fn subscribe(&self) -> watch::Receiver<UpdateState> {
        self.inner.state_tx.subscribe()
    }

    /// Cancel the current observation and subscribe again. Does nothing
    /// after [`UpdateSession::shutdown`].
    pub fn restart(&self) {
        self.inner.restart();
    }

    /// Number of observations started so far.
    pub fn generation(&self) -> u64 {
        self.inner.observer.lock().generation
    }

    /// Execute a command taken from a projected state.
    ///
    /// `Start` returns once the flow has been handed to the source; its
    /// result is handled in the background. `CompleteInstall` waits for the
    /// source and reports failures without retrying.
    pub async fn dispatch(&self, command: UpdateCommand) -> Result<(), SessionError> {
        tracing::debug!(command = command.name(), "Dispatching update command");
        match command {
            UpdateCommand::Start { info, mode } => {
                match self.inner.controller.start(&info, mode) {
                    Ok(pending) => {
                        let inner = Arc::clone(&self.inner);
                        tokio::spawn(async move {
                            inner.await_flow(info, pending).await;
                        });
                        Ok(())
                    }
                    Err(err) => {
                        self.inner.restart();
                        Err(err.into())
                    }
                }
            }
            UpdateCommand::Decline { info } => {
                self.inner.controller.decline(&info)?;
                Ok(())
            }
            UpdateCommand::CompleteInstall => {
                self.inner.controller.complete_install().await?;
                Ok(())
            }
        }
    }

    /// Stop the observation for good. The last state stays readable and
    /// pending flow results no longer restart anything.
    pub fn shutdown(&self) {
        self.inner.stop();
    }
}

impl Drop for UpdateSession {
    fn drop(&mut self) {
        self.inner.stop();
    }
}

impl SessionInner {
    fn restart(self: &Arc<Self>) {
        let mut observer = self.observer.lock();
        if observer.stopped {
            tracing::debug!("Update session stopped; not restarting");
            return;
        }
        if let Some(task) = observer.task.take() {
            task.abort();
        }
        observer.generation += 1;
        let generation = observer.generation;
        tracing::debug!(generation, "Update observation (re)started");

        self.state_tx.send_replace(UpdateState::Loading);
        let inner = Arc::clone(self);
        observer.task = Some(tokio::spawn(inner.observe(generation)));
    }

    fn stop(&self) {
        let mut observer = self.observer.lock();
        observer.stopped = true;
        if let Some(task) = observer.task.take() {
            task.abort();
        }
        // Invalidate any task that has not reached an await point yet.
        observer.generation += 1;
    }

    fn publish(&self, generation: u64, state: UpdateState) {
        let observer = self.observer.lock();
        if observer.generation != generation {
            return;
        }
        self.state_tx.send_if_modified(|current| {
            if *current == state {
                return false;
            }
            tracing::debug!(from = current.label(), to = state.label(), "Update state changed");
            *current = state;
            true
        });
    }

    /// Merge source statuses with decline records until both inputs close.
    async fn observe(self: Arc<Self>, generation: u64) {
        let mut statuses = self.controller.source().observe();
        let mut declines = self.controller.store().subscribe();
        let mut latest: Option<RawStatus> = None;
        let mut source_open = true;
        let mut store_open = true;

        loop {
            tokio::select! {
                item = statuses.recv(), if source_open => match item {
                    Some(Ok(raw)) => latest = Some(raw),
                    Some(Err(err)) => {
                        tracing::error!(error = %err, "Update check failed; treating as no update");
                        latest = Some(RawStatus::NotAvailable);
                    }
                    None => {
                        source_open = false;
                        continue;
                    }
                },
                changed = declines.changed(), if store_open => {
                    if changed.is_err() {
                        store_open = false;
                        continue;
                    }
                },
                else => break,
            }

            // Loading until the source has produced its first status.
            let Some(raw) = &latest else {
                continue;
            };
            let declined = *declines.borrow_and_update();
            let state = project(
                raw,
                &declined,
                self.controller.settings(),
                self.controller.clock().now(),
            );
            self.publish(generation, state);
        }
    }

    async fn await_flow(self: Arc<Self>, info: UpdateInfo, pending: PendingFlow) {
        let result = pending.wait().await;
        if let Err(err) = self.controller.on_flow_result(&info, result) {
            tracing::error!(version = info.version_code, error = %err, "Failed to record decline");
        }
        self.restart();
    }
}
