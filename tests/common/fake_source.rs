//! Scriptable update source for driving a session in tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::mpsc;
use update_gate::model::{RawStatus, UpdateInfo, UpdateMode};
use update_gate::source::{FlowResolver, PendingFlow, SourceError, StatusReceiver, UpdateSource};

type StatusItem = Result<RawStatus, SourceError>;

/// Update source whose statuses and flow results are pushed by the test.
pub struct FakeUpdateSource {
    inner: Mutex<FakeInner>,
}

struct FakeInner {
    current: Option<StatusItem>,
    subscribers: Vec<mpsc::Sender<StatusItem>>,
    observe_calls: usize,
    started: Vec<(UpdateInfo, UpdateMode)>,
    resolvers: VecDeque<FlowResolver>,
    reject_start: Option<String>,
    install_error: Option<String>,
    install_calls: usize,
}

impl FakeUpdateSource {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: Mutex::new(FakeInner {
                current: None,
                subscribers: Vec::new(),
                observe_calls: 0,
                started: Vec::new(),
                resolvers: VecDeque::new(),
                reject_start: None,
                install_error: None,
                install_calls: 0,
            }),
        })
    }

    /// Source that reports `status` to every subscriber.
    pub fn with_status(status: RawStatus) -> Arc<Self> {
        let source = Self::new();
        source.emit(Ok(status));
        source
    }

    /// Push a status (or check failure) to all live subscribers.
    pub fn emit(&self, item: StatusItem) {
        let mut inner = self.inner.lock();
        inner.current = Some(item.clone());
        inner
            .subscribers
            .retain(|tx| tx.try_send(item.clone()).is_ok());
    }

    pub fn emit_status(&self, status: RawStatus) {
        self.emit(Ok(status));
    }

    pub fn fail_check(&self, message: &str) {
        self.emit(Err(SourceError::Check(message.to_string())));
    }

    pub fn observe_calls(&self) -> usize {
        self.inner.lock().observe_calls
    }

    /// Subscriptions whose receiver is still alive.
    pub fn live_subscribers(&self) -> usize {
        self.inner
            .lock()
            .subscribers
            .iter()
            .filter(|tx| !tx.is_closed())
            .count()
    }

    pub fn started(&self) -> Vec<(UpdateInfo, UpdateMode)> {
        self.inner.lock().started.clone()
    }

    /// Resolver of the oldest unresolved flow.
    pub fn take_resolver(&self) -> Option<FlowResolver> {
        self.inner.lock().resolvers.pop_front()
    }

    pub fn reject_starts(&self, message: &str) {
        self.inner.lock().reject_start = Some(message.to_string());
    }

    pub fn fail_installs(&self, message: &str) {
        self.inner.lock().install_error = Some(message.to_string());
    }

    pub fn install_calls(&self) -> usize {
        self.inner.lock().install_calls
    }
}

#[async_trait]
impl UpdateSource for FakeUpdateSource {
    fn observe(&self) -> StatusReceiver {
        let (tx, rx) = mpsc::channel(16);
        let mut inner = self.inner.lock();
        inner.observe_calls += 1;
        if let Some(current) = inner.current.clone() {
            let _ = tx.try_send(current);
        }
        inner.subscribers.push(tx);
        rx
    }

    fn start_flow(&self, info: &UpdateInfo, mode: UpdateMode) -> Result<PendingFlow, SourceError> {
        let mut inner = self.inner.lock();
        if let Some(message) = &inner.reject_start {
            return Err(SourceError::FlowRejected(message.clone()));
        }
        inner.started.push((info.clone(), mode));
        let (resolver, pending) = PendingFlow::channel();
        inner.resolvers.push_back(resolver);
        Ok(pending)
    }

    async fn complete_install(&self) -> Result<(), SourceError> {
        let mut inner = self.inner.lock();
        inner.install_calls += 1;
        match &inner.install_error {
            Some(message) => Err(SourceError::Install(message.clone())),
            None => Ok(()),
        }
    }
}
