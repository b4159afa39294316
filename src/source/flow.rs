use tokio::sync::oneshot;

use crate::model::FlowResult;

/// Handle to a started flow; resolves to its terminal result.
#[derive(Debug)]
pub struct PendingFlow {
    receiver: oneshot::Receiver<FlowResult>,
}

/// Host side of a [`PendingFlow`], used to report the terminal result.
#[derive(Debug)]
pub struct FlowResolver {
    sender: oneshot::Sender<FlowResult>,
}

impl PendingFlow {
    /// Create a connected resolver/pending pair.
    pub fn channel() -> (FlowResolver, PendingFlow) {
        let (sender, receiver) = oneshot::channel();
        (FlowResolver { sender }, PendingFlow { receiver })
    }

    /// Wait for the terminal result. `None` when the host dropped the flow
    /// without reporting one.
    pub async fn wait(self) -> Option<FlowResult> {
        self.receiver.await.ok()
    }
}

impl FlowResolver {
    /// Report the terminal result. Returns `false` if nobody is waiting.
    pub fn resolve(self, result: FlowResult) -> bool {
        self.sender.send(result).is_ok()
    }

    /// Report a raw platform result code.
    pub fn resolve_code(self, code: i32) -> bool {
        self.resolve(FlowResult::from_code(code))
    }
}
