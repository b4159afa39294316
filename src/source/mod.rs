//! Boundary to the platform component that knows about updates.
//!
//! The update source checks for new builds and executes update flows.
//! This crate only consumes it through [`UpdateSource`].

mod error;
mod flow;

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::model::{RawStatus, UpdateInfo, UpdateMode};

pub use error::SourceError;
pub use flow::{FlowResolver, PendingFlow};

/// Receiver half of a status subscription.
pub type StatusReceiver = mpsc::Receiver<Result<RawStatus, SourceError>>;

/// Platform update delivery.
#[async_trait]
pub trait UpdateSource: Send + Sync {
    /// Start a new status subscription.
    ///
    /// Every call must yield an independent stream that begins with the
    /// current status. Dropping the receiver ends the subscription.
    fn observe(&self) -> StatusReceiver;

    /// Ask the platform to begin an update flow of the given mode.
    ///
    /// The returned [`PendingFlow`] resolves once the hosting UI reports the
    /// terminal result of the flow.
    fn start_flow(&self, info: &UpdateInfo, mode: UpdateMode) -> Result<PendingFlow, SourceError>;

    /// Finalize installation of a downloaded update.
    async fn complete_install(&self) -> Result<(), SourceError>;
}
