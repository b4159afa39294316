//! Runtime side of the update gate.
//!
//! [`UpdateSession`] keeps one live observation of the update source and the
//! decline store and republishes the projected [`UpdateState`]. Commands
//! taken from a state are executed through [`UpdateSession::dispatch`], which
//! hands flows to the [`FlowController`].
//!
//! [`UpdateState`]: crate::state::UpdateState

mod clock;
mod controller;
mod error;
mod runtime;

pub use clock::{Clock, SystemClock};
pub use controller::{record_decline, FlowController, FlowOutcome};
pub use error::SessionError;
pub use runtime::UpdateSession;
