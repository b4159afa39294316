//! Decides whether and how to prompt a user to update a running client,
//! and tracks an update once it has been started.
//!
//! - [`policy`] classifies an available update and throttles re-prompts.
//! - [`state`] projects raw status plus the last decline into [`UpdateState`].
//! - [`session`] keeps that projection live and executes its commands.
//!
//! The platform update mechanism and the decline persistence are injected
//! through [`UpdateSource`] and [`DeclineStore`].

pub mod config;
pub mod logging;
pub mod model;
pub mod policy;
pub mod session;
pub mod source;
pub mod state;
pub mod store;

pub use config::{Config, PolicySettings};
pub use model::{DeclineRecord, FlowResult, RawStatus, UpdateInfo, UpdateMode};
pub use session::UpdateSession;
pub use source::UpdateSource;
pub use state::{UpdateCommand, UpdateState};
pub use store::DeclineStore;
