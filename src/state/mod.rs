//! Externally observable update state and its projection.
//!
//! ```text
//! RawStatus ─┐
//!            ├──→ project ──→ UpdateState ──→ UI
//! Declined ──┘                    │
//!     ↑                     UpdateCommand
//!     └──── FlowController ←──────┘
//! ```

mod command;
mod projector;
mod update_state;

pub use command::UpdateCommand;
pub use projector::project;
pub use update_state::UpdateState;
