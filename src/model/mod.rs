//! Data carried between the update source, the decline store and the
//! state projector.
//!
//! Everything here is an immutable snapshot: the projector never mutates
//! an `UpdateInfo` or a `DeclineRecord`, it only reads them.

mod decline;
mod flow;
mod update;

pub use decline::DeclineRecord;
pub use flow::{FlowResult, UpdateMode};
pub use update::{Availability, InstallProgress, RawStatus, UpdateInfo, MAX_PRIORITY};
