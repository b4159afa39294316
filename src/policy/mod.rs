//! Policy engine: pure decisions about an available update.
//!
//! Nothing in here touches a store or a source. Callers pass the latest
//! snapshot of every input, including the current instant, so every
//! decision can be replayed in tests.

mod calendar;
mod classify;
mod prompt;

pub use calendar::days_between;
pub use classify::{classify_availability, Classification};
pub use prompt::{should_prompt, should_prompt_in};
