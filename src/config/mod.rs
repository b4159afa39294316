//! Configuration loading for the update policy and decline persistence.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{Config, PolicySettings, StoreConfig};
