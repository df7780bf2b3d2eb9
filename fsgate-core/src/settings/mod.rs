pub mod config;
pub mod manager;
pub mod provider;

#[cfg(test)]
mod tests;

pub use config::{ReaderConfig, Settings, Timeouts};
pub use manager::SettingsManager;
pub use provider::{AllowListProvider, LineLimitProvider};
