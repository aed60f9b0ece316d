// Module declarations
pub mod client;
pub mod commands;
pub mod config;
pub mod constants;
pub mod context;
pub mod engine;
pub mod error;
pub mod ids;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod registry;
pub mod scenarios;
pub mod workflows;

#[cfg(test)]
mod tests;

// Re-export commonly used items
pub use client::{HttpOutcome, LoginAttempt, ReviewersApi, ReviewersClient};
pub use config::{load_config, save_config, Config, ScenarioConfig};
pub use context::{RunContext, RunContextBuilder};
pub use engine::LoadTest;
pub use error::{LoadTestError, LoadTestResult};
pub use registry::TeamRegistry;
pub use workflows::{IterationOutcome, SetupData, Workload, WorkloadOptions};
