#[allow(clippy::module_inception)]
pub mod config;
pub mod scenario;

pub use config::{default_config_path, load_config, load_config_from, save_config, save_config_to, Config};
pub use scenario::{Executor, ScenarioConfig};
