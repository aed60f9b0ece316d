pub mod arrival_rate;

pub use arrival_rate::{run_scenario, ScenarioReport};
