use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_DURATION_SECS, DEFAULT_MAX_VUS, DEFAULT_PRE_ALLOCATED_VUS, DEFAULT_RATE, DEFAULT_TIME_UNIT_MS,
};
use crate::error::{LoadTestError, LoadTestResult};
use crate::models::WorkflowKind;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Executor {
    ConstantArrivalRate,
}

/// One named load scenario: `rate` iterations of `exec` every `time_unit_ms`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScenarioConfig {
    pub name: String,
    pub executor: Executor,
    pub rate: u32,
    #[serde(default = "default_time_unit_ms")]
    pub time_unit_ms: u64,
    pub duration_secs: u64,
    pub pre_allocated_vus: usize,
    pub max_vus: usize,
    pub exec: WorkflowKind,
}

fn default_time_unit_ms() -> u64 {
    DEFAULT_TIME_UNIT_MS
}

impl ScenarioConfig {
    pub fn constant_arrival_rate(name: &str, exec: WorkflowKind) -> Self {
        Self {
            name: name.to_string(),
            executor: Executor::ConstantArrivalRate,
            rate: DEFAULT_RATE,
            time_unit_ms: DEFAULT_TIME_UNIT_MS,
            duration_secs: DEFAULT_DURATION_SECS,
            pre_allocated_vus: DEFAULT_PRE_ALLOCATED_VUS,
            max_vus: DEFAULT_MAX_VUS,
            exec,
        }
    }

    pub fn duration(&self) -> Duration {
        Duration::from_secs(self.duration_secs)
    }

    /// Gap between two consecutive iteration starts.
    pub fn arrival_interval(&self) -> Duration {
        Duration::from_millis(self.time_unit_ms) / self.rate.max(1)
    }

    pub fn validate(&self) -> LoadTestResult<()> {
        let fail = |msg: &str| Err(LoadTestError::ConfigError(format!("scenario '{}': {}", self.name, msg)));

        if self.rate == 0 {
            return fail("rate must be greater than zero");
        }
        if self.time_unit_ms == 0 {
            return fail("time_unit_ms must be greater than zero");
        }
        if self.arrival_interval().is_zero() {
            return fail("rate is too high for time_unit_ms, iterations would be less than 1ns apart");
        }
        if self.pre_allocated_vus == 0 {
            return fail("pre_allocated_vus must be greater than zero");
        }
        if self.max_vus < self.pre_allocated_vus {
            return fail("max_vus cannot be lower than pre_allocated_vus");
        }
        Ok(())
    }
}
