//! Metric types

use std::collections::BTreeMap;
use std::time::Duration;

use super::thresholds::ThresholdResult;

#[derive(Debug, Clone, Default)]
pub struct RequestMetrics {
    pub total: u64,
    pub failed: u64,
}

impl RequestMetrics {
    pub fn failure_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.failed as f64 / self.total as f64
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckCounts {
    pub passes: u64,
    pub fails: u64,
}

impl CheckCounts {
    pub fn total(&self) -> u64 {
        self.passes + self.fails
    }

    pub fn pass_rate(&self) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            self.passes as f64 / self.total() as f64
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct IterationMetrics {
    pub started: usize,
    pub completed: usize,
    pub short_circuited: usize,
    pub dropped: usize,
    pub in_flight: usize,
}

#[derive(Debug, Clone, Default)]
pub struct TestMetrics {
    pub requests: RequestMetrics,
    pub checks: BTreeMap<String, CheckCounts>,
    pub iterations: BTreeMap<String, IterationMetrics>,
}

impl TestMetrics {
    pub fn check(&self, name: &str) -> CheckCounts {
        self.checks.get(name).copied().unwrap_or_default()
    }

    /// All checks folded together.
    pub fn checks_total(&self) -> CheckCounts {
        self.checks.values().fold(CheckCounts::default(), |acc, c| CheckCounts {
            passes: acc.passes + c.passes,
            fails: acc.fails + c.fails,
        })
    }
}

/// Request latency distribution, in milliseconds.
#[derive(Debug, Clone, Default)]
pub struct LatencyStats {
    pub min: f64,
    pub p50: f64,
    pub p90: f64,
    pub p95: f64,
    pub p99: f64,
    pub max: f64,
    pub mean: f64,
    pub count: u64,
}

/// Everything a finished run reports.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub metrics: TestMetrics,
    pub latency: LatencyStats,
    pub thresholds: Vec<ThresholdResult>,
    pub elapsed: Duration,
}

impl RunSummary {
    pub fn passed(&self) -> bool {
        self.thresholds.iter().all(|t| t.passed)
    }

    pub fn failed_thresholds(&self) -> impl Iterator<Item = &ThresholdResult> {
        self.thresholds.iter().filter(|t| !t.passed)
    }
}
