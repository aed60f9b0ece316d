pub mod collector;
pub mod reporter;
pub mod thresholds;
pub mod types;

pub use collector::MetricsCollector;
pub use thresholds::{Threshold, ThresholdResult};
pub use types::{CheckCounts, LatencyStats, RunSummary, TestMetrics};
