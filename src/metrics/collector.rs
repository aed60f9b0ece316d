//! Metrics collector - thread-safe request, check and iteration accounting

use std::sync::Arc;
use std::time::{Duration, Instant};

use hdrhistogram::Histogram;
use parking_lot::RwLock;

use super::types::{LatencyStats, TestMetrics};
use crate::client::HttpOutcome;

#[derive(Clone)]
pub struct MetricsCollector {
    metrics: Arc<RwLock<TestMetrics>>,
    // Microseconds, 3 significant digits
    request_latencies: Arc<RwLock<Histogram<u64>>>,
    start_time: Instant,
}

impl MetricsCollector {
    pub fn new() -> Self {
        let latency_hist = Histogram::new(3).expect("Failed to create request latency histogram");

        Self {
            metrics: Arc::new(RwLock::new(TestMetrics::default())),
            request_latencies: Arc::new(RwLock::new(latency_hist)),
            start_time: Instant::now(),
        }
    }

    pub fn record_request(&self, outcome: &HttpOutcome) {
        {
            let mut metrics = self.metrics.write();
            metrics.requests.total += 1;
            if outcome.is_http_failure() {
                metrics.requests.failed += 1;
            }
        }

        let micros = u64::try_from(outcome.duration.as_micros()).unwrap_or(u64::MAX);
        if let Err(e) = self.request_latencies.write().record(micros) {
            tracing::warn!(micros, error = %e, "dropping latency sample");
        }
    }

    pub fn record_check(&self, name: &str, passed: bool) {
        let mut metrics = self.metrics.write();
        let counts = metrics.checks.entry(name.to_string()).or_default();
        if passed {
            counts.passes += 1;
        } else {
            counts.fails += 1;
        }
    }

    pub fn iteration_started(&self, scenario: &str) {
        let mut metrics = self.metrics.write();
        let iterations = metrics.iterations.entry(scenario.to_string()).or_default();
        iterations.started += 1;
        iterations.in_flight += 1;
    }

    pub fn iteration_completed(&self, scenario: &str) {
        let mut metrics = self.metrics.write();
        let iterations = metrics.iterations.entry(scenario.to_string()).or_default();
        iterations.completed += 1;
        iterations.in_flight = iterations.in_flight.saturating_sub(1);
    }

    pub fn iteration_short_circuited(&self, scenario: &str) {
        let mut metrics = self.metrics.write();
        let iterations = metrics.iterations.entry(scenario.to_string()).or_default();
        iterations.short_circuited += 1;
        iterations.in_flight = iterations.in_flight.saturating_sub(1);
    }

    /// No free execution slot when the iteration was due.
    pub fn iteration_dropped(&self, scenario: &str) {
        let mut metrics = self.metrics.write();
        metrics.iterations.entry(scenario.to_string()).or_default().dropped += 1;
    }

    pub fn snapshot(&self) -> TestMetrics {
        self.metrics.read().clone()
    }

    /// Latency at quantile `q` (0.0..=1.0) in milliseconds; 0 when nothing was recorded.
    pub fn latency_at_quantile(&self, q: f64) -> f64 {
        let hist = self.request_latencies.read();
        if hist.is_empty() {
            return 0.0;
        }
        hist.value_at_quantile(q) as f64 / 1_000.0
    }

    pub fn latency_stats(&self) -> LatencyStats {
        let hist = self.request_latencies.read();
        if hist.is_empty() {
            return LatencyStats::default();
        }
        let ms = |micros: u64| micros as f64 / 1_000.0;
        LatencyStats {
            min: ms(hist.min()),
            p50: ms(hist.value_at_quantile(0.50)),
            p90: ms(hist.value_at_quantile(0.90)),
            p95: ms(hist.value_at_quantile(0.95)),
            p99: ms(hist.value_at_quantile(0.99)),
            max: ms(hist.max()),
            mean: hist.mean() / 1_000.0,
            count: hist.len(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}
