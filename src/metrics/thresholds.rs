//! Pass/fail criteria written the way load-test tooling usually spells them:
//! `rate<0.0001` for `http_req_failed`, `p(99)<100` for `http_req_duration`.

use std::fmt;

use regex::Regex;

use super::collector::MetricsCollector;
use crate::constants::{METRIC_CHECKS, METRIC_HTTP_REQ_DURATION, METRIC_HTTP_REQ_FAILED};
use crate::error::{LoadTestError, LoadTestResult};

lazy_static::lazy_static! {
    static ref EXPRESSION: Regex = Regex::new(
        r"^\s*(rate|avg|min|max|med|p\(\s*(\d+(?:\.\d+)?)\s*\))\s*(<=|>=|==|<|>)\s*(-?\d+(?:\.\d+)?)\s*$"
    ).expect("static threshold pattern");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdMetric {
    HttpReqFailed,
    HttpReqDuration,
    Checks,
}

impl ThresholdMetric {
    fn parse(name: &str) -> LoadTestResult<Self> {
        match name {
            METRIC_HTTP_REQ_FAILED => Ok(ThresholdMetric::HttpReqFailed),
            METRIC_HTTP_REQ_DURATION => Ok(ThresholdMetric::HttpReqDuration),
            METRIC_CHECKS => Ok(ThresholdMetric::Checks),
            other => Err(LoadTestError::InvalidThreshold(format!("unknown metric '{}'", other))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ThresholdMetric::HttpReqFailed => METRIC_HTTP_REQ_FAILED,
            ThresholdMetric::HttpReqDuration => METRIC_HTTP_REQ_DURATION,
            ThresholdMetric::Checks => METRIC_CHECKS,
        }
    }

    fn is_rate(&self) -> bool {
        !matches!(self, ThresholdMetric::HttpReqDuration)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Aggregation {
    Rate,
    Avg,
    Min,
    Max,
    Med,
    /// Percentile in 0..=100.
    Percentile(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
}

impl Comparison {
    fn holds(&self, observed: f64, target: f64) -> bool {
        match self {
            Comparison::Lt => observed < target,
            Comparison::Le => observed <= target,
            Comparison::Gt => observed > target,
            Comparison::Ge => observed >= target,
            Comparison::Eq => (observed - target).abs() < f64::EPSILON,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Threshold {
    pub metric: ThresholdMetric,
    pub aggregation: Aggregation,
    pub comparison: Comparison,
    pub target: f64,
    pub source: String,
}

impl Threshold {
    pub fn parse(metric: &str, expression: &str) -> LoadTestResult<Self> {
        let metric = ThresholdMetric::parse(metric)?;
        let invalid = || {
            LoadTestError::InvalidThreshold(format!("'{}' on {}", expression, metric.as_str()))
        };

        let caps = EXPRESSION.captures(expression).ok_or_else(invalid)?;

        let aggregation = match &caps[1] {
            "rate" => Aggregation::Rate,
            "avg" => Aggregation::Avg,
            "min" => Aggregation::Min,
            "max" => Aggregation::Max,
            "med" => Aggregation::Med,
            _ => {
                let p: f64 = caps[2].parse().map_err(|_| invalid())?;
                if !(0.0..=100.0).contains(&p) {
                    return Err(invalid());
                }
                Aggregation::Percentile(p)
            }
        };

        // rate only makes sense on rate metrics, and only rate does
        if metric.is_rate() != (aggregation == Aggregation::Rate) {
            return Err(invalid());
        }

        let comparison = match &caps[3] {
            "<" => Comparison::Lt,
            "<=" => Comparison::Le,
            ">" => Comparison::Gt,
            ">=" => Comparison::Ge,
            _ => Comparison::Eq,
        };
        let target: f64 = caps[4].parse().map_err(|_| invalid())?;

        Ok(Self {
            metric,
            aggregation,
            comparison,
            target,
            source: expression.trim().to_string(),
        })
    }

    pub fn observe(&self, collector: &MetricsCollector) -> f64 {
        match (self.metric, self.aggregation) {
            (ThresholdMetric::HttpReqFailed, _) => collector.snapshot().requests.failure_rate(),
            (ThresholdMetric::Checks, _) => collector.snapshot().checks_total().pass_rate(),
            (ThresholdMetric::HttpReqDuration, aggregation) => {
                let stats = collector.latency_stats();
                match aggregation {
                    Aggregation::Avg => stats.mean,
                    Aggregation::Min => stats.min,
                    Aggregation::Max => stats.max,
                    Aggregation::Med => stats.p50,
                    Aggregation::Percentile(p) => collector.latency_at_quantile(p / 100.0),
                    Aggregation::Rate => 0.0,
                }
            }
        }
    }

    pub fn evaluate(&self, collector: &MetricsCollector) -> ThresholdResult {
        let observed = self.observe(collector);
        ThresholdResult {
            threshold: self.clone(),
            observed,
            passed: self.comparison.holds(observed, self.target),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ThresholdResult {
    pub threshold: Threshold,
    pub observed: f64,
    pub passed: bool,
}

impl fmt::Display for ThresholdResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} (observed {:.4})",
            self.threshold.metric.as_str(),
            self.threshold.source,
            self.observed
        )
    }
}

pub fn evaluate_all(thresholds: &[Threshold], collector: &MetricsCollector) -> Vec<ThresholdResult> {
    thresholds.iter().map(|t| t.evaluate(collector)).collect()
}
