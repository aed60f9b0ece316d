//! Console reporting: periodic progress lines and the end-of-run summary

use colored::*;
use tokio::time::{interval, Duration};

use super::collector::MetricsCollector;
use super::types::RunSummary;

/// Log a progress line every `interval_secs` until the task is aborted.
pub async fn start_periodic_reporter(collector: MetricsCollector, interval_secs: u64) {
    let mut ticker = interval(Duration::from_secs(interval_secs.max(1)));
    // First tick fires immediately
    ticker.tick().await;

    loop {
        ticker.tick().await;
        log_progress(&collector);
    }
}

pub fn log_progress(collector: &MetricsCollector) {
    let snapshot = collector.snapshot();
    let latency = collector.latency_stats();
    let checks = snapshot.checks_total();

    for (scenario, iterations) in &snapshot.iterations {
        tracing::info!(
            scenario = %scenario,
            started = iterations.started,
            in_flight = iterations.in_flight,
            dropped = iterations.dropped,
            "iterations"
        );
    }
    tracing::info!(
        elapsed_s = collector.elapsed().as_secs(),
        requests = snapshot.requests.total,
        failed = snapshot.requests.failed,
        checks_passed = checks.passes,
        checks_failed = checks.fails,
        p99_ms = latency.p99,
        "progress"
    );
}

fn mark(passed: bool) -> ColoredString {
    if passed {
        "✓".green()
    } else {
        "✗".red()
    }
}

pub fn print_final_report(summary: &RunSummary) {
    let metrics = &summary.metrics;
    let latency = &summary.latency;

    println!("\n{}", "════════════════ LOAD TEST SUMMARY ════════════════".bold());

    if !metrics.checks.is_empty() {
        println!("\n{}", "CHECKS".bold());
        for (name, counts) in &metrics.checks {
            println!(
                "  {} {:<20} {:>6.2}%  ✓ {:<8} ✗ {}",
                mark(counts.fails == 0),
                name,
                counts.pass_rate() * 100.0,
                counts.passes,
                counts.fails
            );
        }
    }

    println!("\n{}", "HTTP".bold());
    println!("  Requests:     {:>10}", metrics.requests.total);
    println!(
        "  Failed:       {:>10}  ({:.4}%)",
        metrics.requests.failed,
        metrics.requests.failure_rate() * 100.0
    );
    if latency.count > 0 {
        println!(
            "  Duration:     avg={:.2}ms min={:.2}ms med={:.2}ms p(90)={:.2}ms p(95)={:.2}ms p(99)={:.2}ms max={:.2}ms",
            latency.mean, latency.min, latency.p50, latency.p90, latency.p95, latency.p99, latency.max
        );
    }

    if !metrics.iterations.is_empty() {
        println!("\n{}", "ITERATIONS".bold());
        let secs = summary.elapsed.as_secs_f64().max(f64::EPSILON);
        for (scenario, iterations) in &metrics.iterations {
            println!(
                "  {:<16} started={} completed={} short_circuited={} dropped={} ({:.1}/s)",
                scenario,
                iterations.started,
                iterations.completed,
                iterations.short_circuited,
                iterations.dropped,
                iterations.started as f64 / secs
            );
        }
    }

    if !summary.thresholds.is_empty() {
        println!("\n{}", "THRESHOLDS".bold());
        for result in &summary.thresholds {
            println!("  {} {}", mark(result.passed), result);
        }
    }

    println!("\nTest duration: {:.2}s", summary.elapsed.as_secs_f64());
    if summary.passed() {
        println!("{}", "All thresholds passed".green().bold());
    } else {
        println!("{}", "Some thresholds were crossed".red().bold());
    }
}
