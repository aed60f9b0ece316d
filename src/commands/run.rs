use clap::ArgMatches;
use colored::*;

use crate::commands::{context_builder, parse_number, parse_workflow};
use crate::engine::LoadTest;
use crate::error::LoadTestResult;
use crate::metrics::reporter::print_final_report;

/// Full load run. Returns whether every threshold held.
pub async fn handle_run(matches: &ArgMatches) -> LoadTestResult<bool> {
    let mut builder = context_builder(matches)?;

    if let Some(rate) = parse_number::<u32>(matches, "rate")? {
        builder = builder.with_rate(rate);
    }
    if let Some(duration) = parse_number::<u64>(matches, "duration")? {
        builder = builder.with_duration_secs(duration);
    }
    if let Some(max_vus) = parse_number::<usize>(matches, "max-vus")? {
        builder = builder.with_max_vus(max_vus);
    }
    if let Some(pacing_ms) = parse_number::<u64>(matches, "pacing-ms")? {
        builder = builder.with_pacing_ms(pacing_ms);
    }
    if let Some(only) = matches.get_one::<String>("only") {
        builder = builder.only(parse_workflow(only)?);
    }

    let mut context = builder.build()?;
    tracing::info!(base_url = %context.config().base_url, "target service");
    for scenario in &context.config().scenarios {
        tracing::info!(
            "scenario {}: {} x{}/{}ms for {}s, {}-{} VUs",
            scenario.name,
            scenario.exec,
            scenario.rate,
            scenario.time_unit_ms,
            scenario.duration_secs,
            scenario.pre_allocated_vus,
            scenario.max_vus
        );
    }

    let load_test = LoadTest::from_context(&mut context)?;
    let summary = load_test.run().await?;

    print_final_report(&summary);
    if !summary.passed() {
        for failed in summary.failed_thresholds() {
            eprintln!("{} {}", "threshold crossed:".red().bold(), failed);
        }
    }

    Ok(summary.passed())
}
