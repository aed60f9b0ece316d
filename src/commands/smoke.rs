use clap::ArgMatches;
use colored::*;

use crate::commands::context_builder;
use crate::engine::LoadTest;
use crate::error::LoadTestResult;
use crate::workflows::IterationOutcome;

/// One pass through each workflow against the configured service.
pub async fn handle_smoke(matches: &ArgMatches) -> LoadTestResult<bool> {
    let mut context = context_builder(matches)?.build()?;
    let client = context.client()?;
    let load_test = LoadTest::from_context(&mut context)?;

    let report = load_test.smoke(Some(client.as_ref())).await?;

    println!("{}: {}", "Seed teams".bold(), report.seeded_teams);
    println!("{}: {:?}", "Team workflow".bold(), report.team);
    match report.pull_request {
        IterationOutcome::Completed => println!("{}: Completed", "PR workflow".bold()),
        IterationOutcome::ShortCircuited => println!(
            "{}: {}",
            "PR workflow".bold(),
            "skipped (no team available)".yellow()
        ),
    }
    for (name, counts) in &report.metrics.checks {
        let mark = if counts.fails == 0 { "✅" } else { "❌" };
        println!("  {} {}", mark, name);
    }
    match report.roundtrip {
        Some(true) => println!("  ✅ team read back with submitted members"),
        Some(false) => println!("  ❌ team read back differs from what was submitted"),
        None => {}
    }

    if report.passed() {
        println!("{}", "Smoke test passed".green().bold());
    } else {
        println!("{}", "Smoke test failed".red().bold());
    }
    Ok(report.passed())
}
