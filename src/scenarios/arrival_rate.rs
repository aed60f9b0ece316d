//! Constant-arrival-rate driver: start iterations on a fixed clock, regardless
//! of how long earlier ones take.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::{interval, Instant, MissedTickBehavior};

use crate::config::ScenarioConfig;
use crate::workflows::{IterationOutcome, SetupData, Workload};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScenarioReport {
    pub name: String,
    pub scheduled: usize,
    pub dropped: usize,
    pub completed: usize,
    pub short_circuited: usize,
    pub panicked: usize,
}

/// Drive `scenario.exec` at `rate` per `time_unit` for the scenario duration.
///
/// At most `max_vus` iterations run at once; an iteration that comes due with
/// every slot taken is dropped and counted. In-flight iterations are awaited
/// before returning.
pub async fn run_scenario(
    scenario: &ScenarioConfig,
    workload: Arc<Workload>,
    data: Arc<SetupData>,
) -> ScenarioReport {
    let metrics = workload.metrics().clone();
    let slots = Arc::new(Semaphore::new(scenario.max_vus));
    let mut over_pre_allocated = false;
    let mut report = ScenarioReport {
        name: scenario.name.clone(),
        ..ScenarioReport::default()
    };

    tracing::info!(
        scenario = %scenario.name,
        exec = %scenario.exec,
        rate = scenario.rate,
        time_unit_ms = scenario.time_unit_ms,
        duration_s = scenario.duration_secs,
        max_vus = scenario.max_vus,
        "starting scenario"
    );

    let mut ticker = interval(scenario.arrival_interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Burst);
    let mut iterations = JoinSet::new();
    let start = Instant::now();
    let duration = scenario.duration();

    loop {
        ticker.tick().await;
        if start.elapsed() >= duration {
            break;
        }
        report.scheduled += 1;

        let permit = match slots.clone().try_acquire_owned() {
            Ok(permit) => permit,
            Err(_) => {
                report.dropped += 1;
                metrics.iteration_dropped(&scenario.name);
                continue;
            }
        };

        let busy = scenario.max_vus - slots.available_permits();
        if busy > scenario.pre_allocated_vus && !over_pre_allocated {
            over_pre_allocated = true;
            tracing::info!(
                scenario = %scenario.name,
                busy,
                pre_allocated = scenario.pre_allocated_vus,
                "in-flight iterations exceed pre-allocated VUs"
            );
        }

        let name = scenario.name.clone();
        let kind = scenario.exec;
        let workload = workload.clone();
        let data = data.clone();
        iterations.spawn(async move {
            let _permit = permit;
            workload.metrics().iteration_started(&name);
            let outcome = workload.run(kind, &data).await;
            match outcome {
                IterationOutcome::Completed => workload.metrics().iteration_completed(&name),
                IterationOutcome::ShortCircuited => workload.metrics().iteration_short_circuited(&name),
            }
            outcome
        });

        // Reap what already finished
        while let Some(joined) = iterations.try_join_next() {
            tally(&mut report, joined);
        }
    }

    tracing::info!(
        scenario = %scenario.name,
        in_flight = iterations.len(),
        "scenario duration elapsed, waiting for in-flight iterations"
    );
    while let Some(joined) = iterations.join_next().await {
        tally(&mut report, joined);
    }

    tracing::info!(
        scenario = %report.name,
        scheduled = report.scheduled,
        completed = report.completed,
        short_circuited = report.short_circuited,
        dropped = report.dropped,
        "scenario finished"
    );
    report
}

fn tally(report: &mut ScenarioReport, joined: Result<IterationOutcome, tokio::task::JoinError>) {
    match joined {
        Ok(IterationOutcome::Completed) => report.completed += 1,
        Ok(IterationOutcome::ShortCircuited) => report.short_circuited += 1,
        Err(e) => {
            tracing::error!(scenario = %report.name, error = %e, "iteration task panicked");
            report.panicked += 1;
        }
    }
}
