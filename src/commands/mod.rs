pub mod config;
pub mod run;
pub mod smoke;

use clap::ArgMatches;

use crate::context::RunContextBuilder;
use crate::error::{LoadTestError, LoadTestResult};
use crate::models::WorkflowKind;

/// Apply the flags shared by `run` and `smoke` to a context builder.
pub(crate) fn context_builder(matches: &ArgMatches) -> LoadTestResult<RunContextBuilder> {
    let mut builder = RunContextBuilder::new();

    if let Some(path) = matches.get_one::<String>("config") {
        builder = builder.with_config_path(path);
    }
    if let Some(base_url) = matches.get_one::<String>("base-url") {
        builder = builder.with_base_url(base_url.clone());
    }

    Ok(builder)
}

pub(crate) fn parse_number<T: std::str::FromStr>(matches: &ArgMatches, name: &str) -> LoadTestResult<Option<T>> {
    matches
        .try_get_one::<String>(name)
        .ok()
        .flatten()
        .map(|raw| {
            raw.parse::<T>()
                .map_err(|_| LoadTestError::InvalidInput(format!("--{} expects a number, got '{}'", name, raw)))
        })
        .transpose()
}

pub(crate) fn parse_workflow(raw: &str) -> LoadTestResult<WorkflowKind> {
    match raw {
        "team" => Ok(WorkflowKind::Team),
        "pr" | "pull_request" => Ok(WorkflowKind::PullRequest),
        other => Err(crate::loadtest_error!(
            InvalidInput,
            "unknown workflow '{}', expected team or pr",
            other
        )),
    }
}
