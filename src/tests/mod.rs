mod engine_tests;
mod error_tests;

use std::sync::Arc;
use std::time::Duration;

use crate::metrics::MetricsCollector;
use crate::registry::TeamRegistry;
use crate::workflows::{Workload, WorkloadOptions};
use fake_api::FakeApi;

/// Workload over a fake service, without the end-of-iteration pause.
pub(crate) fn workload_with(api: Arc<FakeApi>) -> Workload {
    workload_with_options(
        api,
        WorkloadOptions {
            pacing: Duration::ZERO,
            ..WorkloadOptions::default()
        },
    )
}

pub(crate) fn workload_with_options(api: Arc<FakeApi>, options: WorkloadOptions) -> Workload {
    Workload::new(api, TeamRegistry::new(), MetricsCollector::new(), options)
}
