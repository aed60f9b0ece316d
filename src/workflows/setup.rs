use crate::error::LoadTestResult;
use crate::ids;
use crate::models::NewTeam;
use crate::workflows::{SetupData, Workload};

/// 201 created, 304 already there.
const SEED_ACCEPTED: [u16; 2] = [201, 304];

impl Workload {
    /// Log in and seed the registry; runs once before any iteration.
    ///
    /// A missing token aborts the run. Seed teams the service refuses are
    /// skipped without retry, so the registry ends up with anywhere between
    /// zero and `seed_team_count` entries.
    pub async fn setup(&self) -> LoadTestResult<SetupData> {
        let login = self.api.dummy_login().await;
        self.observe(&login.outcome);
        let token = login.token?;
        tracing::info!("obtained session token");

        for index in 0..self.options.seed_team_count {
            let team = NewTeam::new(ids::seed_team_name(index), ids::fresh_members());
            let outcome = self
                .api
                .add_team(&token, &team, self.options.setup_timeout)
                .await;
            self.observe(&outcome);

            if outcome.status_in(&SEED_ACCEPTED) {
                self.registry.push(team.to_record());
            } else {
                tracing::debug!(
                    team = %team.team_name,
                    status = ?outcome.status,
                    error = ?outcome.error,
                    "seed team not recorded"
                );
            }
        }

        tracing::info!(
            seeded = self.registry.len(),
            requested = self.options.seed_team_count,
            "setup complete"
        );
        Ok(SetupData { token })
    }
}
