use crate::constants::{CHECK_CREATE_TEAM, CHECK_GET_TEAM};
use crate::ids;
use crate::models::NewTeam;
use crate::workflows::{IterationOutcome, SetupData, Workload};

impl Workload {
    /// Create a team, read it back, remember it if it is new.
    pub async fn team_workflow(&self, data: &SetupData) -> IterationOutcome {
        let timeout = self.options.request_timeout;
        let team = NewTeam::new(ids::team_name(), ids::fresh_members());

        let created = self.api.add_team(&data.token, &team, timeout).await;
        self.observe(&created);
        self.check(CHECK_CREATE_TEAM, created.status_in(&[201, 304]), &created);

        let fetched = self.api.get_team(&data.token, &team.team_name, timeout).await;
        self.observe(&fetched);
        self.check(CHECK_GET_TEAM, fetched.status_is(200), &fetched);

        // 304 means somebody else owns that name; only fresh teams are reused
        if created.status_is(201) {
            self.registry.push(team.to_record());
        }

        self.pace().await;
        IterationOutcome::Completed
    }
}
