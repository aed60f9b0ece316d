use crate::constants::{CHECK_CREATE_PR, CHECK_MERGE_PR};
use crate::ids;
use crate::models::{MergePullRequest, NewPullRequest, NewTeam};
use crate::workflows::{IterationOutcome, SetupData, Workload};

impl Workload {
    /// Open a pull request for a random known team member, then merge it.
    ///
    /// With an empty registry a temporary team is created first; if the
    /// service does not answer 201 the iteration stops there. The merge is
    /// sent even when the create call failed.
    pub async fn pr_workflow(&self, data: &SetupData) -> IterationOutcome {
        let timeout = self.options.request_timeout;

        if self.registry.is_empty() {
            let team = NewTeam::new(ids::temp_team_name(), ids::fresh_members());
            let created = self.api.add_team(&data.token, &team, timeout).await;
            self.observe(&created);

            if !created.status_is(201) {
                tracing::debug!(status = ?created.status, "temporary team not created, skipping iteration");
                return IterationOutcome::ShortCircuited;
            }
            self.registry.push(team.to_record());
        }

        let Some(author_id) = self
            .registry
            .choose_random()
            .and_then(|team| ids::random_item(&team.user_ids))
        else {
            return IterationOutcome::ShortCircuited;
        };

        let pull_request = NewPullRequest {
            author_id,
            pull_request_id: ids::generate_uuid(),
            pull_request_name: ids::pull_request_name(),
        };

        let created = self
            .api
            .create_pull_request(&data.token, &pull_request, timeout)
            .await;
        self.observe(&created);
        self.check(CHECK_CREATE_PR, created.status_is(201), &created);

        let merge = MergePullRequest {
            pull_request_id: pull_request.pull_request_id,
        };
        let merged = self.api.merge_pull_request(&data.token, &merge, timeout).await;
        self.observe(&merged);
        self.check(CHECK_MERGE_PR, merged.status_is(200), &merged);

        self.pace().await;
        IterationOutcome::Completed
    }
}
