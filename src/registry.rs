use std::sync::Arc;

use parking_lot::RwLock;
use rand::seq::SliceRandom;

use crate::models::TeamRecord;

/// Process-wide, append-only list of teams known to exist on the service.
///
/// Cloning the handle shares the same list. Entries are never edited or
/// removed; concurrent appends from any number of iterations are serialized
/// by the lock.
#[derive(Clone, Default)]
pub struct TeamRegistry {
    teams: Arc<RwLock<Vec<TeamRecord>>>,
}

impl TeamRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, team: TeamRecord) {
        self.teams.write().push(team);
    }

    pub fn len(&self) -> usize {
        self.teams.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.read().is_empty()
    }

    /// Uniformly random team, cloned out so no lock is held across I/O.
    pub fn choose_random(&self) -> Option<TeamRecord> {
        let teams = self.teams.read();
        teams.choose(&mut rand::thread_rng()).cloned()
    }

    pub fn snapshot(&self) -> Vec<TeamRecord> {
        self.teams.read().clone()
    }
}

impl std::fmt::Debug for TeamRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TeamRegistry").field("len", &self.len()).finish()
    }
}
