//! In-memory pilot skill-state repository.
//!
//! Implements `PilotSkillRepository` from `vanguard-core`. Rows are keyed by
//! `(pilot_id, skill_id)`; compare-and-swap holds the row's shard lock for the
//! whole compare-then-write, which makes it the single writer for that pair.

use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use vanguard_core::repository::pilot_skill::PilotSkillRepository;
use vanguard_types::error::RepositoryError;
use vanguard_types::pilot::{PilotId, PilotSkillState};
use vanguard_types::skill::SkillId;

type RowKey = (PilotId, SkillId);

/// `DashMap`-backed implementation of `PilotSkillRepository`.
#[derive(Debug, Default)]
pub struct InMemoryPilotSkillRepository {
    rows: DashMap<RowKey, PilotSkillState>,
}

impl InMemoryPilotSkillRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed rows without conflict checks, e.g. from a roster file.
    pub fn with_states(states: impl IntoIterator<Item = PilotSkillState>) -> Self {
        let repo = Self::new();
        for state in states {
            repo.rows
                .insert((state.pilot_id.clone(), state.skill_id.clone()), state);
        }
        repo
    }
}

fn key_of(state: &PilotSkillState) -> RowKey {
    (state.pilot_id.clone(), state.skill_id.clone())
}

impl PilotSkillRepository for InMemoryPilotSkillRepository {
    async fn get(
        &self,
        pilot_id: &PilotId,
        skill_id: &SkillId,
    ) -> Result<Option<PilotSkillState>, RepositoryError> {
        Ok(self
            .rows
            .get(&(pilot_id.clone(), skill_id.clone()))
            .map(|entry| entry.value().clone()))
    }

    async fn list_for_pilot(&self, pilot_id: &PilotId) -> Result<Vec<PilotSkillState>, RepositoryError> {
        let mut states: Vec<PilotSkillState> = self
            .rows
            .iter()
            .filter(|entry| &entry.key().0 == pilot_id)
            .map(|entry| entry.value().clone())
            .collect();
        states.sort_by(|a, b| a.skill_id.cmp(&b.skill_id));
        Ok(states)
    }

    async fn insert(&self, state: &PilotSkillState) -> Result<PilotSkillState, RepositoryError> {
        match self.rows.entry(key_of(state)) {
            Entry::Occupied(_) => Err(RepositoryError::Conflict(format!(
                "pilot {} already has skill '{}'",
                state.pilot_id, state.skill_id
            ))),
            Entry::Vacant(slot) => {
                let stored = PilotSkillState {
                    updated_at: Utc::now(),
                    ..state.clone()
                };
                slot.insert(stored.clone());
                Ok(stored)
            }
        }
    }

    async fn compare_and_swap(
        &self,
        expected: &PilotSkillState,
        new: &PilotSkillState,
    ) -> Result<PilotSkillState, RepositoryError> {
        if key_of(expected) != key_of(new) {
            return Err(RepositoryError::Query(
                "compare_and_swap cannot change the row key".to_string(),
            ));
        }

        let mut stored = self
            .rows
            .get_mut(&key_of(expected))
            .ok_or(RepositoryError::NotFound)?;
        if !stored.same_progress(expected) {
            return Err(RepositoryError::Conflict(format!(
                "skill '{}' changed since it was read",
                expected.skill_id
            )));
        }

        *stored = new.clone();
        Ok(new.clone())
    }
}
