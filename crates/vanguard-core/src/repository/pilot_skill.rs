//! Pilot skill-state repository trait definition.

use vanguard_types::error::RepositoryError;
use vanguard_types::pilot::{PilotId, PilotSkillState};
use vanguard_types::skill::SkillId;

/// Persistence for per-(pilot, skill) progress rows.
///
/// Implementations must make [`compare_and_swap`](Self::compare_and_swap)
/// atomic per `(pilot_id, skill_id)`: it is the single-writer guard that
/// keeps validate-then-write sequences from interleaving.
pub trait PilotSkillRepository: Send + Sync {
    /// Get one pilot's row for a skill.
    fn get(
        &self,
        pilot_id: &PilotId,
        skill_id: &SkillId,
    ) -> impl std::future::Future<Output = Result<Option<PilotSkillState>, RepositoryError>> + Send;

    /// List every row held by a pilot.
    fn list_for_pilot(
        &self,
        pilot_id: &PilotId,
    ) -> impl std::future::Future<Output = Result<Vec<PilotSkillState>, RepositoryError>> + Send;

    /// Insert a new row. Fails with `Conflict` if the pair already exists.
    fn insert(
        &self,
        state: &PilotSkillState,
    ) -> impl std::future::Future<Output = Result<PilotSkillState, RepositoryError>> + Send;

    /// Replace `expected` with `new` only if the stored row still has the same
    /// progress as `expected`. Fails with `Conflict` otherwise and with
    /// `NotFound` if the row is gone.
    fn compare_and_swap(
        &self,
        expected: &PilotSkillState,
        new: &PilotSkillState,
    ) -> impl std::future::Future<Output = Result<PilotSkillState, RepositoryError>> + Send;
}
