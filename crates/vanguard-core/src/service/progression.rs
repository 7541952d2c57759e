//! Pilot progression service.
//!
//! Wraps the pure engine with repository access: granting XP, toggling a
//! skill's active flag behind the prerequisite validator, and building the
//! per-pilot progression summary. Every write goes through the repository's
//! compare-and-swap so a validate-then-write sequence never lands on top of a
//! concurrent change to the same `(pilot, skill)` row; a lost race re-reads
//! and re-validates.

use chrono::Utc;

use vanguard_types::config::EngineConfig;
use vanguard_types::error::{ProgressionError, RepositoryError};
use vanguard_types::pilot::{PilotId, PilotSkillState};
use vanguard_types::progression::{
    ActivationCheck, DeactivationCheck, LevelProgress, ProgressionSummary, XpGain,
};
use vanguard_types::skill::{Skill, SkillId};

use crate::progression::curve;
use crate::progression::index::calculate_weighted_index;
use crate::progression::prerequisite::{
    PilotSkills, SkillGraph, can_activate_skill, can_deactivate_skill,
};
use crate::progression::stats::build_progression_stats;
use crate::repository::catalog::SkillCatalogRepository;
use crate::repository::pilot_skill::PilotSkillRepository;

/// Service orchestrating pilot skill progression.
///
/// Generic over repository traits to maintain clean architecture --
/// vanguard-core never depends on vanguard-infra.
pub struct ProgressionService<C: SkillCatalogRepository, P: PilotSkillRepository> {
    catalog: C,
    pilot_skills: P,
    config: EngineConfig,
}

impl<C: SkillCatalogRepository, P: PilotSkillRepository> ProgressionService<C, P> {
    pub fn new(catalog: C, pilot_skills: P, config: EngineConfig) -> Self {
        Self {
            catalog,
            pilot_skills,
            config,
        }
    }

    /// Add XP to a pilot skill, acquiring the skill on first gain.
    pub async fn grant_xp(
        &self,
        pilot_id: &PilotId,
        skill_id: &SkillId,
        amount: u64,
    ) -> Result<XpGain, ProgressionError> {
        let skill = self.load_skill(skill_id).await?;

        for attempt in 0..=self.config.max_write_retries {
            let current = match self
                .pilot_skills
                .get(pilot_id, skill_id)
                .await
                .map_err(storage)?
            {
                Some(state) => state,
                None => {
                    let fresh = PilotSkillState::acquired(pilot_id.clone(), skill_id.clone());
                    match self.pilot_skills.insert(&fresh).await {
                        Ok(state) => state,
                        Err(RepositoryError::Conflict(_)) => {
                            tracing::debug!(%skill_id, attempt, "row created concurrently, retrying");
                            continue;
                        }
                        Err(e) => return Err(storage(e)),
                    }
                }
            };

            let mut next = current.clone();
            let gain = curve::apply_xp_gain(&mut next, amount, skill.multiplier);
            next.updated_at = Utc::now();

            if self.swap(&current, &next, attempt).await?.is_some() {
                tracing::info!(
                    %pilot_id,
                    %skill_id,
                    amount,
                    level = gain.level,
                    leveled_up = gain.leveled_up(),
                    "granted xp"
                );
                return Ok(gain);
            }
        }

        Err(ProgressionError::Conflict(skill_id.clone()))
    }

    /// Dry-run of [`activate_skill`](Self::activate_skill).
    pub async fn check_activation(
        &self,
        pilot_id: &PilotId,
        skill_id: &SkillId,
    ) -> Result<ActivationCheck, ProgressionError> {
        self.load_skill(skill_id).await?;
        let graph = self.load_graph().await?;
        let pilot = self.load_pilot(pilot_id).await?;
        Ok(can_activate_skill(&graph, &pilot, skill_id))
    }

    /// Dry-run of [`deactivate_skill`](Self::deactivate_skill).
    pub async fn check_deactivation(
        &self,
        pilot_id: &PilotId,
        skill_id: &SkillId,
    ) -> Result<DeactivationCheck, ProgressionError> {
        self.load_skill(skill_id).await?;
        let graph = self.load_graph().await?;
        let pilot = self.load_pilot(pilot_id).await?;
        Ok(can_deactivate_skill(&graph, &pilot, skill_id))
    }

    /// Switch a learned skill on once all of its prerequisites are met.
    ///
    /// Activating an already active skill succeeds without writing.
    pub async fn activate_skill(
        &self,
        pilot_id: &PilotId,
        skill_id: &SkillId,
    ) -> Result<PilotSkillState, ProgressionError> {
        self.load_skill(skill_id).await?;
        let graph = self.load_graph().await?;

        for attempt in 0..=self.config.max_write_retries {
            let pilot = self.load_pilot(pilot_id).await?;
            let current = pilot
                .get(skill_id)
                .cloned()
                .ok_or_else(|| ProgressionError::NotLearned(skill_id.clone()))?;
            if current.active {
                return Ok(current);
            }

            let check = can_activate_skill(&graph, &pilot, skill_id);
            if !check.can_activate {
                return Err(ProgressionError::MissingPrerequisites(
                    check.missing_prerequisites,
                ));
            }

            let next = PilotSkillState {
                active: true,
                updated_at: Utc::now(),
                ..current.clone()
            };
            if let Some(stored) = self.swap(&current, &next, attempt).await? {
                tracing::info!(%pilot_id, %skill_id, "skill activated");
                return Ok(stored);
            }
        }

        Err(ProgressionError::Conflict(skill_id.clone()))
    }

    /// Switch a skill off unless an active skill still depends on it.
    ///
    /// Deactivating an inactive skill succeeds without writing.
    pub async fn deactivate_skill(
        &self,
        pilot_id: &PilotId,
        skill_id: &SkillId,
    ) -> Result<PilotSkillState, ProgressionError> {
        self.load_skill(skill_id).await?;
        let graph = self.load_graph().await?;

        for attempt in 0..=self.config.max_write_retries {
            let pilot = self.load_pilot(pilot_id).await?;
            let current = pilot
                .get(skill_id)
                .cloned()
                .ok_or_else(|| ProgressionError::NotLearned(skill_id.clone()))?;
            if !current.active {
                return Ok(current);
            }

            let check = can_deactivate_skill(&graph, &pilot, skill_id);
            if !check.can_deactivate {
                return Err(ProgressionError::ActiveDependents(check.dependent_skills));
            }

            let next = PilotSkillState {
                active: false,
                updated_at: Utc::now(),
                ..current.clone()
            };
            if let Some(stored) = self.swap(&current, &next, attempt).await? {
                tracing::info!(%pilot_id, %skill_id, "skill deactivated");
                return Ok(stored);
            }
        }

        Err(ProgressionError::Conflict(skill_id.clone()))
    }

    /// Progress bar data for one pilot skill.
    pub async fn skill_progress(
        &self,
        pilot_id: &PilotId,
        skill_id: &SkillId,
    ) -> Result<LevelProgress, ProgressionError> {
        let skill = self.load_skill(skill_id).await?;
        let state = self
            .pilot_skills
            .get(pilot_id, skill_id)
            .await
            .map_err(storage)?
            .ok_or_else(|| ProgressionError::NotLearned(skill_id.clone()))?;

        if !curve::is_consistent(&state, skill.multiplier) {
            tracing::warn!(
                %pilot_id,
                %skill_id,
                xp = state.xp,
                level = state.current_level,
                "stored level does not match xp"
            );
        }

        Ok(curve::progress(state.xp, state.current_level, skill.multiplier))
    }

    /// Statistics snapshot and progression index for a pilot.
    pub async fn progression_summary(
        &self,
        pilot_id: &PilotId,
    ) -> Result<ProgressionSummary, ProgressionError> {
        let skills = self.catalog.list_skills().await.map_err(storage)?;
        let states = self
            .pilot_skills
            .list_for_pilot(pilot_id)
            .await
            .map_err(storage)?;

        let stats = build_progression_stats(&skills, &states);
        let index = calculate_weighted_index(&stats, &self.config.index_weights);
        Ok(ProgressionSummary { stats, index })
    }

    async fn load_skill(&self, skill_id: &SkillId) -> Result<Skill, ProgressionError> {
        self.catalog
            .get_skill(skill_id)
            .await
            .map_err(storage)?
            .ok_or_else(|| ProgressionError::SkillNotFound(skill_id.clone()))
    }

    async fn load_graph(&self) -> Result<SkillGraph, ProgressionError> {
        let edges = self.catalog.list_edges().await.map_err(storage)?;
        if self.config.reject_cyclic_catalogs {
            let skills = self.catalog.list_skills().await.map_err(storage)?;
            Ok(SkillGraph::validated(&skills, &edges)?)
        } else {
            Ok(SkillGraph::from_edges(edges))
        }
    }

    async fn load_pilot(&self, pilot_id: &PilotId) -> Result<PilotSkills, ProgressionError> {
        let states = self
            .pilot_skills
            .list_for_pilot(pilot_id)
            .await
            .map_err(storage)?;
        Ok(PilotSkills::from_states(states))
    }

    /// Compare-and-swap one row. `Ok(None)` means another writer got there first.
    async fn swap(
        &self,
        expected: &PilotSkillState,
        next: &PilotSkillState,
        attempt: u32,
    ) -> Result<Option<PilotSkillState>, ProgressionError> {
        match self.pilot_skills.compare_and_swap(expected, next).await {
            Ok(stored) => Ok(Some(stored)),
            Err(RepositoryError::Conflict(reason)) => {
                tracing::debug!(skill_id = %expected.skill_id, attempt, %reason, "write conflict, retrying");
                Ok(None)
            }
            Err(e) => Err(storage(e)),
        }
    }
}

fn storage(e: RepositoryError) -> ProgressionError {
    ProgressionError::StorageError(e.to_string())
}
