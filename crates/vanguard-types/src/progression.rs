//! Progression result and input types.
//!
//! These are the structured values the engine hands back to the service layer:
//! level progress for display, activation/deactivation verdicts, the
//! pre-aggregated statistics snapshot and the composite progression index.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::skill::{MAX_LEVEL, SkillId};

/// Progress inside the current level.
///
/// `current` is signed: a stored row that violates the level invariant can
/// sit below its level's threshold and must not wrap around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelProgress {
    pub current: i64,
    pub required: i64,
    pub percentage: u8,
}

/// A prerequisite the pilot has not yet reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingPrerequisite {
    pub skill_id: SkillId,
    pub required_level: u8,
    pub current_level: u8,
}

/// Verdict of an activation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivationCheck {
    pub can_activate: bool,
    pub missing_prerequisites: Vec<MissingPrerequisite>,
}

/// Verdict of a deactivation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeactivationCheck {
    pub can_deactivate: bool,
    pub dependent_skills: Vec<SkillId>,
}

/// Pre-aggregated per-pilot statistics, built fresh per request.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressionStats {
    pub total_skills: u32,
    pub learned_skills: u32,
    pub active_skills: u32,
    #[serde(rename = "totalXP")]
    pub total_xp: u64,
    /// Count of learned skills at each level `0..=5`.
    pub skills_by_level: [u32; MAX_LEVEL as usize + 1],
    /// Count of learned skills per multiplier value (`1..=5`).
    #[serde(default)]
    pub multiplier_stats: BTreeMap<u8, u32>,
}

/// The five unrounded inputs of the progression index.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct IndexComponents {
    /// Percentage of the catalog the pilot has learned.
    #[serde(rename = "HS")]
    pub learned_percent: f64,
    /// Average level among learned skills.
    #[serde(rename = "AL")]
    pub average_level: f64,
    /// Total XP, passed through.
    #[serde(rename = "XP")]
    pub total_xp: f64,
    /// Percentage of learned skills currently active.
    #[serde(rename = "AS")]
    pub active_percent: f64,
    /// Average multiplier among learned skills.
    #[serde(rename = "MP")]
    pub multiplier_weight: f64,
}

/// Composite score summarizing a pilot's overall advancement.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ProgressionIndex {
    pub index: i64,
    pub components: IndexComponents,
}

impl ProgressionIndex {
    pub fn zero() -> Self {
        Self::default()
    }
}

/// A pilot's statistics snapshot together with the index derived from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionSummary {
    pub stats: ProgressionStats,
    pub index: ProgressionIndex,
}

/// Outcome of applying an XP gain to one pilot skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XpGain {
    pub skill_id: SkillId,
    pub previous_xp: u64,
    pub xp: u64,
    pub previous_level: u8,
    pub level: u8,
}

impl XpGain {
    pub fn leveled_up(&self) -> bool {
        self.level > self.previous_level
    }
}
