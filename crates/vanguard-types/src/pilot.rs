use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

use crate::skill::SkillId;

/// Unique identifier for a pilot, wrapping a UUID v7 (time-sortable).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PilotId(pub Uuid);

impl PilotId {
    /// Create a new PilotId using UUID v7.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for PilotId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PilotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PilotId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// One pilot's standing in one skill, keyed by `(pilot_id, skill_id)`.
///
/// `current_level` must always equal the level the XP curve yields for `xp`
/// and the skill's multiplier. `xp` only ever grows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PilotSkillState {
    pub pilot_id: PilotId,
    pub skill_id: SkillId,
    pub xp: u64,
    pub current_level: u8,
    /// Whether the learned skill currently contributes its effects.
    pub active: bool,
    pub updated_at: DateTime<Utc>,
}

impl PilotSkillState {
    /// A freshly acquired skill: no XP, level 0, inactive.
    pub fn acquired(pilot_id: PilotId, skill_id: SkillId) -> Self {
        Self {
            pilot_id,
            skill_id,
            xp: 0,
            current_level: 0,
            active: false,
            updated_at: Utc::now(),
        }
    }

    /// True when `other` holds the same mutable fields, ignoring timestamps.
    ///
    /// Compare-and-swap writers use this to detect interleaved updates.
    pub fn same_progress(&self, other: &PilotSkillState) -> bool {
        self.pilot_id == other.pilot_id
            && self.skill_id == other.skill_id
            && self.xp == other.xp
            && self.current_level == other.current_level
            && self.active == other.active
    }
}
