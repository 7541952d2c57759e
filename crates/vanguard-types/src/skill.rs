//! Skill catalog domain types.
//!
//! Skills are immutable reference data: each one has a category, a free-text
//! description and an XP [`Multiplier`] that stretches its level curve.
//! Prerequisite edges connect skills into a directed acyclic graph.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

use crate::error::CatalogError;

/// Highest level a skill can reach. Levels run `0..=MAX_LEVEL`.
pub const MAX_LEVEL: u8 = 5;

/// Stable identifier of a catalog skill, a URL-safe slug ("advanced-navigation").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillId(pub String);

impl SkillId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SkillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for SkillId {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(CatalogError::InvalidSkillId(s.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl From<&str> for SkillId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for SkillId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Per-skill XP curve multiplier, always within `1..=5`.
///
/// Two constructors exist on purpose:
/// - [`Multiplier::from_raw`] applies the engine's boundary policy: anything
///   outside `1..=5` falls back to `1`.
/// - `TryFrom<u8>` is strict and is what catalog deserialization uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Multiplier(u8);

impl Multiplier {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// The unscaled curve.
    pub const ONE: Multiplier = Multiplier(1);

    /// Coerce a loosely-typed value into a multiplier; out-of-range input becomes `1`.
    pub fn from_raw(raw: i64) -> Self {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&raw) {
            Self(raw as u8)
        } else {
            Self::ONE
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Every valid multiplier, ascending.
    pub fn all() -> impl Iterator<Item = Multiplier> {
        (Self::MIN..=Self::MAX).map(Multiplier)
    }
}

impl Default for Multiplier {
    fn default() -> Self {
        Self::ONE
    }
}

impl TryFrom<u8> for Multiplier {
    type Error = CatalogError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(CatalogError::InvalidMultiplier(i64::from(value)))
        }
    }
}

impl From<Multiplier> for u8 {
    fn from(value: Multiplier) -> Self {
        value.0
    }
}

impl fmt::Display for Multiplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", self.0)
    }
}

/// A learnable capability in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub id: SkillId,
    /// Display name shown to players.
    pub name: String,
    /// Grouping used by catalog screens ("combat", "industry", ...).
    pub category: String,
    /// Scales every level threshold of this skill's XP curve.
    #[serde(default)]
    pub multiplier: Multiplier,
    #[serde(default)]
    pub description: String,
}

/// Directed requirement: `skill_id` needs `prerequisite_id` at `required_level`
/// or higher before it may be activated.
///
/// Several edges may point out of the same skill; all of them must hold.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrerequisiteEdge {
    pub skill_id: SkillId,
    pub prerequisite_id: SkillId,
    pub required_level: u8,
}

impl PrerequisiteEdge {
    pub fn new(skill_id: impl Into<SkillId>, prerequisite_id: impl Into<SkillId>, required_level: u8) -> Self {
        Self {
            skill_id: skill_id.into(),
            prerequisite_id: prerequisite_id.into(),
            required_level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiplier_from_raw_in_range() {
        for raw in 1..=5 {
            assert_eq!(Multiplier::from_raw(raw).get(), raw as u8);
        }
    }

    #[test]
    fn test_multiplier_from_raw_out_of_range_falls_back_to_one() {
        assert_eq!(Multiplier::from_raw(0), Multiplier::ONE);
        assert_eq!(Multiplier::from_raw(6), Multiplier::ONE);
        assert_eq!(Multiplier::from_raw(-3), Multiplier::ONE);
    }

    #[test]
    fn test_multiplier_try_from_is_strict() {
        assert!(Multiplier::try_from(3).is_ok());
        let err = Multiplier::try_from(9).unwrap_err();
        assert_eq!(err.to_string(), "invalid multiplier 9: must be within 1..=5");
    }

    #[test]
    fn test_multiplier_deserialize_rejects_out_of_range() {
        assert!(serde_json::from_str::<Multiplier>("2").is_ok());
        assert!(serde_json::from_str::<Multiplier>("0").is_err());
    }

    #[test]
    fn test_skill_deserialize_defaults_multiplier() {
        let toml_str = r#"
id = "navigation"
name = "Navigation"
category = "piloting"
"#;
        let skill: Skill = toml::from_str(toml_str).unwrap();
        assert_eq!(skill.id, SkillId::new("navigation"));
        assert_eq!(skill.multiplier, Multiplier::ONE);
        assert!(skill.description.is_empty());
    }

    #[test]
    fn test_skill_id_from_str_rejects_blank() {
        assert!(" ".parse::<SkillId>().is_err());
        assert_eq!("gunnery".parse::<SkillId>().unwrap().as_str(), "gunnery");
    }
}
