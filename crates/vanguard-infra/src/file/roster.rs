//! Pilot roster file loader.
//!
//! A roster records one pilot's skills as XP totals plus an active flag:
//!
//! ```toml
//! pilot_id = "01923f4e-8a5c-7d1e-9c3b-5f2a6e7d8c90"
//!
//! [[skills]]
//! skill_id = "navigation"
//! xp = 600
//! active = true
//! ```
//!
//! Levels are never read from the file: they are recomputed from XP and the
//! skill's multiplier so loaded rows always satisfy the level invariant.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context as _, bail};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use vanguard_core::progression::curve;
use vanguard_types::pilot::{PilotId, PilotSkillState};
use vanguard_types::skill::{Skill, SkillId};

/// Parsed contents of a roster file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterFile {
    #[serde(default)]
    pub pilot_id: Option<PilotId>,
    #[serde(default)]
    pub skills: Vec<RosterEntry>,
}

/// One learned skill in a roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterEntry {
    pub skill_id: SkillId,
    #[serde(default)]
    pub xp: u64,
    #[serde(default)]
    pub active: bool,
}

/// A roster resolved against a catalog.
#[derive(Debug, Clone)]
pub struct Roster {
    pub pilot_id: PilotId,
    pub states: Vec<PilotSkillState>,
}

impl RosterFile {
    /// Turn entries into skill states, deriving each level from its XP.
    ///
    /// Fails on skills absent from `catalog` and on repeated entries.
    pub fn resolve(self, catalog: &[Skill]) -> anyhow::Result<Roster> {
        let by_id: HashMap<&SkillId, &Skill> = catalog.iter().map(|s| (&s.id, s)).collect();
        let pilot_id = self.pilot_id.unwrap_or_default();
        let now = Utc::now();

        let mut states: Vec<PilotSkillState> = Vec::with_capacity(self.skills.len());
        for entry in self.skills {
            let Some(skill) = by_id.get(&entry.skill_id) else {
                bail!("Roster references unknown skill '{}'", entry.skill_id);
            };
            if states.iter().any(|s| s.skill_id == entry.skill_id) {
                bail!("Roster lists skill '{}' more than once", entry.skill_id);
            }
            states.push(PilotSkillState {
                pilot_id: pilot_id.clone(),
                current_level: curve::level_from_xp(entry.xp, skill.multiplier),
                skill_id: entry.skill_id,
                xp: entry.xp,
                active: entry.active,
                updated_at: now,
            });
        }

        Ok(Roster { pilot_id, states })
    }
}

/// Read a roster file and resolve it against `catalog`.
pub async fn load_roster(path: &Path, catalog: &[Skill]) -> anyhow::Result<Roster> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read roster {}", path.display()))?;
    let file: RosterFile = toml::from_str(&content)
        .with_context(|| format!("Failed to parse roster {}", path.display()))?;
    file.resolve(catalog)
        .with_context(|| format!("Invalid roster {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use vanguard_types::skill::Multiplier;

    fn catalog() -> Vec<Skill> {
        vec![
            Skill {
                id: SkillId::new("navigation"),
                name: "Navigation".to_string(),
                category: "piloting".to_string(),
                multiplier: Multiplier::ONE,
                description: String::new(),
            },
            Skill {
                id: SkillId::new("warp-navigation"),
                name: "Warp Navigation".to_string(),
                category: "piloting".to_string(),
                multiplier: Multiplier::from_raw(2),
                description: String::new(),
            },
        ]
    }

    #[tokio::test]
    async fn test_load_roster_recomputes_levels() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("pilot.toml");
        tokio::fs::write(
            &path,
            r#"
pilot_id = "01923f4e-8a5c-7d1e-9c3b-5f2a6e7d8c90"

[[skills]]
skill_id = "navigation"
xp = 600
active = true

[[skills]]
skill_id = "warp-navigation"
xp = 1000
"#,
        )
        .await
        .unwrap();

        let roster = load_roster(&path, &catalog()).await.unwrap();
        assert_eq!(
            roster.pilot_id.to_string(),
            "01923f4e-8a5c-7d1e-9c3b-5f2a6e7d8c90"
        );
        assert_eq!(roster.states[0].current_level, 3);
        assert!(roster.states[0].active);
        assert_eq!(roster.states[1].current_level, 3);
        assert!(!roster.states[1].active);
    }

    #[test]
    fn test_resolve_rejects_unknown_skill() {
        let file: RosterFile = toml::from_str("[[skills]]\nskill_id = \"cloaking\"\n").unwrap();
        let err = file.resolve(&catalog()).unwrap_err();
        assert!(err.to_string().contains("unknown skill 'cloaking'"));
    }

    #[test]
    fn test_resolve_rejects_duplicate_entries() {
        let file: RosterFile = toml::from_str(
            "[[skills]]\nskill_id = \"navigation\"\n\n[[skills]]\nskill_id = \"navigation\"\n",
        )
        .unwrap();
        assert!(file.resolve(&catalog()).is_err());
    }

    #[test]
    fn test_resolve_without_pilot_id_generates_one() {
        let file: RosterFile = toml::from_str("").unwrap();
        let roster = file.resolve(&catalog()).unwrap();
        assert!(roster.states.is_empty());
        assert!(!roster.pilot_id.to_string().is_empty());
    }
}
