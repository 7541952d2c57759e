//! Builds the [`ProgressionStats`] snapshot the index aggregator consumes.

use std::collections::HashMap;

use vanguard_types::pilot::PilotSkillState;
use vanguard_types::progression::ProgressionStats;
use vanguard_types::skill::{MAX_LEVEL, Skill, SkillId};

/// Aggregate one pilot's skill rows against the catalog.
///
/// Rows for skills the catalog no longer contains are skipped, so the learned
/// count never exceeds the catalog size.
pub fn build_progression_stats(catalog: &[Skill], states: &[PilotSkillState]) -> ProgressionStats {
    let by_id: HashMap<&SkillId, &Skill> = catalog.iter().map(|s| (&s.id, s)).collect();

    let mut stats = ProgressionStats {
        total_skills: by_id.len() as u32,
        ..Default::default()
    };

    for state in states {
        let Some(skill) = by_id.get(&state.skill_id) else {
            tracing::debug!(skill = %state.skill_id, "skipping row for skill outside catalog");
            continue;
        };

        stats.learned_skills += 1;
        if state.active {
            stats.active_skills += 1;
        }
        stats.total_xp = stats.total_xp.saturating_add(state.xp);
        stats.skills_by_level[usize::from(state.current_level.min(MAX_LEVEL))] += 1;
        *stats
            .multiplier_stats
            .entry(skill.multiplier.get())
            .or_default() += 1;
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progression::index::calculate_progression_index;
    use vanguard_types::pilot::PilotId;
    use vanguard_types::skill::Multiplier;

    fn skill(id: &str, multiplier: i64) -> Skill {
        Skill {
            id: SkillId::new(id),
            name: id.to_string(),
            category: "test".to_string(),
            multiplier: Multiplier::from_raw(multiplier),
            description: String::new(),
        }
    }

    fn row(pilot: &PilotId, id: &str, xp: u64, level: u8, active: bool) -> PilotSkillState {
        PilotSkillState {
            xp,
            current_level: level,
            active,
            ..PilotSkillState::acquired(pilot.clone(), SkillId::new(id))
        }
    }

    #[test]
    fn test_stats_count_rows_against_catalog() {
        let catalog: Vec<Skill> = (0..10)
            .map(|i| skill(&format!("s{i}"), if i < 6 { 1 } else { 2 }))
            .collect();
        let pilot = PilotId::new();
        let states = vec![
            row(&pilot, "s0", 60, 1, true),
            row(&pilot, "s1", 80, 1, true),
            row(&pilot, "s2", 300, 2, false),
            row(&pilot, "s6", 1000, 3, true),
            row(&pilot, "s7", 2560, 4, false),
        ];

        let stats = build_progression_stats(&catalog, &states);
        assert_eq!(stats.total_skills, 10);
        assert_eq!(stats.learned_skills, 5);
        assert_eq!(stats.active_skills, 3);
        assert_eq!(stats.total_xp, 4000);
        assert_eq!(stats.skills_by_level, [0, 2, 1, 1, 1, 0]);
        assert_eq!(stats.multiplier_stats.get(&1), Some(&3));
        assert_eq!(stats.multiplier_stats.get(&2), Some(&2));

        let index = calculate_progression_index(&stats);
        assert!((index.components.average_level - 2.2).abs() < 1e-9);
        assert!((index.components.multiplier_weight - 1.4).abs() < 1e-9);
    }

    #[test]
    fn test_rows_outside_catalog_are_skipped() {
        let catalog = vec![skill("a", 1)];
        let pilot = PilotId::new();
        let states = vec![row(&pilot, "a", 0, 0, false), row(&pilot, "gone", 500, 3, true)];

        let stats = build_progression_stats(&catalog, &states);
        assert_eq!(stats.learned_skills, 1);
        assert_eq!(stats.active_skills, 0);
        assert_eq!(stats.skills_by_level[0], 1);
    }

    #[test]
    fn test_no_rows_yields_zero_index() {
        let catalog = vec![skill("a", 1), skill("b", 3)];
        let stats = build_progression_stats(&catalog, &[]);
        assert_eq!(stats.total_skills, 2);
        assert_eq!(calculate_progression_index(&stats).index, 0);
    }
}
