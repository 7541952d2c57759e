//! XP curve calculator.
//!
//! The curve is table-driven so every threshold is an exact integer:
//! `BASE_XP[i]` is the XP needed to go from level `i` to `i + 1` at
//! multiplier 1. Cumulative thresholds are summed before the multiplier is
//! applied, so level 3 at multiplier 2 needs `500 * 2 = 1000` XP.

use serde::Serialize;

use vanguard_types::pilot::PilotSkillState;
use vanguard_types::progression::{LevelProgress, XpGain};
use vanguard_types::skill::{MAX_LEVEL, Multiplier};

/// XP needed to leave each level `0..=4` at multiplier 1.
pub const BASE_XP: [u64; MAX_LEVEL as usize] = [50, 150, 300, 600, 1000];

/// Running sum of [`BASE_XP`]: the XP at which each level `0..=5` starts.
pub const CUMULATIVE_XP: [u64; MAX_LEVEL as usize + 1] = cumulative_table();

const fn cumulative_table() -> [u64; MAX_LEVEL as usize + 1] {
    let mut table = [0u64; MAX_LEVEL as usize + 1];
    let mut i = 1;
    while i < table.len() {
        table[i] = table[i - 1] + BASE_XP[i - 1];
        i += 1;
    }
    table
}

/// One row of the rendered curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CurveRow {
    pub level: u8,
    pub min_xp: u64,
    pub next_level_xp: u64,
}

/// Minimum XP at which `level` is reached.
///
/// Levels outside `0..=5` have no threshold and yield 0.
pub fn min_xp_for_level(level: u8, multiplier: Multiplier) -> u64 {
    if level > MAX_LEVEL {
        tracing::debug!(level, "min_xp_for_level called with out-of-range level");
        return 0;
    }
    CUMULATIVE_XP[level as usize] * u64::from(multiplier.get())
}

/// XP required to advance one level from `level`. Zero at max level.
pub fn next_level_xp(level: u8, multiplier: Multiplier) -> u64 {
    if level >= MAX_LEVEL {
        return 0;
    }
    BASE_XP[level as usize] * u64::from(multiplier.get())
}

/// The unique level whose threshold band contains `xp`.
pub fn level_from_xp(xp: u64, multiplier: Multiplier) -> u8 {
    (0..=MAX_LEVEL)
        .rev()
        .find(|&level| min_xp_for_level(level, multiplier) <= xp)
        .unwrap_or(0)
}

/// Progress inside `level` for a pilot holding `current_xp`.
///
/// At max level the bar is full. A zero-width band reports 0% rather than
/// dividing by zero.
pub fn progress(current_xp: u64, level: u8, multiplier: Multiplier) -> LevelProgress {
    if level >= MAX_LEVEL {
        return LevelProgress {
            current: 0,
            required: 0,
            percentage: 100,
        };
    }

    let min_xp = as_signed(min_xp_for_level(level, multiplier));
    let next_xp = as_signed(min_xp_for_level(level + 1, multiplier));
    let current = as_signed(current_xp).saturating_sub(min_xp);
    let required = next_xp - min_xp;

    if required <= 0 {
        return LevelProgress {
            current,
            required,
            percentage: 0,
        };
    }

    let ratio = (current as f64 / required as f64 * 100.0).round();
    let percentage = if ratio.is_finite() {
        ratio.clamp(0.0, 100.0) as u8
    } else {
        0
    };

    LevelProgress {
        current,
        required,
        percentage,
    }
}

/// The full curve for a multiplier, level 0 through 5.
pub fn curve_table(multiplier: Multiplier) -> Vec<CurveRow> {
    (0..=MAX_LEVEL)
        .map(|level| CurveRow {
            level,
            min_xp: min_xp_for_level(level, multiplier),
            next_level_xp: next_level_xp(level, multiplier),
        })
        .collect()
}

/// Add `amount` XP to a pilot skill and recompute its level.
///
/// XP saturates instead of overflowing and never decreases.
pub fn apply_xp_gain(state: &mut PilotSkillState, amount: u64, multiplier: Multiplier) -> XpGain {
    let previous_xp = state.xp;
    let previous_level = state.current_level;

    state.xp = state.xp.saturating_add(amount);
    state.current_level = level_from_xp(state.xp, multiplier);

    if state.current_level > previous_level {
        tracing::debug!(
            skill = %state.skill_id,
            from = previous_level,
            to = state.current_level,
            "skill leveled up"
        );
    }

    XpGain {
        skill_id: state.skill_id.clone(),
        previous_xp,
        xp: state.xp,
        previous_level,
        level: state.current_level,
    }
}

/// Whether a stored row's level matches what its XP implies.
pub fn is_consistent(state: &PilotSkillState, multiplier: Multiplier) -> bool {
    state.current_level == level_from_xp(state.xp, multiplier)
}

fn as_signed(xp: u64) -> i64 {
    i64::try_from(xp).unwrap_or(i64::MAX)
}
