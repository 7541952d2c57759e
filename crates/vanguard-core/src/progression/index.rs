//! Progression index aggregator.
//!
//! Folds a [`ProgressionStats`] snapshot into one weighted score:
//!
//! ```text
//! index = round(HS*10 + AL*25 + XP/100 + AS*15 + MP*5)
//! ```
//!
//! where HS is the learned share of the catalog, AL the average level, XP the
//! total XP, AS the active share and MP the average multiplier. The function
//! never fails: malformed snapshots and non-finite results collapse to zero.

use vanguard_types::config::IndexWeights;
use vanguard_types::progression::{IndexComponents, ProgressionIndex, ProgressionStats};
use vanguard_types::skill::Multiplier;

/// Compute the progression index with the default weights.
pub fn calculate_progression_index(stats: &ProgressionStats) -> ProgressionIndex {
    calculate_weighted_index(stats, &IndexWeights::default())
}

/// Compute the progression index with caller-supplied weights.
pub fn calculate_weighted_index(stats: &ProgressionStats, weights: &IndexWeights) -> ProgressionIndex {
    if stats.total_skills == 0 || stats.learned_skills == 0 {
        return ProgressionIndex::zero();
    }
    if let Err(reason) = check_well_formed(stats) {
        tracing::warn!(reason, "malformed progression stats, returning zero index");
        return ProgressionIndex::zero();
    }

    let learned = f64::from(stats.learned_skills);

    let level_sum: f64 = stats
        .skills_by_level
        .iter()
        .enumerate()
        .map(|(level, &count)| f64::from(count) * level as f64)
        .sum();
    let multiplier_sum: f64 = stats
        .multiplier_stats
        .iter()
        .map(|(&multiplier, &count)| f64::from(count) * f64::from(multiplier))
        .sum();

    let components = IndexComponents {
        learned_percent: learned / f64::from(stats.total_skills) * 100.0,
        average_level: level_sum / learned,
        total_xp: stats.total_xp as f64,
        active_percent: f64::from(stats.active_skills) / learned * 100.0,
        multiplier_weight: multiplier_sum / learned,
    };

    let raw = components.learned_percent * weights.learned_percent
        + components.average_level * weights.average_level
        + components.total_xp / weights.xp_divisor
        + components.active_percent * weights.active_percent
        + components.multiplier_weight * weights.multiplier_weight;

    let rounded = raw.round();
    if !rounded.is_finite() || rounded.abs() > i64::MAX as f64 {
        tracing::warn!(raw, "non-finite progression index, returning zero index");
        return ProgressionIndex::zero();
    }

    ProgressionIndex {
        index: rounded as i64,
        components,
    }
}

fn check_well_formed(stats: &ProgressionStats) -> Result<(), &'static str> {
    if stats.learned_skills > stats.total_skills {
        return Err("more learned skills than catalog skills");
    }
    if stats.active_skills > stats.learned_skills {
        return Err("more active skills than learned skills");
    }
    if stats
        .multiplier_stats
        .keys()
        .any(|&m| !(Multiplier::MIN..=Multiplier::MAX).contains(&m))
    {
        return Err("multiplier outside 1..=5");
    }
    Ok(())
}
