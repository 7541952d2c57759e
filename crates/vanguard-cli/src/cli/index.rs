//! Progression index command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use vanguard_core::progression::index::calculate_weighted_index;
use vanguard_types::progression::{ProgressionStats, ProgressionSummary};

use crate::state::AppState;

/// Compute and print the progression index, from a stats snapshot or from
/// a catalog + roster pair.
pub async fn show_index(
    state: &AppState,
    stats: Option<PathBuf>,
    catalog: Option<PathBuf>,
    pilot: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let summary = match (stats, catalog, pilot) {
        (Some(stats_path), _, _) => {
            let stats = load_stats(&stats_path).await?;
            let index = calculate_weighted_index(&stats, &state.config.index_weights);
            ProgressionSummary { stats, index }
        }
        (None, Some(catalog), Some(pilot)) => {
            let session = state.open_session(&catalog, &pilot).await?;
            session
                .service
                .progression_summary(&session.pilot_id)
                .await?
        }
        _ => bail!("Pass either --stats or both --catalog and --pilot"),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    let c = summary.index.components;
    println!();
    println!(
        "  {} Progression index: {}",
        style("⭐").bold(),
        style(summary.index.index).bold().cyan()
    );
    println!(
        "  {}",
        style(format!(
            "{} of {} skills learned, {} active",
            summary.stats.learned_skills, summary.stats.total_skills, summary.stats.active_skills
        ))
        .dim()
    );
    println!();

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Component").fg(Color::White),
        Cell::new("Value").fg(Color::White),
    ]);
    for (label, value) in [
        ("HS  learned %", c.learned_percent),
        ("AL  average level", c.average_level),
        ("XP  total xp", c.total_xp),
        ("AS  active %", c.active_percent),
        ("MP  multiplier weight", c.multiplier_weight),
    ] {
        table.add_row(vec![
            Cell::new(label).fg(Color::Cyan),
            Cell::new(format!("{value:.2}")).fg(Color::White),
        ]);
    }
    println!("{table}");
    println!();
    Ok(())
}

async fn load_stats(path: &Path) -> Result<ProgressionStats> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read stats {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse stats {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use vanguard_types::config::EngineConfig;

    #[tokio::test]
    async fn load_stats_reads_camel_case_json() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("stats.json");
        tokio::fs::write(
            &path,
            r#"{"totalSkills":10,"learnedSkills":5,"activeSkills":3,"totalXP":5000,
                "skillsByLevel":[0,2,1,1,1,0],"multiplierStats":{"1":3,"2":2}}"#,
        )
        .await
        .unwrap();

        let stats = load_stats(&path).await.unwrap();
        let index = calculate_weighted_index(&stats, &EngineConfig::default().index_weights);
        assert_eq!(index.index, 1512);

        let state = AppState {
            config: EngineConfig::default(),
        };
        show_index(&state, Some(path), None, None, true).await.unwrap();
    }

    #[tokio::test]
    async fn load_stats_rejects_garbage() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("stats.json");
        tokio::fs::write(&path, "not json").await.unwrap();
        assert!(load_stats(&path).await.is_err());
    }
}
