//! Pilot skill commands: activation checks and simulated XP gains.

use anyhow::Result;
use console::style;

use vanguard_types::skill::SkillId;

use super::PilotFiles;
use crate::state::AppState;

/// Report whether the pilot could switch `skill` on.
pub async fn check_activate(state: &AppState, files: &PilotFiles, skill: &str, json: bool) -> Result<()> {
    let session = state.open_session(&files.catalog, &files.pilot).await?;
    let skill_id: SkillId = skill.parse()?;
    let check = session
        .service
        .check_activation(&session.pilot_id, &skill_id)
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&check)?);
        return Ok(());
    }

    println!();
    if check.can_activate {
        println!(
            "  {} '{}' can be activated",
            style("✓").green(),
            style(&skill_id).cyan()
        );
    } else {
        println!(
            "  {} '{}' is missing prerequisites:",
            style("✗").red(),
            style(&skill_id).cyan()
        );
        for missing in &check.missing_prerequisites {
            println!(
                "    {} {} (level {}, needs {})",
                style("•").dim(),
                missing.skill_id,
                style(missing.current_level).yellow(),
                style(missing.required_level).bold()
            );
        }
    }
    println!();
    Ok(())
}

/// Report whether the pilot could switch `skill` off.
pub async fn check_deactivate(state: &AppState, files: &PilotFiles, skill: &str, json: bool) -> Result<()> {
    let session = state.open_session(&files.catalog, &files.pilot).await?;
    let skill_id: SkillId = skill.parse()?;
    let check = session
        .service
        .check_deactivation(&session.pilot_id, &skill_id)
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&check)?);
        return Ok(());
    }

    println!();
    if check.can_deactivate {
        println!(
            "  {} '{}' can be deactivated",
            style("✓").green(),
            style(&skill_id).cyan()
        );
    } else {
        println!(
            "  {} '{}' is required by active skills:",
            style("✗").red(),
            style(&skill_id).cyan()
        );
        for dependent in &check.dependent_skills {
            println!("    {} {}", style("•").dim(), dependent);
        }
    }
    println!();
    Ok(())
}

/// Apply an XP gain to the loaded roster and show the outcome.
///
/// Nothing is written back to the roster file.
pub async fn grant(state: &AppState, files: &PilotFiles, skill: &str, xp: u64, json: bool) -> Result<()> {
    let session = state.open_session(&files.catalog, &files.pilot).await?;
    let skill_id: SkillId = skill.parse()?;
    let gain = session
        .service
        .grant_xp(&session.pilot_id, &skill_id, xp)
        .await?;
    let progress = session
        .service
        .skill_progress(&session.pilot_id, &skill_id)
        .await?;

    if json {
        let out = serde_json::json!({
            "gain": gain,
            "progress": progress,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!();
    println!(
        "  +{} XP to '{}': {} -> {} XP",
        style(xp).bold(),
        style(&skill_id).cyan(),
        gain.previous_xp,
        gain.xp
    );
    if gain.leveled_up() {
        println!(
            "  {} Level {} -> {}",
            style("▲").green(),
            gain.previous_level,
            style(gain.level).green().bold()
        );
    } else {
        println!("  Level {} ({}%)", gain.level, progress.percentage);
    }
    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use vanguard_types::config::EngineConfig;

    const CATALOG: &str = r#"
[[skills]]
id = "navigation"
name = "Navigation"
category = "piloting"

[[skills]]
id = "warp-navigation"
name = "Warp Navigation"
category = "piloting"
multiplier = 2

[[prerequisites]]
skill_id = "warp-navigation"
prerequisite_id = "navigation"
required_level = 3
"#;

    const ROSTER: &str = r#"
[[skills]]
skill_id = "navigation"
xp = 250
active = true

[[skills]]
skill_id = "warp-navigation"
xp = 0
"#;

    async fn fixture() -> (TempDir, PilotFiles) {
        let tmp = TempDir::new().unwrap();
        let catalog = tmp.path().join("catalog.toml");
        let pilot = tmp.path().join("pilot.toml");
        tokio::fs::write(&catalog, CATALOG).await.unwrap();
        tokio::fs::write(&pilot, ROSTER).await.unwrap();
        (tmp, PilotFiles { catalog, pilot })
    }

    fn state() -> AppState {
        AppState {
            config: EngineConfig::default(),
        }
    }

    #[tokio::test]
    async fn session_reports_missing_prerequisite() {
        let (_tmp, files) = fixture().await;
        let session = state().open_session(&files.catalog, &files.pilot).await.unwrap();
        let check = session
            .service
            .check_activation(&session.pilot_id, &SkillId::new("warp-navigation"))
            .await
            .unwrap();
        assert!(!check.can_activate);
        assert_eq!(check.missing_prerequisites[0].current_level, 2);
    }

    #[tokio::test]
    async fn commands_run_against_fixture() {
        let (_tmp, files) = fixture().await;
        check_activate(&state(), &files, "warp-navigation", true).await.unwrap();
        check_deactivate(&state(), &files, "navigation", false).await.unwrap();
        grant(&state(), &files, "navigation", 300, true).await.unwrap();
    }

    #[tokio::test]
    async fn unknown_skill_is_an_error() {
        let (_tmp, files) = fixture().await;
        let err = check_activate(&state(), &files, "cloaking", true).await.unwrap_err();
        assert!(err.to_string().contains("not found"));
    }
}
