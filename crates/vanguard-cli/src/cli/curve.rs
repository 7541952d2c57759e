//! XP curve display commands.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use vanguard_core::progression::curve;
use vanguard_types::skill::{MAX_LEVEL, Multiplier};

/// Print the level thresholds for a multiplier.
pub fn show_curve(multiplier: u8, json: bool) -> Result<()> {
    let multiplier = Multiplier::try_from(multiplier)?;
    let rows = curve::curve_table(multiplier);

    if json {
        let out = serde_json::json!({
            "multiplier": multiplier.get(),
            "levels": rows,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} XP curve at {}",
        style("📈").bold(),
        style(multiplier).cyan()
    );
    println!();

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Level").fg(Color::White),
        Cell::new("Min XP").fg(Color::White),
        Cell::new("To next").fg(Color::White),
    ]);

    for row in rows {
        let next = if row.level >= MAX_LEVEL {
            Cell::new("max").fg(Color::DarkGrey)
        } else {
            Cell::new(row.next_level_xp).fg(Color::White)
        };
        table.add_row(vec![
            Cell::new(row.level).fg(Color::Cyan),
            Cell::new(row.min_xp).fg(Color::White),
            next,
        ]);
    }

    println!("{table}");
    println!();
    Ok(())
}

/// Print the level an XP total reaches and the progress inside it.
pub fn show_level(xp: u64, multiplier: u8, json: bool) -> Result<()> {
    let multiplier = Multiplier::try_from(multiplier)?;
    let level = curve::level_from_xp(xp, multiplier);
    let progress = curve::progress(xp, level, multiplier);

    if json {
        let out = serde_json::json!({
            "xp": xp,
            "multiplier": multiplier.get(),
            "level": level,
            "progress": progress,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!();
    println!(
        "  Level {} at {} XP ({})",
        style(level).bold().cyan(),
        xp,
        multiplier
    );
    if level >= MAX_LEVEL {
        println!("  {}", style("Maxed out").green());
    } else {
        println!(
            "  {} {}/{} XP ({}%)",
            progress_bar(progress.percentage),
            progress.current,
            progress.required,
            progress.percentage
        );
    }
    println!();
    Ok(())
}

fn progress_bar(percentage: u8) -> String {
    const WIDTH: usize = 20;
    let filled = usize::from(percentage.min(100)) * WIDTH / 100;
    format!(
        "{}{}",
        style("█".repeat(filled)).green(),
        style("░".repeat(WIDTH - filled)).dim()
    )
}
