//! Vanguard progression engine CLI entry point.
//!
//! Binary name: `vgd`
//!
//! Parses CLI arguments, initializes tracing and configuration, then
//! dispatches to the appropriate command handler.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;

use cli::{CatalogCommand, CheckCommand, Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,vanguard=debug",
        _ => "trace",
    };
    if let Err(e) = vanguard_observe::tracing_setup::init_tracing(filter, cli.otel) {
        eprintln!("Warning: failed to initialize tracing: {e}");
    }

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "vgd", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init(cli.data_dir.clone()).await?;

    let result = match cli.command {
        Commands::Curve { multiplier } => cli::curve::show_curve(multiplier, cli.json),

        Commands::Level { xp, multiplier } => cli::curve::show_level(xp, multiplier, cli.json),

        Commands::Catalog { action } => match action {
            CatalogCommand::Validate { file } => {
                cli::catalog::validate_catalog(&file, cli.json).await
            }
        },

        Commands::Check { action } => match action {
            CheckCommand::Activate { skill, files } => {
                cli::check::check_activate(&state, &files, &skill, cli.json).await
            }
            CheckCommand::Deactivate { skill, files } => {
                cli::check::check_deactivate(&state, &files, &skill, cli.json).await
            }
        },

        Commands::Grant { skill, xp, files } => {
            cli::check::grant(&state, &files, &skill, xp, cli.json).await
        }

        Commands::Index {
            stats,
            catalog,
            pilot,
        } => cli::index::show_index(&state, stats, catalog, pilot, cli.json).await,

        Commands::Completions { .. } => unreachable!("handled above"),
    };

    vanguard_observe::tracing_setup::shutdown_tracing();
    result
}
