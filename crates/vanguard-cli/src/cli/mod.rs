//! CLI command definitions and dispatch for the `vgd` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod catalog;
pub mod check;
pub mod curve;
pub mod index;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Inspect skill progression: XP curves, prerequisite gates and pilot scores.
#[derive(Parser)]
#[command(name = "vgd", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    /// Data directory holding config.toml (default: ~/.vanguard).
    #[arg(long, global = true, env = "VANGUARD_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the XP thresholds of every level for a multiplier.
    Curve {
        /// Skill multiplier (1-5).
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=5))]
        multiplier: u8,
    },

    /// Show the level and in-level progress for an XP total.
    Level {
        /// Accumulated XP.
        xp: u64,

        /// Skill multiplier (1-5).
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=5))]
        multiplier: u8,
    },

    /// Skill catalog operations.
    Catalog {
        #[command(subcommand)]
        action: CatalogCommand,
    },

    /// Check whether a pilot may toggle a skill.
    Check {
        #[command(subcommand)]
        action: CheckCommand,
    },

    /// Simulate an XP gain for a pilot skill.
    Grant {
        /// Skill id receiving the XP.
        skill: String,

        /// XP to add.
        xp: u64,

        #[command(flatten)]
        files: PilotFiles,
    },

    /// Compute a pilot's progression index.
    Index {
        /// Pre-aggregated statistics as JSON.
        #[arg(long, conflicts_with_all = ["catalog", "pilot"], required_unless_present_all = ["catalog", "pilot"])]
        stats: Option<PathBuf>,

        /// Skill catalog TOML file.
        #[arg(long, requires = "pilot")]
        catalog: Option<PathBuf>,

        /// Pilot roster TOML file.
        #[arg(long, requires = "catalog")]
        pilot: Option<PathBuf>,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum CatalogCommand {
    /// Validate a catalog: ids, multipliers, prerequisite levels and cycles.
    Validate {
        /// Skill catalog TOML file.
        file: PathBuf,
    },
}

#[derive(Subcommand)]
pub enum CheckCommand {
    /// Can the pilot switch this skill on?
    Activate {
        /// Skill id to check.
        skill: String,

        #[command(flatten)]
        files: PilotFiles,
    },

    /// Can the pilot switch this skill off?
    Deactivate {
        /// Skill id to check.
        skill: String,

        #[command(flatten)]
        files: PilotFiles,
    },
}

/// Catalog and roster inputs shared by pilot commands.
#[derive(Args, Debug, Clone)]
pub struct PilotFiles {
    /// Skill catalog TOML file.
    #[arg(long)]
    pub catalog: PathBuf,

    /// Pilot roster TOML file.
    #[arg(long)]
    pub pilot: PathBuf,
}
