//! CLI argument parsing and structure definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::commands;
use crate::logging::LogLevel;

/// Annotation project utilities - projects, tasks, and CSV merge
#[derive(Parser)]
#[command(name = "labelkit")]
#[command(
    author,
    version,
    about = "Annotation project utilities - projects, tasks, and CSV merge",
    long_about = r#"
labelkit - utilities for annotation projects on a labeling platform

CAPABILITIES:
  • Project management - create, list, inspect, delete projects
  • Task management   - purge tasks, bulk-import pre-annotated tasks
  • Annotation merge  - join a CSV of human judgments onto the canonical
                        task list and emit the platform's import JSON

CONFIGURATION:
  Project commands talk to the server named by LABEL_STUDIO_URL
  (default http://localhost:8080) using the LABEL_STUDIO_API_KEY token.
  Both may live in a .env file. The merge command is fully offline.

EXAMPLES:
  labelkit project list-all
  labelkit project create "IMDB sentiment" label_config.xml
  labelkit merge --annotations-file round2.csv --output-file merged.json
  labelkit project import 4 --tasks-file merged.json
"#
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Write diagnostics to this file instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    pub logfile: Option<PathBuf>,

    /// Diagnostic verbosity
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Info)]
    pub loglevel: LogLevel,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Merge collected annotation judgments into the task import document
    #[command(visible_alias = "m")]
    Merge(commands::MergeArgs),

    /// Project management commands
    #[command(subcommand)]
    Project(commands::ProjectCommand),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
