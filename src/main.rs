//! labelkit - annotation project utilities
//!
//! Command-line front end for project management and the annotation merge.
//!
//! # Usage
//!
//! ```bash
//! # Merge collected judgments into the import document
//! labelkit merge --annotations-file round2.csv --output-file merged.json
//!
//! # Project management (needs LABEL_STUDIO_URL / LABEL_STUDIO_API_KEY)
//! labelkit project list-all
//! labelkit project create "IMDB sentiment" label_config.xml
//! labelkit project delete-all-tasks 4
//! labelkit project import 4 --tasks-file merged.json
//! ```

use std::io;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use clap_complete::generate;

use labelkit::cli::commands;
use labelkit::cli::output::color;
use labelkit::cli::parser::{Cli, Commands};
use labelkit::logging::{self, LogConfig};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_config = LogConfig {
        level: cli.loglevel,
        file: cli.logfile.clone(),
    };
    if let Err(e) = logging::init(&log_config) {
        eprintln!("{} {}", color("31", "error:"), e);
        return ExitCode::FAILURE;
    }

    let result: Result<(), String> = match cli.command {
        Commands::Merge(args) => commands::merge::run(args),
        Commands::Project(command) => commands::project::run(command),
        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "labelkit", &mut io::stdout());
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", color("31", "error:"), e);
            ExitCode::FAILURE
        }
    }
}
