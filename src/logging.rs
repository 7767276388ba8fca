//! Logging initialization.
//!
//! The level and destination arrive as an explicit [`LogConfig`] assembled
//! from the CLI flags in `main`; nothing reconfigures the logger after
//! startup, which keeps the merge core free of ambient state.

use std::fs::File;
use std::path::PathBuf;

use clap::ValueEnum;
use log::LevelFilter;

/// CLI-facing log level names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// Finest-grained diagnostics.
    Verbose,
    /// Per-record diagnostics (each parsed annotation, each join hit).
    Debug,
    /// Progress messages.
    #[default]
    Info,
    /// Suspicious but recoverable conditions (duplicate annotation rows).
    Warning,
    /// Failures only.
    Error,
    /// Alias for operators used to five-level schemes.
    Critical,
}

impl LogLevel {
    /// The `log` crate filter this level maps to.
    pub fn filter(self) -> LevelFilter {
        match self {
            Self::Verbose => LevelFilter::Trace,
            Self::Debug => LevelFilter::Debug,
            Self::Info => LevelFilter::Info,
            Self::Warning => LevelFilter::Warn,
            Self::Error | Self::Critical => LevelFilter::Error,
        }
    }
}

/// Explicit logging configuration, built once in `main`.
#[derive(Debug, Clone, Default)]
pub struct LogConfig {
    pub level: LogLevel,
    /// Diagnostics go here instead of stderr when set.
    pub file: Option<PathBuf>,
}

/// Apply the configuration. Called once at startup; `RUST_LOG` still wins
/// over `--loglevel` when both are present.
pub fn init(config: &LogConfig) -> Result<(), String> {
    let env = env_logger::Env::default().default_filter_or(config.level.filter().as_str());
    let mut builder = env_logger::Builder::from_env(env);
    if let Some(path) = &config.file {
        let file = File::create(path)
            .map_err(|e| format!("Failed to open logfile {}: {}", path.display(), e))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder
        .try_init()
        .map_err(|e| format!("Failed to initialize logging: {}", e))
}
