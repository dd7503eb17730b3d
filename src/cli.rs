// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::types::parse_duration;

/// Command-line arguments for `xtatus`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "xtatus",
    version,
    about = "Run status scripts on fixed intervals and show their latest output.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file.
    ///
    /// `.toml` files use the TOML format; anything else is read as one
    /// `<interval-seconds> <path>` pair per line.
    #[arg(long, value_name = "PATH", default_value = "scripts.config")]
    pub config: PathBuf,

    /// Change to this directory before loading config.
    #[arg(long, value_name = "DIR", conflicts_with = "exe_dir")]
    pub workdir: Option<PathBuf>,

    /// Change to the directory containing the xtatus executable before
    /// loading config.
    #[arg(long)]
    pub exe_dir: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `XTATUS_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Run every task once, print the result and exit.
    #[arg(long)]
    pub once: bool,

    /// Parse + validate, print the task list, but don't run anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Upper bound on a single run (e.g. "30s"). Overrides the config file.
    #[arg(long, value_name = "DURATION", value_parser = parse_positive_duration)]
    pub run_timeout: Option<Duration>,

    /// Time between rendered frames (e.g. "500ms"). Overrides the config file.
    #[arg(long, value_name = "DURATION", value_parser = parse_positive_duration)]
    pub refresh: Option<Duration>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

fn parse_positive_duration(s: &str) -> Result<Duration, String> {
    let dur = parse_duration(s)?;
    if dur.is_zero() {
        return Err("duration must be greater than zero".to_string());
    }
    Ok(dur)
}
