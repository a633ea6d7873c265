mod help_text;

use clap::{Parser, Subcommand, ValueEnum};
use help_text::{BASELINE_LONG_ABOUT, ROOT_LONG_ABOUT, SCAN_LONG_ABOUT};
use std::path::PathBuf;

/// File integrity checker for baselining and scanning directory trees
#[derive(Parser, Debug)]
#[command(name = "integrity-checker", version, about, long_about = ROOT_LONG_ABOUT)]
pub struct Cli {
    /// Change to DIRECTORY before doing anything
    #[arg(short = 'C', value_name = "DIRECTORY", global = true)]
    pub directory: Option<PathBuf>,

    /// Baseline file location
    #[arg(
        long,
        value_name = "FILE",
        default_value = crate::baseline::DEFAULT_BASELINE_FILENAME,
        global = true
    )]
    pub baseline: PathBuf,

    /// Increase log verbosity (-v info, -vv debug). Takes precedence over RUST_LOG.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Set the log level explicitly. Takes precedence over RUST_LOG.
    #[arg(
        long,
        value_name = "LEVEL",
        value_enum,
        conflicts_with = "verbose",
        global = true
    )]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_filter(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create (or replace) the baseline for a directory tree
    #[command(long_about = BASELINE_LONG_ABOUT)]
    Baseline {
        /// Directory to baseline
        #[arg(value_name = "PATH", default_value = ".")]
        path: PathBuf,
    },

    /// Scan a directory tree for new, deleted and modified files
    #[command(long_about = SCAN_LONG_ABOUT)]
    Scan {
        /// Directory to scan
        #[arg(value_name = "PATH", default_value = ".")]
        path: PathBuf,

        /// Also list unchanged files
        #[arg(long)]
        all: bool,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}
