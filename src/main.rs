mod baseline;
mod cli;
mod diff;
mod dir_list;
mod fingerprint;
mod integrity;
mod report;
mod scan;
mod snapshot;

use baseline::BaselineStore;
use cli::{Cli, Command, LogLevel};
use integrity::{IntegrityError, create_baseline, scan_for_changes};
use report::{ReportMode, print_report};
use std::fmt as stdfmt;
use std::io::{IsTerminal, stderr};
use std::path::Path;
use std::process::ExitCode;
use tracing::{Event, Level, Subscriber, error, info};
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt as tracing_fmt;
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::fmt::format::{FormatEvent, FormatFields, Writer};
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;

struct CheckerExitCode;

impl CheckerExitCode {
    /// Exit code used when a scan found differences from the baseline.
    fn changes_detected() -> ExitCode {
        ExitCode::from(1)
    }

    /// Exit code used when a scan has no baseline to compare against.
    fn no_baseline() -> ExitCode {
        ExitCode::from(2)
    }

    /// Exit code used for other errors (I/O errors, corrupt baseline, etc.).
    fn any_error() -> ExitCode {
        ExitCode::from(255)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.log_level);

    // Change working directory if -C was specified
    if let Some(directory) = cli.directory
        && let Err(e) = std::env::set_current_dir(&directory)
    {
        error!(
            "Failed to change directory to {}: {}",
            directory.display(),
            e
        );
        return CheckerExitCode::any_error();
    }

    let store = BaselineStore::new(cli.baseline);

    let result: anyhow::Result<ExitCode> = match cli.command {
        Command::Baseline { path } => handle_baseline(&path, &store),
        Command::Scan { path, all } => handle_scan(&path, &store, all),
    };

    match result {
        Ok(exit_code) => exit_code,
        Err(err) => {
            error!("{err}");
            CheckerExitCode::any_error()
        }
    }
}

fn ensure_directory(path: &Path) -> anyhow::Result<()> {
    if !path.is_dir() {
        anyhow::bail!("Invalid directory: {}", path.display());
    }
    Ok(())
}

fn handle_baseline(path: &Path, store: &BaselineStore) -> anyhow::Result<ExitCode> {
    ensure_directory(path)?;

    let snapshot = create_baseline(path, store)?;

    info!(
        "Baseline of {} files saved to {}",
        snapshot.len(),
        store.path().display()
    );

    Ok(ExitCode::SUCCESS)
}

fn handle_scan(path: &Path, store: &BaselineStore, all: bool) -> anyhow::Result<ExitCode> {
    ensure_directory(path)?;

    let report = match scan_for_changes(path, store) {
        Ok(report) => report,
        Err(IntegrityError::BaselineNotFound(baseline_path)) => {
            error!(
                "No baseline found at {}. Run 'integrity-checker baseline' first.",
                baseline_path.display()
            );
            return Ok(CheckerExitCode::no_baseline());
        }
        Err(IntegrityError::Baseline(e)) if e.is_corrupt() => {
            anyhow::bail!(
                "Baseline at {} is corrupt and was not used: {}",
                store.path().display(),
                e
            );
        }
        Err(e) => return Err(e.into()),
    };

    let mode = if all {
        ReportMode::All
    } else {
        ReportMode::Changes
    };

    print_report(&report, mode);

    if report.is_clean() {
        return Ok(ExitCode::SUCCESS);
    }

    info!(
        "Run 'integrity-checker baseline' to accept these {} change(s).",
        report.change_count()
    );

    Ok(CheckerExitCode::changes_detected())
}

/// Precedence: --log-level, then -v/-vv, then RUST_LOG, then "warn".
fn log_filter(verbose: u8, log_level: Option<LogLevel>) -> EnvFilter {
    let explicit = match (log_level, verbose) {
        (Some(level), _) => Some(level.as_filter()),
        (None, 0) => None,
        (None, 1) => Some("info"),
        (None, _) => Some("debug"),
    };

    match explicit {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    }
}

fn init_tracing(verbose: u8, log_level: Option<LogLevel>) {
    let stderr_is_terminal = stderr().is_terminal();
    let formatter = EmojiFormatter { stderr_is_terminal };

    let fmt_layer = tracing_fmt::layer()
        .event_format(formatter)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(log_filter(verbose, log_level))
        .with(fmt_layer)
        .init();
}

struct EmojiFormatter {
    stderr_is_terminal: bool,
}

impl<S, N> FormatEvent<S, N> for EmojiFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> stdfmt::Result {
        if self.stderr_is_terminal {
            match *event.metadata().level() {
                Level::DEBUG => write!(writer, "\u{1f50d} ")?,
                Level::INFO => write!(writer, "\u{2139}\u{fe0f} ")?,
                Level::WARN => write!(writer, "\u{26a0}\u{fe0f}  ")?,
                Level::ERROR => write!(writer, "\u{274c}\u{fe0f} ")?,
                _ => {}
            }
        } else {
            match *event.metadata().level() {
                Level::TRACE => writer.write_str("TRACE: ")?,
                Level::DEBUG => writer.write_str("DEBUG: ")?,
                Level::INFO => writer.write_str("INFO: ")?,
                Level::WARN => writer.write_str("WARN: ")?,
                Level::ERROR => writer.write_str("ERROR: ")?,
                _ => {}
            }
        }

        ctx.format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}
