//! Logging infrastructure for tripmap.
//!
//! Structured logging to a file, with optional console output:
//! - Writes to the configured log file (cleared on session start)
//! - Optionally mirrors events to stdout
//! - Configurable via RUST_LOG environment variable

use std::fs;
use std::io;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Guard that must be kept alive for the duration of logging.
///
/// Dropping this guard will flush and close the log file writer.
pub struct LoggingGuard {
    _file_guard: WorkerGuard,
}

/// Initialize the global tracing subscriber.
///
/// Creates the log file's parent directory if needed, truncates the file,
/// and installs a non-blocking file layer. When `stdout` is set, events are
/// also written to the terminal.
///
/// The filter comes from `RUST_LOG` when present, otherwise `info`
/// (or `debug` when `debug` is set).
///
/// # Errors
///
/// Returns an error if the directory cannot be created, the file cannot be
/// cleared, or a global subscriber is already installed.
pub fn init_logging(log_file: &Path, stdout: bool, debug: bool) -> Result<LoggingGuard, io::Error> {
    let (dir, file_name) = split_log_path(log_file)?;
    fs::create_dir_all(dir)?;
    fs::write(log_file, "")?;

    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .with_target(true);

    let stdout_layer = stdout.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(io::stdout)
            .with_ansi(true)
            .compact()
    });

    let default_level = if debug { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stdout_layer)
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::AlreadyExists, e.to_string()))?;

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}

/// Splits a log path into its directory and file name.
fn split_log_path(log_file: &Path) -> Result<(&Path, &std::ffi::OsStr), io::Error> {
    let file_name = log_file.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("log path has no file name: {}", log_file.display()),
        )
    })?;
    let dir = match log_file.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    Ok((dir, file_name))
}
