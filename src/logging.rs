//! Tracing setup for the demo binary.
//!
//! The demo owns the terminal, so log lines go to a daily rolling file.
//! The filter comes from `RUST_LOG`, then `settings.log_filter`, then
//! [`DEFAULT_LOG_FILTER`].

use std::env;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use crate::config::Settings;

/// Filter used when neither `RUST_LOG` nor the settings name one.
pub const DEFAULT_LOG_FILTER: &str = "keybind=info,warn";

/// Prefix of the rolling log files.
const LOG_FILE_PREFIX: &str = "keybind.log";

/// Keeps the background log writer alive.
///
/// Dropping the guard logs shutdown and flushes buffered lines.
#[must_use = "logging stops when the guard is dropped"]
pub struct LogGuard {
    dir: PathBuf,
    filter: String,
    _worker: WorkerGuard,
}

impl LogGuard {
    /// Directory the log files are written to.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The filter directive in effect.
    pub fn filter(&self) -> &str {
        &self.filter
    }
}

impl Drop for LogGuard {
    fn drop(&mut self) {
        info!("keybind shutting down");
    }
}

/// Install the global subscriber.
///
/// `dir` overrides the default directory from [`default_log_dir`].
///
/// # Errors
///
/// Returns an error if the log directory cannot be created, the filter does
/// not parse, or a global subscriber is already installed.
///
/// # Example
///
/// ```no_run
/// use keybind::{config::Settings, logging};
///
/// let _guard = logging::init(&Settings::default(), None)?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn init(settings: &Settings, dir: Option<PathBuf>) -> anyhow::Result<LogGuard> {
    let dir = match dir {
        Some(dir) => dir,
        None => default_log_dir()?,
    };
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("could not create log directory {}", dir.display()))?;

    let directive = filter_directive(env::var(EnvFilter::DEFAULT_ENV).ok(), settings);
    let filter = EnvFilter::try_new(&directive)
        .with_context(|| format!("invalid log filter '{directive}'"))?;

    let appender = RollingFileAppender::new(Rotation::DAILY, &dir, LOG_FILE_PREFIX);
    let (writer, worker) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true),
        )
        .with(filter)
        .try_init()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        log_dir = %dir.display(),
        filter = %directive,
        "keybind starting up"
    );

    Ok(LogGuard {
        dir,
        filter: directive,
        _worker: worker,
    })
}

/// Platform log directory: `<local data dir>/keybind/logs`.
///
/// # Errors
///
/// Returns an error if the platform has no local data directory.
pub fn default_log_dir() -> anyhow::Result<PathBuf> {
    let base = dirs::data_local_dir().context("could not determine local data directory")?;
    Ok(base.join("keybind").join("logs"))
}

/// Pick the filter directive: a non-blank environment value wins over the
/// configured one.
fn filter_directive(from_env: Option<String>, settings: &Settings) -> String {
    from_env
        .filter(|value| !value.trim().is_empty())
        .or_else(|| settings.log_filter.clone())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}
