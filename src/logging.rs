//! Logging initialization for autox.

use std::path::{Path, PathBuf};

use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*};

use crate::core::errors::{AutoxError, Result};

/// Name of the log file inside each run directory.
pub const LOG_FILE_NAME: &str = "autox.log";

/// Keeps the file writer alive; dropping it flushes buffered log lines.
pub struct LogGuard {
    _worker: WorkerGuard,
    pub file: PathBuf,
}

/// Initialize a tracing subscriber with console and file output.
///
/// Each invocation gets its own directory, `<log_dir>/run-YYYY-MM-DD-HH-MM-SS/`,
/// holding `autox.log`. The console layer writes to stderr with colors; the
/// file layer is plain text.
///
/// `level` is the default filter (e.g. `info`, `debug`). `RUST_LOG`
/// overrides it when set:
///
/// ```sh
/// RUST_LOG=autox=trace autox env list
/// ```
pub fn init_logging(log_dir: &Path, level: &str) -> Result<LogGuard> {
    let level: LevelFilter = level.parse().map_err(|_| AutoxError::InvalidConfig {
        detail: format!("unknown log level '{level}' (use trace, debug, info, warn or error)"),
    })?;

    let run_dir = log_dir.join(
        chrono::Local::now()
            .format("run-%Y-%m-%d-%H-%M-%S")
            .to_string(),
    );
    std::fs::create_dir_all(&run_dir)?;

    let file_appender = rolling::never(&run_dir, LOG_FILE_NAME);
    let (non_blocking_file, worker) = non_blocking(file_appender);

    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let subscriber = Registry::default()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .event_format(fmt::format().compact().with_target(false)),
        )
        .with(
            fmt::layer()
                .with_writer(non_blocking_file)
                .with_ansi(false)
                .with_file(true)
                .with_line_number(true),
        );

    tracing::subscriber::set_global_default(subscriber).map_err(|e| AutoxError::Logging {
        detail: e.to_string(),
    })?;

    Ok(LogGuard {
        _worker: worker,
        file: run_dir.join(LOG_FILE_NAME),
    })
}
