use std::{
    fs,
    path::{Path, PathBuf},
    time::{Duration, SystemTime},
};
use tokio::task;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*, EnvFilter};

const CLEANUP_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Keeps the file writer flushing; hold it until shutdown
#[allow(dead_code)]
pub struct LoggerGuard(WorkerGuard);

/// Console + daily rotating file logging.
///
/// `level` is the default directive, `RUST_LOG` refines it. Files older than
/// `retention` are deleted by a background task, so this must run inside a
/// tokio runtime.
pub fn init_logging(
    log_dir: impl AsRef<Path>,
    prefix: &str,
    level: &str,
    retention: Duration,
) -> anyhow::Result<LoggerGuard> {
    let log_dir = log_dir.as_ref().to_path_buf();

    let (default_level, invalid_level) = match level.parse::<LevelFilter>() {
        Ok(parsed) => (parsed, false),
        Err(_) => (LevelFilter::INFO, true),
    };

    let builder = EnvFilter::builder().with_default_directive(default_level.into());
    let rust_log = std::env::var("RUST_LOG").unwrap_or_default();
    let console_filter = builder.clone().parse_lossy(&rust_log);
    let file_filter = builder.parse_lossy(&rust_log);

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(prefix)
        .filename_suffix("log")
        .build(&log_dir)
        .map_err(|e| anyhow::anyhow!("Failed to create log file appender in {:?}: {}", log_dir, e))?;
    let (non_blocking, guard) = NonBlocking::new(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_filter(file_filter);
    let stdout_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_ansi(true)
        .with_filter(console_filter);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stdout_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {}", e))?;

    if invalid_level {
        tracing::warn!("Invalid log level '{}', defaulting to 'info'", level);
    }

    start_log_cleanup_task(log_dir, prefix.to_string(), retention);

    Ok(LoggerGuard(guard))
}

fn start_log_cleanup_task(log_dir: PathBuf, prefix: String, max_age: Duration) {
    task::spawn(async move {
        loop {
            match cleanup_old_logs(&log_dir, &prefix, max_age) {
                Ok(0) => {}
                Ok(removed) => tracing::info!("Removed {} expired log file(s)", removed),
                Err(e) => tracing::warn!("Failed to read log directory {:?}: {}", log_dir, e),
            }
            tokio::time::sleep(CLEANUP_INTERVAL).await;
        }
    });
}

/// Delete `{prefix}*.log` files last modified more than `max_age` ago.
///
/// Only an unreadable directory is an error; a file that cannot be inspected
/// or removed is logged and skipped.
fn cleanup_old_logs(log_dir: &Path, prefix: &str, max_age: Duration) -> std::io::Result<usize> {
    let now = SystemTime::now();
    let mut removed = 0;

    for entry in fs::read_dir(log_dir)? {
        let path = match entry {
            Ok(entry) => entry.path(),
            Err(e) => {
                tracing::warn!("Failed to read entry in {:?}: {}", log_dir, e);
                continue;
            }
        };

        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !file_name.starts_with(prefix) || !file_name.ends_with(".log") {
            continue;
        }

        let modified = match fs::metadata(&path).and_then(|m| m.modified()) {
            Ok(modified) => modified,
            Err(e) => {
                tracing::warn!("Failed to stat log file {}: {}", file_name, e);
                continue;
            }
        };

        if now.duration_since(modified).unwrap_or_default() > max_age {
            match fs::remove_file(&path) {
                Ok(()) => {
                    tracing::debug!("Old log file deleted: {}", file_name);
                    removed += 1;
                }
                Err(e) => tracing::warn!("Failed to delete old log file {}: {}", file_name, e),
            }
        }
    }

    Ok(removed)
}
