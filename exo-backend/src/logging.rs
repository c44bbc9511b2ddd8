use std::{
    fs,
    path::{Path, PathBuf},
    time::{Duration, SystemTime},
};
use tokio::task;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, filter::LevelFilter, fmt, prelude::*};

/// Keeps the non-blocking file writer alive; drop it last.
#[allow(dead_code)]
pub struct LoggerGuard(Option<WorkerGuard>);

const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

fn normalize_level(level: &str) -> LevelFilter {
    let level = level.trim().to_ascii_lowercase();
    if !LEVELS.contains(&level.as_str()) {
        eprintln!("Invalid log level '{}', defaulting to 'info'", level);
        return LevelFilter::INFO;
    }
    level.parse().unwrap_or(LevelFilter::INFO)
}

/// Install stdout + daily-rotated file logging.
///
/// `RUST_LOG` refines the configured level. If the log directory cannot be
/// created only stdout logging is installed.
pub fn init_logging(
    log_dir: impl AsRef<Path>,
    prefix: &str,
    level: &str,
    retention_days: u64,
) -> LoggerGuard {
    let log_dir = log_dir.as_ref().to_path_buf();
    let builder = EnvFilter::builder().with_default_directive(normalize_level(level).into());
    let rust_log = std::env::var("RUST_LOG").unwrap_or_default();

    let console_filter = builder.clone().parse_lossy(&rust_log);

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(prefix)
        .filename_suffix("log")
        .build(&log_dir);

    match file_appender {
        Ok(appender) => {
            let (non_blocking, guard) = NonBlocking::new(appender);
            let file_layer = fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_filter(builder.parse_lossy(&rust_log));
            let stdout_layer = fmt::layer()
                .with_writer(std::io::stdout)
                .with_ansi(true)
                .with_filter(console_filter);

            tracing_subscriber::registry()
                .with(file_layer)
                .with(stdout_layer)
                .init();

            let max_age = Duration::from_secs(60 * 60 * 24 * retention_days);
            start_log_cleanup_task(log_dir, prefix.to_string(), max_age);

            LoggerGuard(Some(guard))
        }
        Err(e) => {
            let stdout_layer = fmt::layer()
                .with_writer(std::io::stdout)
                .with_ansi(true)
                .with_filter(console_filter);
            tracing_subscriber::registry().with(stdout_layer).init();
            tracing::warn!("File logging disabled, cannot open {:?}: {}", log_dir, e);
            LoggerGuard(None)
        }
    }
}

fn start_log_cleanup_task(log_dir: PathBuf, prefix: String, max_age: Duration) {
    const CLEANUP_INTERVAL: Duration = Duration::from_secs(60 * 60);

    task::spawn(async move {
        loop {
            match cleanup_old_logs(&log_dir, &prefix, max_age) {
                Ok(0) => {}
                Ok(n) => tracing::info!("Deleted {} old log files", n),
                Err(e) => tracing::warn!("Failed to delete old log file: {}", e),
            }
            tokio::time::sleep(CLEANUP_INTERVAL).await;
        }
    });
}

fn cleanup_old_logs(log_dir: &Path, prefix: &str, max_age: Duration) -> std::io::Result<usize> {
    let now = SystemTime::now();
    let mut deleted = 0;

    for entry in fs::read_dir(log_dir)? {
        let path = entry?.path();

        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !(file_name.starts_with(prefix) && file_name.ends_with(".log")) {
            continue;
        }

        let modified = fs::metadata(&path)?.modified()?;
        if now.duration_since(modified).unwrap_or_default() >= max_age {
            fs::remove_file(&path)?;
            deleted += 1;
        }
    }
    Ok(deleted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_level() {
        assert_eq!(normalize_level("debug"), LevelFilter::DEBUG);
        assert_eq!(normalize_level(" WARN "), LevelFilter::WARN);
        assert_eq!(normalize_level("verbose"), LevelFilter::INFO);
    }

    #[test]
    fn test_cleanup_only_touches_matching_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("exo-backend.2026-01-01.log"), "old").unwrap();
        fs::write(dir.path().join("other.log"), "keep").unwrap();
        fs::write(dir.path().join("exo-backend.txt"), "keep").unwrap();

        // Zero max age: every matching file counts as expired
        let deleted = cleanup_old_logs(dir.path(), "exo-backend", Duration::ZERO).unwrap();
        assert_eq!(deleted, 1);
        assert!(dir.path().join("other.log").exists());
        assert!(dir.path().join("exo-backend.txt").exists());
    }
}
