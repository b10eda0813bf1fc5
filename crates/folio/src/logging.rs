use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use directories::ProjectDirs;
use tracing_appender::rolling;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_FILE_PREFIX: &str = "folio.log";
const LOG_RETENTION_DAYS: u64 = 7;

/// Return the log directory path.
///
/// Precedence: `FOLIO_LOG_DIR` env var > platform data dir > `./logs`.
pub fn log_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("FOLIO_LOG_DIR") {
        return PathBuf::from(dir);
    }

    ProjectDirs::from("", "", "folio")
        .map(|dirs| dirs.data_dir().join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

/// Remove rotated log files older than `max_age_days`.
///
/// Only touches files named with the appender prefix.
fn cleanup_old_logs(log_path: &Path, max_age_days: u64) {
    let Some(cutoff) =
        SystemTime::now().checked_sub(Duration::from_secs(max_age_days * 86400))
    else {
        return;
    };
    let Ok(entries) = std::fs::read_dir(log_path) else {
        return;
    };
    for entry in entries.flatten() {
        if !entry
            .file_name()
            .to_string_lossy()
            .starts_with(LOG_FILE_PREFIX)
        {
            continue;
        }
        let stale = entry
            .metadata()
            .and_then(|meta| meta.modified())
            .is_ok_and(|modified| modified < cutoff);
        if stale {
            let _ = std::fs::remove_file(entry.path());
        }
    }
}

/// Initialize the logging subsystem.
///
/// Filter controlled by `FOLIO_LOG` or `RUST_LOG` (default: `info`).
/// Output goes to a daily rotated file in [`log_dir`]; the terminal is
/// owned by the UI.
pub fn init() -> color_eyre::Result<PathBuf> {
    let filter = EnvFilter::try_from_env("FOLIO_LOG")
        .or_else(|_| EnvFilter::try_from_env("RUST_LOG"))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let log_path = log_dir();
    std::fs::create_dir_all(&log_path)?;
    cleanup_old_logs(&log_path, LOG_RETENTION_DAYS);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(rolling::daily(&log_path, LOG_FILE_PREFIX))
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()?;

    Ok(log_path)
}
