//! Tracing subscriber initialization.
//!
//! The alternate screen owns stdout, so logs go to a file instead; monitor
//! them with `tail -f` in a second terminal. Logging is off unless a log
//! file is configured.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

/// Initialize file-based logging.
///
/// Respects `RUST_LOG`, defaulting to `info`. Creates the log directory if
/// it does not exist. Fails if a subscriber is already installed.
pub fn init(log_path: &Path) -> Result<()> {
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }

    let file_name = log_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow!("Invalid log file path: {}", log_path.display()))?;
    let directory = log_path.parent().unwrap_or_else(|| Path::new("."));

    let file_appender = tracing_appender::rolling::never(directory, file_name);
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(file_appender)
        // No ANSI colors in log files.
        .with_ansi(false)
        .try_init()
        .map_err(|_| anyhow!("Tracing subscriber already initialized"))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn init_creates_the_log_directory() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let log_file = temp_dir.path().join("logs").join("daoscope.log");

        // Only the first init in the process can install the subscriber;
        // directory creation must happen either way.
        let _ = init(&log_file);
        assert!(log_file.parent().expect("has parent").is_dir());
    }

    #[test]
    fn init_rejects_a_path_without_a_file_name() {
        assert!(init(Path::new("/")).is_err());
    }
}
