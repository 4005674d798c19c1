//! Logging setup.
//!
//! While the wizard owns the terminal, events go to a session file under the
//! data directory. Headless commands write to stderr.

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;

/// Where log events end up for this run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// Session file, created fresh for each TUI run
    File(PathBuf),
    Stderr,
}

impl LogTarget {
    /// File logging only when the TUI runs and `logging.to_file` is set
    pub fn for_run(config: &Config, is_tui_mode: bool) -> Self {
        if is_tui_mode && config.logging.to_file {
            LogTarget::File(config.logs_path().join(session_log_name()))
        } else {
            LogTarget::Stderr
        }
    }
}

/// Keeps the file writer alive; dropping it flushes buffered events
pub struct LoggingHandle {
    pub _guard: Option<WorkerGuard>,
    /// Set when events go to a session file
    pub log_file_path: Option<PathBuf>,
}

fn session_log_name() -> String {
    let timestamp = chrono::Utc::now().format("%Y%m%dT%H%M%SZ");
    format!("inquiry-{timestamp}.log")
}

/// `RUST_LOG` beats `--debug`, which beats `logging.level`
fn build_filter(config: &Config, debug_override: bool) -> EnvFilter {
    let level = if debug_override {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

pub fn init_logging(
    config: &Config,
    is_tui_mode: bool,
    debug_override: bool,
) -> Result<LoggingHandle> {
    let filter = build_filter(config, debug_override);

    let handle = match LogTarget::for_run(config, is_tui_mode) {
        LogTarget::File(path) => {
            let (dir, name) = match (path.parent(), path.file_name()) {
                (Some(dir), Some(name)) => (dir.to_path_buf(), name.to_owned()),
                _ => anyhow::bail!("Invalid log file path {}", path.display()),
            };
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::never(&dir, name));
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(false)
                        .with_ansi(false)
                        .with_writer(writer),
                )
                .init();

            LoggingHandle {
                _guard: Some(guard),
                log_file_path: Some(path),
            }
        }
        LogTarget::Stderr => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(false)
                        .with_writer(std::io::stderr),
                )
                .init();

            LoggingHandle {
                _guard: None,
                log_file_path: None,
            }
        }
    };

    tracing::debug!(
        outbox = %config.outbox_path().display(),
        outbox_enabled = config.submission.outbox_enabled,
        webhook = config.submission.webhook.is_some(),
        "Logging initialized"
    );
    Ok(handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_in(temp_dir: &TempDir) -> Config {
        let mut config = Config::default();
        config.paths.data = temp_dir.path().to_string_lossy().to_string();
        config
    }

    #[test]
    fn test_tui_run_logs_to_session_file_under_data_dir() {
        let temp_dir = TempDir::new().unwrap();
        let config = config_in(&temp_dir);

        match LogTarget::for_run(&config, true) {
            LogTarget::File(path) => {
                assert!(path.starts_with(temp_dir.path().join("logs")));
                let name = path.file_name().unwrap().to_string_lossy().to_string();
                assert!(name.starts_with("inquiry-"));
                assert!(name.ends_with("Z.log"));
            }
            LogTarget::Stderr => panic!("TUI run should log to a file"),
        }
    }

    #[test]
    fn test_headless_commands_log_to_stderr() {
        let temp_dir = TempDir::new().unwrap();
        let config = config_in(&temp_dir);
        assert_eq!(LogTarget::for_run(&config, false), LogTarget::Stderr);
    }

    #[test]
    fn test_file_logging_can_be_switched_off() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = config_in(&temp_dir);
        config.logging.to_file = false;
        assert_eq!(LogTarget::for_run(&config, true), LogTarget::Stderr);
    }
}
