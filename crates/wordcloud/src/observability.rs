//! Logging setup for the CLI.
//!
//! Human-readable events go to stderr so stdout stays clean for command
//! output and the MCP stdio transport. When a log path or directory is
//! configured, the same events are also written as JSON lines through a
//! non-blocking file appender.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const LOG_PATH_ENV: &str = "WORDCLOUD_LOG_PATH";
const LOG_DIR_ENV: &str = "WORDCLOUD_LOG_DIR";
const LOG_FILE_PREFIX: &str = "wordcloud.jsonl";

/// Where (if anywhere) to write the JSONL log file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservabilityConfig {
    /// Exact file to append to. Wins over `log_dir`.
    pub log_path: Option<PathBuf>,
    /// Directory for daily-rotated log files.
    pub log_dir: Option<PathBuf>,
}

impl ObservabilityConfig {
    /// Read `WORDCLOUD_LOG_PATH` and `WORDCLOUD_LOG_DIR`, falling back to the
    /// configured log directory when the environment sets neither.
    pub fn from_env_with_overrides(config_log_dir: Option<PathBuf>) -> Self {
        Self::from_values(
            std::env::var_os(LOG_PATH_ENV).map(PathBuf::from),
            std::env::var_os(LOG_DIR_ENV).map(PathBuf::from),
            config_log_dir,
        )
    }

    fn from_values(
        env_path: Option<PathBuf>,
        env_dir: Option<PathBuf>,
        config_dir: Option<PathBuf>,
    ) -> Self {
        Self {
            log_path: env_path.filter(|p| !p.as_os_str().is_empty()),
            log_dir: env_dir
                .filter(|p| !p.as_os_str().is_empty())
                .or(config_dir),
        }
    }

    /// Directory and file name of the log target, if one is configured.
    fn file_target(&self) -> Option<(PathBuf, String, bool)> {
        if let Some(ref path) = self.log_path {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
            let name = path.file_name()?.to_string_lossy().into_owned();
            return Some((dir, name, false));
        }
        self.log_dir
            .as_ref()
            .map(|dir| (dir.clone(), LOG_FILE_PREFIX.to_string(), true))
    }
}

/// Build the event filter.
///
/// `RUST_LOG` wins when set. Otherwise `--quiet` means errors only, each
/// `-v` raises verbosity one step, and the configured level is the baseline.
pub fn env_filter(quiet: bool, verbose: u8, config_level: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    EnvFilter::new(level_for(quiet, verbose, config_level))
}

fn level_for(quiet: bool, verbose: u8, config_level: &str) -> &str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => config_level,
        1 => "debug",
        _ => "trace",
    }
}

/// Keeps the background log writer alive; drop it to flush.
pub struct ObservabilityGuard {
    _file: Option<WorkerGuard>,
}

/// Install the global subscriber.
pub fn init_observability(
    config: &ObservabilityConfig,
    filter: EnvFilter,
) -> anyhow::Result<ObservabilityGuard> {
    let (file_layer, guard) = match config.file_target() {
        Some((dir, name, rotate)) => {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("failed to create log directory {}", dir.display()))?;
            let appender = if rotate {
                tracing_appender::rolling::daily(&dir, &name)
            } else {
                tracing_appender::rolling::never(&dir, &name)
            };
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().json().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let stderr_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("a global tracing subscriber is already installed")?;

    Ok(ObservabilityGuard { _file: guard })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_wins_over_verbose() {
        assert_eq!(level_for(true, 2, "info"), "error");
    }

    #[test]
    fn verbosity_steps_up_from_config_level() {
        assert_eq!(level_for(false, 0, "warn"), "warn");
        assert_eq!(level_for(false, 1, "warn"), "debug");
        assert_eq!(level_for(false, 3, "warn"), "trace");
    }

    #[test]
    fn env_path_wins_over_directories() {
        let config = ObservabilityConfig::from_values(
            Some(PathBuf::from("/var/log/wc/out.jsonl")),
            None,
            Some(PathBuf::from("/tmp/logs")),
        );
        let (dir, name, rotate) = config.file_target().unwrap();
        assert_eq!(dir, PathBuf::from("/var/log/wc"));
        assert_eq!(name, "out.jsonl");
        assert!(!rotate);
    }

    #[test]
    fn env_dir_wins_over_config_dir() {
        let config = ObservabilityConfig::from_values(
            None,
            Some(PathBuf::from("/env/logs")),
            Some(PathBuf::from("/config/logs")),
        );
        assert_eq!(config.log_dir, Some(PathBuf::from("/env/logs")));
        assert!(config.file_target().unwrap().2);
    }

    #[test]
    fn no_target_without_settings() {
        let config = ObservabilityConfig::from_values(Some(PathBuf::new()), None, None);
        assert!(config.file_target().is_none());
    }
}
