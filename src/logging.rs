//! Tracing subscriber setup.
//!
//! A non-empty `RUST_LOG` replaces the configured level entirely; the level
//! only applies when `RUST_LOG` is unset or empty. Output goes to stderr, or
//! to a daily rotated file when a log directory is configured.

use std::str::FromStr;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::error::{Result, SysinfoDisplayError};

/// File name prefix for rotated log files.
pub const LOG_FILE_PREFIX: &str = "sysinfo-display.log";

/// Build the env filter from `RUST_LOG`, falling back to `level`.
///
/// # Errors
///
/// Returns `Config` if `level` is not a tracing level
pub fn env_filter(level: &str) -> Result<EnvFilter> {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    build_filter(level, directives.as_deref())
}

/// `directives` uses `RUST_LOG` syntax; unparsable parts are skipped.
fn build_filter(level: &str, directives: Option<&str>) -> Result<EnvFilter> {
    let level = tracing::Level::from_str(level).map_err(|_| {
        SysinfoDisplayError::Config(serde::de::Error::custom(format!("unknown log level: {}", level)))
    })?;

    // The default directive is only used when no directives parse
    Ok(EnvFilter::builder()
        .with_default_directive(level.into())
        .parse_lossy(directives.unwrap_or_default()))
}

/// Install the global subscriber.
///
/// The returned guard flushes the file writer; hold it until exit. It is
/// `None` when logging to stderr.
///
/// # Errors
///
/// Returns error on a bad level, or when the log directory cannot be created
pub fn init(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = env_filter(&config.level)?;

    match &config.directory {
        Some(directory) => {
            std::fs::create_dir_all(directory)?;
            let appender = tracing_appender::rolling::daily(directory, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::level_filters::LevelFilter;

    #[test]
    fn test_env_filter_accepts_config_levels() {
        for level in ["trace", "debug", "info", "warn", "error"] {
            assert!(env_filter(level).is_ok(), "level {} should parse", level);
        }
    }

    #[test]
    fn test_configured_level_applies_without_rust_log() {
        let filter = build_filter("debug", None).unwrap();
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));

        let filter = build_filter("warn", Some("")).unwrap();
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn test_rust_log_can_lower_verbosity() {
        let filter = build_filter("info", Some("warn")).unwrap();
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn test_rust_log_can_raise_verbosity() {
        let filter = build_filter("info", Some("trace")).unwrap();
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::TRACE));
    }

    #[test]
    fn test_rust_log_target_directive_replaces_default() {
        let filter = build_filter("info", Some("sysinfo_display=error")).unwrap();
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::ERROR));
    }

    #[test]
    fn test_build_filter_rejects_unknown_level_even_with_rust_log() {
        assert!(build_filter("loud", Some("warn")).is_err());
    }

    #[test]
    fn test_env_filter_rejects_unknown_level() {
        match env_filter("chatty") {
            Err(SysinfoDisplayError::Config(e)) => assert!(e.to_string().contains("chatty")),
            other => panic!("Expected Config error, got: {:?}", other.map(|_| ())),
        }
    }
}
