//! Structured logging for the landscape generator.
//!
//! Console output with uptime timestamps and module paths, plus a JSON log
//! file in debug builds. `RUST_LOG` wins over the configured `log_level`.

use landscape_config::LandscapeConfig;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when neither `RUST_LOG` nor the config sets a level.
pub const DEFAULT_FILTER: &str = "info";

/// Name of the JSON log file written in debug builds.
pub const LOG_FILE_NAME: &str = "landscape.log";

/// Filter string taken from `config`, falling back to [`DEFAULT_FILTER`].
pub fn filter_directive(config: Option<&LandscapeConfig>) -> String {
    match config {
        Some(config) if !config.debug.log_level.trim().is_empty() => {
            config.debug.log_level.trim().to_string()
        }
        _ => DEFAULT_FILTER.to_string(),
    }
}

/// Path of the JSON log file inside `log_dir`.
pub fn log_file_path(log_dir: &Path) -> PathBuf {
    log_dir.join(LOG_FILE_NAME)
}

/// Filter for this run: `RUST_LOG` when set and valid, else [`filter_directive`].
pub fn env_filter(config: Option<&LandscapeConfig>) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_directive(config)))
}

/// Creates `log_dir` and truncates the JSON log file inside it.
///
/// Returns `Ok(None)` for release builds or when no directory is given.
pub fn open_log_file(log_dir: Option<&Path>, debug_build: bool) -> io::Result<Option<File>> {
    let Some(log_dir) = log_dir.filter(|_| debug_build) else {
        return Ok(None);
    };
    fs::create_dir_all(log_dir)?;
    File::create(log_file_path(log_dir)).map(Some)
}

/// Initialize the global tracing subscriber.
///
/// * `log_dir` - directory for the JSON log file (debug builds only)
/// * `debug_build` - whether to write the JSON log file
/// * `config` - source of the `log_level` directive
///
/// A log file that cannot be opened is reported once on the console and
/// otherwise skipped.
///
/// ```no_run
/// use landscape_config::LandscapeConfig;
/// use landscape_log::init_logging;
///
/// let config = LandscapeConfig::default();
/// init_logging(Some(std::path::Path::new("./logs")), true, Some(&config));
/// ```
pub fn init_logging(log_dir: Option<&Path>, debug_build: bool, config: Option<&LandscapeConfig>) {
    let (log_file, open_error) = match open_log_file(log_dir, debug_build) {
        Ok(file) => (file, None),
        Err(e) => (None, Some(e)),
    };

    let json_layer = log_file.map(|file| {
        fmt::layer()
            .json()
            .with_writer(file)
            .with_ansi(false)
            .with_timer(fmt::time::uptime())
    });

    tracing_subscriber::registry()
        .with(env_filter(config))
        .with(fmt::layer().with_timer(fmt::time::uptime()))
        .with(json_layer)
        .init();

    if let Some(error) = open_error {
        tracing::warn!(%error, dir = ?log_dir, "log file unavailable; console only");
    }
}

/// An `EnvFilter` built from [`DEFAULT_FILTER`].
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new(DEFAULT_FILTER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_level() {
        let filter = default_env_filter();
        assert!(format!("{filter}").contains("info"));
    }

    #[test]
    fn test_directive_without_config() {
        assert_eq!(filter_directive(None), "info");
    }

    #[test]
    fn test_directive_from_config() {
        let mut config = LandscapeConfig::default();
        config.debug.log_level = "debug,landscape_terrain=trace".to_string();
        assert_eq!(
            filter_directive(Some(&config)),
            "debug,landscape_terrain=trace"
        );
    }

    #[test]
    fn test_blank_config_level_falls_back() {
        let mut config = LandscapeConfig::default();
        config.debug.log_level = "  ".to_string();
        assert_eq!(filter_directive(Some(&config)), DEFAULT_FILTER);
    }

    #[test]
    fn test_env_filter_parsing() {
        let valid_filters = [
            "info",
            "debug,landscape_terrain=trace",
            "warn,landscape_app=debug,landscape_scene=trace",
            "error",
        ];

        for filter_str in &valid_filters {
            let result = EnvFilter::try_new(*filter_str);
            assert!(result.is_ok(), "Failed to parse filter: {}", filter_str);
        }
    }

    #[test]
    fn test_log_file_only_in_debug_builds() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_dir = temp_dir.path().join("logs");

        assert!(open_log_file(Some(&log_dir), false).unwrap().is_none());
        assert!(!log_dir.exists());
        assert!(open_log_file(None, true).unwrap().is_none());

        assert!(open_log_file(Some(&log_dir), true).unwrap().is_some());
        assert!(log_file_path(&log_dir).is_file());
    }

    #[test]
    fn test_unwritable_log_dir_is_an_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let blocker = temp_dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"").unwrap();
        assert!(open_log_file(Some(&blocker.join("logs")), true).is_err());
    }

    #[test]
    fn test_log_file_path() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = log_file_path(temp_dir.path());
        assert_eq!(path.file_name().unwrap(), LOG_FILE_NAME);
        assert_eq!(path.parent().unwrap(), temp_dir.path());
    }
}
