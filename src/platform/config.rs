// HireScope - platform/config.rs
//
// Platform-specific directory resolution and config.toml loading with
// startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for HireScope data and configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/hirescope/ or %APPDATA%\HireScope\config\)
    pub config_dir: PathBuf,

    /// Data directory for saved searches.
    pub data_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            let data_dir = proj_dirs.data_dir().to_path_buf();

            tracing::debug!(
                config = %config_dir.display(),
                data = %data_dir.display(),
                "Platform paths resolved"
            );

            Self {
                config_dir,
                data_dir,
            }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            let fallback = PathBuf::from(".");
            Self {
                config_dir: fallback.clone(),
                data_dir: fallback,
            }
        }
    }

    /// Use one directory for both config and data (`--config-dir`).
    pub fn single(dir: &Path) -> Self {
        Self {
            config_dir: dir.to_path_buf(),
            data_dir: dir.to_path_buf(),
        }
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[search]` section.
    pub search: SearchSection,
    /// `[export]` section.
    pub export: ExportSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[search]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct SearchSection {
    /// Row count at which filtering switches to the thread pool.
    pub parallel_threshold: Option<usize>,
}

/// `[export]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ExportSection {
    /// "table", "csv" or "json".
    pub default_format: Option<String>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// Invalid values produce warnings and fall back to defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Row count at which filtering switches to the thread pool.
    pub parallel_threshold: usize,

    /// Lower-cased export format name.
    pub default_format: String,

    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: constants::DEFAULT_PARALLEL_THRESHOLD,
            default_format: constants::DEFAULT_EXPORT_FORMAT.to_string(),
            log_level: None,
        }
    }
}

/// Load and validate `config.toml` from the given config directory.
///
/// Returns `AppConfig` with validated values and every non-fatal problem
/// found. A missing file is the normal first-run case: defaults, no problems.
/// An unreadable or unparseable file yields defaults plus the error.
pub fn load_config(config_dir: &Path) -> (AppConfig, Vec<ConfigError>) {
    let config_path = config_dir.join(constants::CONFIG_FILE_NAME);

    let mut problems: Vec<ConfigError> = Vec::new();

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), problems);
    }

    let content = match std::fs::read_to_string(&config_path) {
        Ok(c) => c,
        Err(e) => {
            problems.push(ConfigError::Io {
                path: config_path,
                source: e,
            });
            return (AppConfig::default(), problems);
        }
    };

    let raw: RawConfig = match toml::from_str(&content) {
        Ok(r) => r,
        Err(e) => {
            problems.push(ConfigError::TomlParse {
                path: config_path,
                source: e,
            });
            return (AppConfig::default(), problems);
        }
    };

    tracing::info!(path = %config_path.display(), "Loaded config.toml");

    let config = validate(raw, &mut problems);

    if !problems.is_empty() {
        tracing::warn!(
            count = problems.len(),
            "Config validation produced warnings"
        );
    }

    (config, problems)
}

/// Check each raw value against the named limits, accumulating all problems.
fn validate(raw: RawConfig, problems: &mut Vec<ConfigError>) -> AppConfig {
    let mut config = AppConfig::default();

    // -- Search: parallel_threshold --
    if let Some(threshold) = raw.search.parallel_threshold {
        if (constants::MIN_PARALLEL_THRESHOLD..=constants::MAX_PARALLEL_THRESHOLD)
            .contains(&threshold)
        {
            config.parallel_threshold = threshold;
        } else {
            problems.push(ConfigError::ValueOutOfRange {
                field: "search.parallel_threshold".to_string(),
                value: threshold.to_string(),
                expected: format!(
                    "{}-{} (using default {})",
                    constants::MIN_PARALLEL_THRESHOLD,
                    constants::MAX_PARALLEL_THRESHOLD,
                    constants::DEFAULT_PARALLEL_THRESHOLD,
                ),
            });
        }
    }

    // -- Export: default_format --
    if let Some(ref format) = raw.export.default_format {
        let lowered = format.to_lowercase();
        if ["table", "csv", "json"].contains(&lowered.as_str()) {
            config.default_format = lowered;
        } else {
            problems.push(ConfigError::ValueOutOfRange {
                field: "export.default_format".to_string(),
                value: format.clone(),
                expected: format!(
                    "\"table\", \"csv\" or \"json\" (using default {})",
                    constants::DEFAULT_EXPORT_FORMAT
                ),
            });
        }
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.to_lowercase());
        } else {
            problems.push(ConfigError::ValueOutOfRange {
                field: "logging.level".to_string(),
                value: level.clone(),
                expected: format!(
                    "error, warn, info, debug or trace (using default {})",
                    constants::DEFAULT_LOG_LEVEL
                ),
            });
        }
    }

    config
}
