// LogSniff - platform/config.rs
//
// Platform-specific config directory resolution and config.toml loading with
// startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::core::classifier::{ClassifierConfig, LocationMatch};
use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for LogSniff configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/logsniff/ or %APPDATA%\LogSniff\config\)
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            tracing::debug!(config = %config_dir.display(), "Platform paths resolved");
            Self { config_dir }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            Self {
                config_dir: PathBuf::from("."),
            }
        }
    }

    /// Default location of config.toml.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
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
    /// `[discovery]` section.
    pub discovery: DiscoverySection,
    /// `[classifier]` section.
    pub classifier: ClassifierSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[discovery]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct DiscoverySection {
    /// Directory scanned when no path is given on the command line.
    pub start_dir: Option<String>,
    /// Deepest directory level whose files are classified.
    pub max_depth: Option<usize>,
    /// Classify files on a worker pool.
    pub parallel: Option<bool>,
}

/// `[classifier]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ClassifierSection {
    /// Replaces the built-in known-location list.
    pub known_locations: Option<Vec<String>>,
    /// Replaces the built-in filename-pattern list.
    pub filename_patterns: Option<Vec<String>>,
    /// "prefix" or "component".
    pub location_match: Option<String>,
    pub min_size_bytes: Option<u64>,
    pub max_age_days: Option<u64>,
    pub read_limit_bytes: Option<usize>,
    pub sniff_bytes: Option<usize>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
    /// Log file path (empty = stderr only).
    pub file: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// Invalid values produce warnings and fall back to defaults.
#[derive(Debug, Clone)]
pub struct AppConfig {
    // -- Discovery --
    pub start_dir: PathBuf,
    pub max_depth: usize,
    pub parallel: bool,

    // -- Classifier --
    pub classifier: ClassifierConfig,

    // -- Logging --
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
    /// Log file path.
    pub log_file: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            start_dir: PathBuf::from(constants::DEFAULT_START_DIR),
            max_depth: constants::DEFAULT_MAX_DEPTH,
            parallel: false,
            classifier: ClassifierConfig::default(),
            log_level: None,
            log_file: None,
        }
    }
}

/// Load and validate the config file at `config_path`.
///
/// Returns `AppConfig` with validated values and a list of non-fatal
/// problems. A missing file yields defaults with no warnings (first run);
/// an unreadable or unparseable file yields defaults plus that error.
pub fn load_config(config_path: &Path) -> (AppConfig, Vec<ConfigError>) {
    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), Vec::new());
    }

    let content = match std::fs::read_to_string(config_path) {
        Ok(c) => c,
        Err(source) => {
            let err = ConfigError::Io {
                path: config_path.to_path_buf(),
                source,
            };
            return (AppConfig::default(), vec![err]);
        }
    };

    parse_config(&content, config_path)
}

/// Parse and validate config.toml content. `path` is used for error context.
pub fn parse_config(content: &str, path: &Path) -> (AppConfig, Vec<ConfigError>) {
    let raw: RawConfig = match toml::from_str(content) {
        Ok(r) => r,
        Err(source) => {
            let err = ConfigError::TomlParse {
                path: path.to_path_buf(),
                source,
            };
            return (AppConfig::default(), vec![err]);
        }
    };

    tracing::debug!(path = %path.display(), "Loaded config.toml");
    validate(raw)
}

fn out_of_range(field: &str, value: impl ToString, expected: String) -> ConfigError {
    ConfigError::ValueOutOfRange {
        field: field.to_string(),
        value: value.to_string(),
        expected,
    }
}

/// Validate each field, accumulating all problems.
fn validate(raw: RawConfig) -> (AppConfig, Vec<ConfigError>) {
    let mut config = AppConfig::default();
    let mut warnings: Vec<ConfigError> = Vec::new();

    // -- Discovery: start_dir --
    if let Some(dir) = raw.discovery.start_dir {
        if dir.trim().is_empty() {
            warnings.push(out_of_range(
                "discovery.start_dir",
                "",
                format!("a directory path (default {})", constants::DEFAULT_START_DIR),
            ));
        } else {
            config.start_dir = PathBuf::from(dir);
        }
    }

    // -- Discovery: max_depth --
    if let Some(depth) = raw.discovery.max_depth {
        if depth <= constants::ABSOLUTE_MAX_DEPTH {
            config.max_depth = depth;
        } else {
            warnings.push(out_of_range(
                "discovery.max_depth",
                depth,
                format!(
                    "0-{} (default {})",
                    constants::ABSOLUTE_MAX_DEPTH,
                    constants::DEFAULT_MAX_DEPTH
                ),
            ));
        }
    }

    if let Some(parallel) = raw.discovery.parallel {
        config.parallel = parallel;
    }

    // -- Classifier: rule lists --
    let section = raw.classifier;
    if let Some(locations) = section.known_locations {
        config.classifier.known_locations = locations;
    }
    if let Some(patterns) = section.filename_patterns {
        config.classifier.filename_patterns = patterns;
    }

    // -- Classifier: location_match --
    if let Some(ref mode) = section.location_match {
        match LocationMatch::parse(mode) {
            Some(m) => config.classifier.location_match = m,
            None => warnings.push(out_of_range(
                "classifier.location_match",
                mode,
                "\"prefix\" or \"component\" (default prefix)".to_string(),
            )),
        }
    }

    if let Some(min_size) = section.min_size_bytes {
        config.classifier.min_size = min_size;
    }

    // -- Classifier: max_age_days --
    if let Some(days) = section.max_age_days {
        if (constants::MIN_MAX_AGE_DAYS..=constants::MAX_MAX_AGE_DAYS).contains(&days) {
            config.classifier.max_age_secs = days * 86_400;
        } else {
            warnings.push(out_of_range(
                "classifier.max_age_days",
                days,
                format!(
                    "{}-{} (default {})",
                    constants::MIN_MAX_AGE_DAYS,
                    constants::MAX_MAX_AGE_DAYS,
                    constants::DEFAULT_MAX_AGE_SECS / 86_400
                ),
            ));
        }
    }

    // -- Classifier: read_limit_bytes --
    if let Some(limit) = section.read_limit_bytes {
        if (1..=constants::ABSOLUTE_MAX_READ_LIMIT).contains(&limit) {
            config.classifier.read_limit = limit;
        } else {
            warnings.push(out_of_range(
                "classifier.read_limit_bytes",
                limit,
                format!(
                    "1-{} (default {})",
                    constants::ABSOLUTE_MAX_READ_LIMIT,
                    constants::DEFAULT_READ_LIMIT
                ),
            ));
        }
    }

    // -- Classifier: sniff_bytes (bounded by the effective read limit) --
    let read_limit = config.classifier.read_limit;
    if let Some(window) = section.sniff_bytes {
        if (1..=read_limit).contains(&window) {
            config.classifier.sniff_window = window;
        } else {
            warnings.push(out_of_range(
                "classifier.sniff_bytes",
                window,
                format!("1-{read_limit} (default {})", constants::DEFAULT_SNIFF_WINDOW),
            ));
        }
    }
    if config.classifier.sniff_window > read_limit {
        config.classifier.sniff_window = read_limit;
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.clone());
        } else {
            warnings.push(out_of_range(
                "logging.level",
                level,
                "one of error, warn, info, debug, trace (default info)".to_string(),
            ));
        }
    }

    // -- Logging: file --
    if let Some(file) = raw.logging.file {
        if !file.is_empty() {
            config.log_file = Some(file);
        }
    }

    (config, warnings)
}
