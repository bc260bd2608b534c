// LogSniff - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "LogSniff";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "LogSniff";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Discovery limits
// =============================================================================

/// Directory scanned when no start directory is given.
pub const DEFAULT_START_DIR: &str = "/var/log";

/// Maximum directory depth (below the start directory) whose files are
/// classified.
pub const DEFAULT_MAX_DEPTH: usize = 4;

/// Hard upper bound on max depth (prevents configuration mistakes).
pub const ABSOLUTE_MAX_DEPTH: usize = 50;

/// Maximum number of non-fatal warnings accumulated across a single scan.
/// Prevents the warnings Vec from growing without bound when a large tree
/// contains many unreadable directories.
pub const MAX_WARNINGS: usize = 1_000;

// =============================================================================
// Classifier defaults
// =============================================================================

/// Path prefixes treated as canonical log locations.
///
/// Matched as plain string prefixes, so `/var/log` also covers every entry
/// below it; the more specific entries are kept so that a component-aware
/// match still recognises them when the list is trimmed by configuration.
pub const DEFAULT_KNOWN_LOCATIONS: &[&str] = &[
    "/var/log",
    "/var/log/apache2",
    "/var/log/nginx",
    "/var/log/httpd",
    "/var/log/mysql",
    "/var/log/auth.log",
    "/var/log/secure",
    "/var/log/syslog",
    "/var/log/messages",
    "/var/log/audit/audit.log",
];

/// Regular expressions matched against the lowercased base filename.
///
/// Each pattern is anchored at the start of the name only; a trailing `$` in
/// the pattern is what makes a rule whole-name.
pub const DEFAULT_FILENAME_PATTERNS: &[&str] = &[
    r".*\.log$",
    r".*\.log\.\d+$",
    r".*\.log\.[0-9]{8}$",
    r"access\.log.*",
    r"error\.log.*",
    r"auth\.log.*",
    r"secure.*",
    r"syslog.*",
    r"messages.*",
    r"audit\.log.*",
    r"winlogbeat/.*",
];

/// Files smaller than this are never accepted by the content sniff.
pub const DEFAULT_MIN_CONTENT_SIZE: u64 = 100;

/// Files last modified longer ago than this are never accepted by the
/// content sniff (30 days).
pub const DEFAULT_MAX_AGE_SECS: u64 = 86_400 * 30;

/// Minimum user-configurable max age (days).
pub const MIN_MAX_AGE_DAYS: u64 = 1;

/// Maximum user-configurable max age (days).
pub const MAX_MAX_AGE_DAYS: u64 = 3_650;

/// Number of bytes read from the head of a file for the content sniff.
pub const DEFAULT_READ_LIMIT: usize = 4_096;

/// Hard upper bound on the content sniff read size.
pub const ABSOLUTE_MAX_READ_LIMIT: usize = 1024 * 1024; // 1 MiB

/// Leading window of the read chunk that must be free of NUL bytes.
pub const DEFAULT_SNIFF_WINDOW: usize = 512;

/// Maximum regex pattern length to prevent ReDoS.
pub const MAX_REGEX_PATTERN_LENGTH: usize = 4_096;

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Maximum length of a content preview included in trace output.
/// Prevents accidental exposure of sensitive data in long lines.
pub const DEBUG_MAX_LINE_PREVIEW: usize = 200;

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";
