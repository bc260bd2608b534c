// LogSniff - core/classifier.rs
//
// Probable-log-file heuristic. Three stages, evaluated in order, the first
// acceptance short-circuits the rest:
//
//   1. Location   -- path string starts with a known log location.
//   2. Filename   -- lowercased base filename matches a pattern (anchored at
//                    the start of the name only).
//   3. Content    -- regular file, >= min size, modified recently, and no NUL
//                    byte in the leading sniff window of its first chunk.
//
// Stages 1 and 2 never touch the filesystem, so a matching path is accepted
// even when nothing exists there. Stage 3 is a stat plus one bounded read.
//
// The boolean API is total: every failure maps to `false`. `evaluate` keeps
// the reason (or the I/O error) for diagnostics.

use crate::core::model::{MatchStage, RejectReason, Verdict};
use crate::platform::fs::{FileSystem, OsFileSystem};
use crate::util::constants;
use crate::util::error::ClassifierError;
use chrono::{DateTime, Utc};
use regex::Regex;
use std::io;
use std::path::Path;
use std::sync::OnceLock;
use std::time::{Duration, SystemTime};

// =============================================================================
// Configuration
// =============================================================================

/// How known locations are compared against a candidate path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocationMatch {
    /// Plain string prefix: `/var/log` also matches `/var/log2/x`.
    #[default]
    Prefix,
    /// Whole path components only: `/var/log` matches `/var/log/x` but not
    /// `/var/log2/x`.
    Component,
}

impl LocationMatch {
    /// Parse a config value ("prefix" or "component", case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "prefix" => Some(Self::Prefix),
            "component" => Some(Self::Component),
            _ => None,
        }
    }
}

/// Rule set for a `Classifier`.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// Path prefixes treated as canonical log directories.
    pub known_locations: Vec<String>,

    /// Regular expressions tried against the lowercased base filename.
    pub filename_patterns: Vec<String>,

    pub location_match: LocationMatch,

    /// Content sniff: smallest file size accepted, in bytes.
    pub min_size: u64,

    /// Content sniff: oldest accepted modification age, in seconds.
    pub max_age_secs: u64,

    /// Content sniff: bytes read from the head of the file.
    pub read_limit: usize,

    /// Content sniff: leading bytes of the read chunk that must contain no NUL.
    pub sniff_window: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            known_locations: constants::DEFAULT_KNOWN_LOCATIONS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            filename_patterns: constants::DEFAULT_FILENAME_PATTERNS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            location_match: LocationMatch::Prefix,
            min_size: constants::DEFAULT_MIN_CONTENT_SIZE,
            max_age_secs: constants::DEFAULT_MAX_AGE_SECS,
            read_limit: constants::DEFAULT_READ_LIMIT,
            sniff_window: constants::DEFAULT_SNIFF_WINDOW,
        }
    }
}

// =============================================================================
// Classifier
// =============================================================================

/// Compiled, immutable classification rules.
///
/// Cheap to share across threads; every method takes `&self`.
#[derive(Debug)]
pub struct Classifier<F: FileSystem = OsFileSystem> {
    locations: Vec<String>,
    patterns: Vec<Regex>,
    location_match: LocationMatch,
    min_size: u64,
    max_age: Duration,
    read_limit: usize,
    sniff_window: usize,
    fs: F,
}

impl Classifier {
    /// Compile `config` against the real filesystem.
    pub fn new(config: &ClassifierConfig) -> Result<Self, ClassifierError> {
        Self::with_fs(config, OsFileSystem)
    }
}

impl Default for Classifier {
    /// Built-in rules. Any built-in pattern that fails to compile is logged
    /// and skipped rather than aborting.
    fn default() -> Self {
        let config = ClassifierConfig::default();
        let patterns = config
            .filename_patterns
            .iter()
            .filter_map(|p| match compile_pattern(p) {
                Ok(re) => Some(re),
                Err(e) => {
                    tracing::warn!(error = %e, "Invalid built-in filename pattern, skipping");
                    None
                }
            })
            .collect();
        Self::from_parts(&config, patterns, OsFileSystem)
    }
}

impl<F: FileSystem> Classifier<F> {
    /// Compile `config`, reading file content through `fs`.
    pub fn with_fs(config: &ClassifierConfig, fs: F) -> Result<Self, ClassifierError> {
        if let Some(index) = config.known_locations.iter().position(|l| l.is_empty()) {
            return Err(ClassifierError::EmptyLocation { index });
        }
        let patterns = config
            .filename_patterns
            .iter()
            .map(|p| compile_pattern(p))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            locations = config.known_locations.len(),
            patterns = patterns.len(),
            location_match = ?config.location_match,
            "Classifier compiled"
        );

        Ok(Self::from_parts(config, patterns, fs))
    }

    fn from_parts(config: &ClassifierConfig, patterns: Vec<Regex>, fs: F) -> Self {
        let max_age_secs = config
            .max_age_secs
            .min(constants::MAX_MAX_AGE_DAYS * 86_400);
        let read_limit = config
            .read_limit
            .clamp(1, constants::ABSOLUTE_MAX_READ_LIMIT);
        Self {
            locations: config.known_locations.clone(),
            patterns,
            location_match: config.location_match,
            min_size: config.min_size,
            max_age: Duration::from_secs(max_age_secs),
            read_limit,
            sniff_window: config.sniff_window.clamp(1, read_limit),
            fs,
        }
    }

    /// True if `path` is a probable log file. Never fails.
    pub fn classify(&self, path: &Path) -> bool {
        self.evaluate(path).is_log()
    }

    /// Evaluate `path` against the current time.
    pub fn evaluate(&self, path: &Path) -> Verdict {
        self.evaluate_at(path, Utc::now())
    }

    /// Evaluate `path` as if the current time were `now`.
    pub fn evaluate_at(&self, path: &Path, now: DateTime<Utc>) -> Verdict {
        let verdict = if self.matches_location(path) {
            Verdict::Accepted(MatchStage::Location)
        } else if self.matches_filename(path) {
            Verdict::Accepted(MatchStage::FilenamePattern)
        } else {
            self.sniff(path, now)
        };

        tracing::trace!(path = %path.display(), verdict = %verdict, "Classified");
        verdict
    }

    fn matches_location(&self, path: &Path) -> bool {
        match self.location_match {
            LocationMatch::Prefix => {
                let s = path.to_string_lossy();
                self.locations.iter().any(|loc| s.starts_with(loc.as_str()))
            }
            LocationMatch::Component => self.locations.iter().any(|loc| path.starts_with(loc)),
        }
    }

    fn matches_filename(&self, path: &Path) -> bool {
        let Some(name) = path.file_name() else {
            return false;
        };
        let name = name.to_string_lossy().to_lowercase();
        self.patterns.iter().any(|re| re.is_match(&name))
    }

    pub(crate) fn fs(&self) -> &F {
        &self.fs
    }

    fn sniff(&self, path: &Path, now: DateTime<Utc>) -> Verdict {
        let stat = match self.fs.stat(path) {
            Ok(s) => s,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Verdict::Rejected(RejectReason::Missing)
            }
            Err(e) => return Verdict::Unevaluable(e),
        };

        if !stat.is_file {
            return Verdict::Rejected(RejectReason::NotRegularFile);
        }
        if stat.len < self.min_size {
            return Verdict::Rejected(RejectReason::TooSmall {
                size: stat.len,
                min_size: self.min_size,
            });
        }
        // Compared as SystemTime: filesystem mtimes can lie outside chrono's
        // range. An mtime in the future is never stale.
        let cutoff = SystemTime::from(now).checked_sub(self.max_age);
        if cutoff.is_some_and(|cutoff| stat.modified < cutoff) {
            return Verdict::Rejected(RejectReason::Stale {
                modified: stat.modified,
            });
        }

        let head = match self.fs.read_head(path, self.read_limit) {
            Ok(h) => h,
            Err(e) => return Verdict::Unevaluable(e),
        };

        if tracing::enabled!(tracing::Level::TRACE) {
            // Lossy decode: invalid sequences never fail the sniff.
            let text = String::from_utf8_lossy(&head);
            let preview: String = text
                .lines()
                .next()
                .unwrap_or("")
                .chars()
                .take(constants::DEBUG_MAX_LINE_PREVIEW)
                .collect();
            tracing::trace!(path = %path.display(), bytes = head.len(), preview = %preview, "Content sniff");
        }

        let window = &head[..head.len().min(self.sniff_window)];
        match window.iter().position(|&b| b == 0) {
            Some(offset) => Verdict::Rejected(RejectReason::BinaryContent { offset }),
            None => Verdict::Accepted(MatchStage::Content),
        }
    }
}

/// Compile one filename pattern, anchored at the start of the name.
fn compile_pattern(pattern: &str) -> Result<Regex, ClassifierError> {
    if pattern.len() > constants::MAX_REGEX_PATTERN_LENGTH {
        return Err(ClassifierError::PatternTooLong {
            pattern: pattern.to_string(),
            length: pattern.len(),
            max_length: constants::MAX_REGEX_PATTERN_LENGTH,
        });
    }
    Regex::new(&format!("^(?:{pattern})")).map_err(|source| ClassifierError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

// =============================================================================
// Default-rule entry points
// =============================================================================

/// Process-wide classifier with the built-in rules.
pub fn default_classifier() -> &'static Classifier {
    static DEFAULT: OnceLock<Classifier> = OnceLock::new();
    DEFAULT.get_or_init(Classifier::default)
}

/// True if `path` is a probable log file under the built-in rules.
pub fn classify(path: impl AsRef<Path>) -> bool {
    default_classifier().classify(path.as_ref())
}

// =============================================================================
// Tests
// =============================================================================
