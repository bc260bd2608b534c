// LogSniff - core/model.rs
//
// Core data model types shared by the classifier, the walker, export and the
// CLI. Pure data definitions with no I/O.

use crate::util::error::ProbeError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

// =============================================================================
// Classification outcome
// =============================================================================

/// The heuristic stage that accepted a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStage {
    /// Path starts with a known log location.
    Location,
    /// Lowercased base filename matched a filename pattern.
    FilenamePattern,
    /// Metadata and content sniff looked like a recent text file.
    Content,
}

impl MatchStage {
    /// Stable label used in text and CSV output.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Location => "location",
            Self::FilenamePattern => "filename_pattern",
            Self::Content => "content",
        }
    }
}

impl fmt::Display for MatchStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Why the content sniff turned a path down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Nothing exists at the path.
    Missing,
    /// The path is a directory, device, socket, etc.
    NotRegularFile,
    TooSmall { size: u64, min_size: u64 },
    /// `modified` is the raw filesystem mtime, which may lie outside the
    /// range `chrono` can represent.
    Stale { modified: SystemTime },
    /// A NUL byte was found at `offset` inside the sniff window.
    BinaryContent { offset: usize },
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => f.write_str("file does not exist"),
            Self::NotRegularFile => f.write_str("not a regular file"),
            Self::TooSmall { size, min_size } => {
                write!(f, "{size} bytes is below the {min_size}-byte minimum")
            }
            Self::Stale { modified } => {
                write!(f, "last modified {} is too old", format_mtime(*modified))
            }
            Self::BinaryContent { offset } => {
                write!(f, "NUL byte at offset {offset} (binary content)")
            }
        }
    }
}

/// Full result of evaluating one path.
///
/// `Unevaluable` separates "checked and rejected" from "an I/O failure stopped
/// the check"; both collapse to `false` in the boolean API.
#[derive(Debug)]
pub enum Verdict {
    Accepted(MatchStage),
    Rejected(RejectReason),
    Unevaluable(ProbeError),
}

impl Verdict {
    /// True when the path is a probable log file.
    pub fn is_log(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    /// The accepting stage, if any.
    pub fn matched_by(&self) -> Option<MatchStage> {
        match self {
            Self::Accepted(stage) => Some(*stage),
            _ => None,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Accepted(stage) => write!(f, "log file (matched by {stage})"),
            Self::Rejected(reason) => write!(f, "not a log file: {reason}"),
            Self::Unevaluable(e) => write!(f, "could not evaluate: {e}"),
        }
    }
}

// =============================================================================
// Scan results
// =============================================================================

/// A file accepted by the classifier during a walk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscoveredLog {
    pub path: PathBuf,
    pub matched_by: MatchStage,
}

/// Everything a walk produced.
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    /// Accepted files, in traversal order.
    pub logs: Vec<DiscoveredLog>,

    /// Number of file entries handed to the classifier.
    pub files_examined: usize,

    /// Files whose content sniff was cut short by an I/O error.
    pub unevaluable: usize,

    /// Non-fatal traversal and classification warnings, capped at
    /// `constants::MAX_WARNINGS`.
    pub warnings: Vec<String>,

    /// Warnings dropped after the cap was reached.
    pub warnings_suppressed: usize,

    /// True when the walk stopped early on a cancel request.
    pub cancelled: bool,
}

impl ScanReport {
    /// Accepted paths, in traversal order.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.logs.iter().map(|l| l.path.clone()).collect()
    }

    /// Record a warning unless the cap has been reached.
    pub fn push_warning(&mut self, msg: String) {
        if self.warnings.len() < crate::util::constants::MAX_WARNINGS {
            self.warnings.push(msg);
        } else {
            self.warnings_suppressed += 1;
        }
    }
}

/// RFC 3339 when `chrono` can represent the time, seconds from the epoch
/// otherwise.
fn format_mtime(t: SystemTime) -> String {
    match t.duration_since(UNIX_EPOCH) {
        Ok(after) => i64::try_from(after.as_secs())
            .ok()
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, after.subsec_nanos()))
            .map(|dt| dt.to_rfc3339())
            .unwrap_or_else(|| format!("{}s after the Unix epoch", after.as_secs())),
        Err(e) => format!("{}s before the Unix epoch", e.duration().as_secs()),
    }
}
