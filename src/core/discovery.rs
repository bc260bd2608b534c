// LogSniff - core/discovery.rs
//
// Depth-bounded directory walk that feeds every file to the classifier.
//
// Traversal rules:
//   - Symbolic links are never followed. A symlink whose target the
//     classifier's FileSystem stats as a directory is skipped outright; any
//     other symlink is handed to the classifier like a file.
//   - A directory's depth is its component count below the root. Files are
//     classified only when their directory's depth is <= max_depth, and the
//     walk does not descend past that bound.
//   - Unreadable entries are non-fatal: they are logged, recorded as
//     warnings, and skipped. A missing root yields an empty result.
//
// Sequential mode classifies entries as the walk yields them. Parallel mode
// collects the candidates first and classifies them on the rayon pool; the
// result keeps traversal order either way.

use crate::core::classifier::{default_classifier, Classifier};
use crate::core::model::{DiscoveredLog, ScanReport, Verdict};
use crate::platform::fs::{FileSystem, OsFileSystem};
use crate::util::constants;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

// =============================================================================
// Configuration
// =============================================================================

/// Configuration for a walk.
#[derive(Debug, Clone)]
pub struct WalkConfig {
    /// Deepest directory level (0 = the root itself) whose files are
    /// classified. Clamped to `constants::ABSOLUTE_MAX_DEPTH`.
    pub max_depth: usize,

    /// Classify candidates concurrently on the rayon thread pool.
    pub parallel: bool,

    /// Optional cancel flag. When set to `true` the walk stops at the next
    /// entry and the partial report is returned with `cancelled = true`.
    pub cancel_flag: Option<Arc<AtomicBool>>,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            max_depth: constants::DEFAULT_MAX_DEPTH,
            parallel: false,
            cancel_flag: None,
        }
    }
}

impl WalkConfig {
    fn is_cancelled(&self) -> bool {
        self.cancel_flag
            .as_ref()
            .is_some_and(|f| f.load(Ordering::SeqCst))
    }
}

// =============================================================================
// LogFinder
// =============================================================================

/// A classifier bound to a walk configuration.
#[derive(Debug)]
pub struct LogFinder<F: FileSystem = OsFileSystem> {
    classifier: Classifier<F>,
    walk: WalkConfig,
}

impl<F: FileSystem> LogFinder<F> {
    pub fn new(classifier: Classifier<F>, walk: WalkConfig) -> Self {
        Self { classifier, walk }
    }

    /// Accepted paths under `root`, in traversal order.
    pub fn find_logs(&self, root: &Path) -> Vec<PathBuf> {
        self.scan(root).paths()
    }

    /// Walk `root` and return the full report.
    pub fn scan(&self, root: &Path) -> ScanReport {
        scan_tree(root, &self.classifier, &self.walk)
    }
}

// =============================================================================
// Walk
// =============================================================================

/// Accepted paths under `start_dir` (at most `max_depth` directory levels
/// down) using the built-in classification rules. Never fails; a missing or
/// unreadable root gives an empty result.
pub fn find_logs(start_dir: impl AsRef<Path>, max_depth: usize) -> Vec<PathBuf> {
    let config = WalkConfig {
        max_depth,
        ..Default::default()
    };
    scan_tree(start_dir.as_ref(), default_classifier(), &config).paths()
}

/// Walk `root`, classifying every file within the depth bound.
pub fn scan_tree<F: FileSystem>(
    root: &Path,
    classifier: &Classifier<F>,
    config: &WalkConfig,
) -> ScanReport {
    let max_depth = config.max_depth.min(constants::ABSOLUTE_MAX_DEPTH);
    if max_depth < config.max_depth {
        tracing::debug!(
            requested = config.max_depth,
            clamped = max_depth,
            "max_depth clamped to hard limit"
        );
    }

    tracing::debug!(
        root = %root.display(),
        max_depth,
        parallel = config.parallel,
        "Walk starting"
    );

    let mut report = ScanReport::default();
    let mut candidates: Vec<PathBuf> = Vec::new();

    // Entry depth counts from the root's children, so files in a directory at
    // depth `max_depth` sit at entry depth `max_depth + 1`.
    let walker = walkdir::WalkDir::new(root)
        .follow_links(false)
        .max_depth(max_depth + 1)
        .into_iter();

    for entry_result in walker {
        if config.is_cancelled() {
            tracing::debug!("Walk cancelled by request");
            report.cancelled = true;
            break;
        }

        let entry = match entry_result {
            Ok(e) => e,
            Err(e) => {
                let path_str = e
                    .path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "<unknown>".to_string());
                let msg = format!("Cannot access '{path_str}': {e}");
                tracing::debug!(warning = %msg, "Walk warning");
                report.push_warning(msg);
                continue;
            }
        };

        // The root itself is never a candidate, even when it is a file.
        if entry.depth() == 0 {
            continue;
        }

        let file_type = entry.file_type();
        if file_type.is_dir() {
            continue;
        }
        if file_type.is_symlink() && symlink_points_to_dir(classifier.fs(), entry.path()) {
            tracing::trace!(path = %entry.path().display(), "Skipped symlinked directory");
            continue;
        }

        if config.parallel {
            candidates.push(entry.into_path());
        } else {
            let verdict = classifier.evaluate(entry.path());
            record(&mut report, entry.into_path(), verdict);
        }
    }

    if config.parallel && !candidates.is_empty() {
        let verdicts: Vec<(PathBuf, Option<Verdict>)> = candidates
            .into_par_iter()
            .map(|path| {
                if config.is_cancelled() {
                    (path, None)
                } else {
                    let verdict = classifier.evaluate(&path);
                    (path, Some(verdict))
                }
            })
            .collect();

        for (path, verdict) in verdicts {
            match verdict {
                Some(v) => record(&mut report, path, v),
                None => report.cancelled = true,
            }
        }
    }

    tracing::debug!(
        root = %root.display(),
        examined = report.files_examined,
        accepted = report.logs.len(),
        unevaluable = report.unevaluable,
        warnings = report.warnings.len(),
        cancelled = report.cancelled,
        "Walk complete"
    );

    report
}

/// Fold one verdict into the report.
fn record(report: &mut ScanReport, path: PathBuf, verdict: Verdict) {
    report.files_examined += 1;
    match verdict {
        Verdict::Accepted(stage) => report.logs.push(DiscoveredLog {
            path,
            matched_by: stage,
        }),
        Verdict::Rejected(_) => {}
        Verdict::Unevaluable(e) => {
            report.unevaluable += 1;
            let msg = format!("Cannot evaluate '{}': {e}", path.display());
            tracing::debug!(warning = %msg, "Walk warning");
            report.push_warning(msg);
        }
    }
}

/// True if `path` (a symlink) resolves to a directory. Broken links are not.
/// A broken link, or one that cannot be stat'ed, is not a directory.
fn symlink_points_to_dir<F: FileSystem>(fs: &F, path: &Path) -> bool {
    fs.stat(path).map(|s| s.is_dir).unwrap_or(false)
}

// =============================================================================
// Tests
// =============================================================================
