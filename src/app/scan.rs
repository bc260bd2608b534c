// LogSniff - app/scan.rs
//
// Scan orchestration: turns validated configuration plus per-invocation
// overrides into a classifier and a walk, runs it, and logs the outcome.

use crate::core::classifier::Classifier;
use crate::core::discovery::{LogFinder, WalkConfig};
use crate::core::model::{ScanReport, Verdict};
use crate::platform::config::AppConfig;
use crate::util::error::ClassifierError;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Instant;

/// One scan invocation.
#[derive(Debug, Clone)]
pub struct ScanRequest {
    pub root: PathBuf,
    pub max_depth: usize,
    pub parallel: bool,
    pub cancel_flag: Option<Arc<AtomicBool>>,
}

impl ScanRequest {
    /// Request built from config values, with optional overrides.
    pub fn from_config(
        config: &AppConfig,
        root: Option<PathBuf>,
        max_depth: Option<usize>,
        parallel: bool,
    ) -> Self {
        Self {
            root: root.unwrap_or_else(|| config.start_dir.clone()),
            max_depth: max_depth.unwrap_or(config.max_depth),
            parallel: parallel || config.parallel,
            cancel_flag: None,
        }
    }
}

/// Build the classifier from `config` and walk `request.root`.
///
/// Returns `Err` only when the configured rules do not compile; the walk
/// itself never fails.
pub fn run_scan(config: &AppConfig, request: &ScanRequest) -> Result<ScanReport, ClassifierError> {
    let classifier = Classifier::new(&config.classifier)?;
    let finder = LogFinder::new(
        classifier,
        WalkConfig {
            max_depth: request.max_depth,
            parallel: request.parallel,
            cancel_flag: request.cancel_flag.clone(),
        },
    );

    tracing::info!(
        root = %request.root.display(),
        max_depth = request.max_depth,
        parallel = request.parallel,
        "Scan starting"
    );

    let started = Instant::now();
    let report = finder.scan(&request.root);

    if report.warnings_suppressed > 0 {
        tracing::warn!(
            suppressed = report.warnings_suppressed,
            "Warning limit reached; further warnings were dropped"
        );
    }

    tracing::info!(
        logs = report.logs.len(),
        examined = report.files_examined,
        unevaluable = report.unevaluable,
        warnings = report.warnings.len(),
        cancelled = report.cancelled,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Scan complete"
    );

    Ok(report)
}

/// Classify a single path with the configured rules.
pub fn explain(config: &AppConfig, path: &std::path::Path) -> Result<Verdict, ClassifierError> {
    let classifier = Classifier::new(&config.classifier)?;
    Ok(classifier.evaluate(path))
}
