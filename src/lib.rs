// LogSniff - lib.rs
//
// Library entry point. The CLI in `main.rs` is a thin shell over these
// modules; `classify` and `find_logs` are the programmatic entry points.

pub mod app;
pub mod core;
pub mod platform;
pub mod util;

pub use crate::core::classifier::{classify, Classifier, ClassifierConfig, LocationMatch};
pub use crate::core::discovery::{find_logs, LogFinder, WalkConfig};
pub use crate::core::model::{DiscoveredLog, MatchStage, RejectReason, ScanReport, Verdict};
