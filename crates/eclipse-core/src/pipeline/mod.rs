pub mod config;
mod orchestrator;
mod types;

pub use orchestrator::{run_scan, scan_labels};
pub use types::{NoOpReporter, ProgressReporter, ScanReport, ScanStage, StampedTransition};
