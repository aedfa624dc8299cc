/// SER timestamps count 100 ns ticks.
pub const SER_TICKS_PER_SECOND: f64 = 10_000_000.0;

/// Default minimum confidence for a classifier candidate to count as a detection.
pub const DEFAULT_MIN_CONFIDENCE: f32 = 0.25;

/// Default directory for transition snapshots.
pub const DEFAULT_SNAPSHOT_DIR: &str = "snapshots";

/// Seconds per hour / minute, for timestamp rendering and parsing.
pub const SECONDS_PER_HOUR: u64 = 3600;
pub const SECONDS_PER_MINUTE: u64 = 60;
