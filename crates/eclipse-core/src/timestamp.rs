use std::fmt;
use std::time::Duration;

use crate::consts::{SECONDS_PER_HOUR, SECONDS_PER_MINUTE};
use crate::error::{EclipseError, Result};
use crate::session::VideoSession;

/// Parse a video start time given as `SS`, `MM:SS` or `HH:MM:SS`.
///
/// Every component must be a non-negative integer. Components are not
/// range-checked, so `"0:75"` is 75 seconds.
pub fn parse_start_time(input: &str) -> Result<Duration> {
    let invalid = || EclipseError::InvalidStartTimeFormat(input.to_string());

    let parts = input
        .trim()
        .split(':')
        .map(|p| {
            if p.is_empty() || !p.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            p.parse::<u64>().map_err(|_| invalid())
        })
        .collect::<Result<Vec<u64>>>()?;

    let (hours, minutes, seconds) = match parts.as_slice() {
        [s] => (0, 0, *s),
        [m, s] => (0, *m, *s),
        [h, m, s] => (*h, *m, *s),
        _ => return Err(invalid()),
    };

    hours
        .checked_mul(SECONDS_PER_HOUR)
        .and_then(|h| minutes.checked_mul(SECONDS_PER_MINUTE).and_then(|m| h.checked_add(m)))
        .and_then(|hm| hm.checked_add(seconds))
        .map(Duration::from_secs)
        .ok_or_else(invalid)
}

/// Wall-clock time of day in whole seconds, rendered as `HH:MM:SS`.
///
/// Hours are not wrapped at 24.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp {
    total_seconds: u64,
}

impl Timestamp {
    pub fn from_seconds(total_seconds: u64) -> Self {
        Self { total_seconds }
    }

    pub fn total_seconds(&self) -> u64 {
        self.total_seconds
    }

    pub fn hours(&self) -> u64 {
        self.total_seconds / SECONDS_PER_HOUR
    }

    pub fn minutes(&self) -> u64 {
        (self.total_seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE
    }

    pub fn seconds(&self) -> u64 {
        self.total_seconds % SECONDS_PER_MINUTE
    }

    /// `HH-MM-SS`, usable in file names.
    pub fn file_safe(&self) -> String {
        self.to_string().replace(':', "-")
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hours(),
            self.minutes(),
            self.seconds()
        )
    }
}

/// Maps frame indices to wall-clock timestamps.
#[derive(Clone, Copy, Debug)]
pub struct TimestampMapper {
    fps: f64,
    start_offset: Duration,
}

impl TimestampMapper {
    pub fn new(session: &VideoSession) -> Self {
        Self {
            fps: session.fps(),
            start_offset: session.start_offset(),
        }
    }

    /// Whole seconds between the first frame and `frame_index`.
    ///
    /// Rounds half to even, so a frame exactly between two seconds lands on
    /// the even one (0.5 -> 0, 1.5 -> 2, 2.5 -> 2).
    pub fn seconds_passed(&self, frame_index: usize) -> u64 {
        (frame_index as f64 / self.fps).round_ties_even() as u64
    }

    /// Wall-clock time of `frame_index`. Exact for every frame of the
    /// session; indices past its end saturate at the largest timestamp.
    pub fn timestamp(&self, frame_index: usize) -> Timestamp {
        Timestamp::from_seconds(
            self.start_offset
                .as_secs()
                .saturating_add(self.seconds_passed(frame_index)),
        )
    }
}
