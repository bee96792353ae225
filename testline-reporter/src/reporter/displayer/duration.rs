// Copyright (c) The testline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Severity classification and display helpers for test durations.

use std::{fmt, time::Duration};

/// A named duration bucket used to color-code elapsed time.
///
/// Declaration order is most severe first, matching the evaluation order of
/// [`PerformanceThresholds`].
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub enum SeverityBand {
    /// At or above the very-slow threshold.
    VerySlow,

    /// At or above the slow threshold.
    Slow,

    /// Below both thresholds.
    Normal,
}

/// Ordered (band, millisecond-threshold) pairs, evaluated most severe first.
///
/// The constructor pins a trailing `(Normal, 0)` entry, so classification always finds a
/// match for any input.
#[derive(Clone, Debug)]
pub struct PerformanceThresholds {
    entries: [(SeverityBand, u64); 3],
}

impl PerformanceThresholds {
    /// Builds the threshold list from the two configurable thresholds.
    pub fn new(slow_ms: u64, very_slow_ms: u64) -> Self {
        Self {
            entries: [
                (SeverityBand::VerySlow, very_slow_ms),
                (SeverityBand::Slow, slow_ms),
                (SeverityBand::Normal, 0),
            ],
        }
    }

    /// The first band whose threshold the elapsed time meets or exceeds.
    pub fn classify(&self, elapsed_ms: u64) -> SeverityBand {
        self.entries
            .iter()
            .find(|(_, threshold)| elapsed_ms >= *threshold)
            .map(|(band, _)| *band)
            .unwrap_or(SeverityBand::Normal)
    }
}

impl Default for PerformanceThresholds {
    fn default() -> Self {
        // u64::MAX means "always below": no real duration reaches the band.
        Self::new(u64::MAX, u64::MAX)
    }
}

/// Elapsed time rounded to the nearest whole millisecond.
pub(crate) fn elapsed_millis(elapsed: Duration) -> u64 {
    (elapsed.as_secs_f64() * 1_000.0).round() as u64
}

pub(super) struct DisplayBracketedMs(pub(super) u64);

impl fmt::Display for DisplayBracketedMs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} ms)", self.0)
    }
}
