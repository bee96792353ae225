// Copyright (c) The testline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reporter configuration consumed from the host runner.

use crate::reporter::PerformanceThresholds;
use serde::Deserialize;

/// Configuration surface for the reporter.
///
/// Deserializable from the host runner's configuration file. Both thresholds default to a
/// value no elapsed duration reaches, so tests classify as normal severity unless the host
/// opts in.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ReporterConfig {
    /// Elapsed milliseconds at or above which a test counts as slow.
    #[serde(default = "default_threshold_ms")]
    pub slow_threshold_ms: u64,

    /// Elapsed milliseconds at or above which a test counts as very slow.
    #[serde(default = "default_threshold_ms")]
    pub very_slow_threshold_ms: u64,

    /// Render the full serialized data-provider arguments rather than a bounded preview.
    #[serde(default)]
    pub full_data_args: bool,
}

fn default_threshold_ms() -> u64 {
    u64::MAX
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            slow_threshold_ms: default_threshold_ms(),
            very_slow_threshold_ms: default_threshold_ms(),
            full_data_args: false,
        }
    }
}

impl ReporterConfig {
    /// The configured thresholds in classifier form, most severe first.
    pub fn performance_thresholds(&self) -> PerformanceThresholds {
        PerformanceThresholds::new(self.slow_threshold_ms, self.very_slow_threshold_ms)
    }
}
