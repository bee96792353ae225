// Copyright (c) The testline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The terminal status attributed to a test, and the precedence rules that decide it.

use super::{DiagnosticKind, helpers::Styles};
use owo_colors::Style;

/// The single outcome attributed to one test at its finish.
///
/// Statuses are decided first-write-wins: the first status event to arrive for a test sticks,
/// with one exception -- a risky flag escalates a Passed or Flawed status to [`Risky`] and
/// overrides nothing else. Declaration order is the precedence order.
///
/// [`Risky`]: Self::Risky
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum TestStatus {
    /// The test passed and no earlier test had failed.
    Passed,

    /// The test passed, but the run had already lost its flawless state.
    Flawed,

    /// An assertion failed.
    Failed,

    /// An unhandled error escaped the test.
    Errored,

    /// The test was explicitly skipped.
    Skipped,

    /// The test marked itself incomplete.
    Incomplete,

    /// The test passed but was flagged risky, escalated from Passed or Flawed only.
    Risky,

    /// A runtime notice fired during the test.
    Notice,

    /// A runtime warning fired during the test.
    Warning,

    /// A deprecation notice fired during the test.
    Deprecated,
}

impl TestStatus {
    /// The single-character code displayed for this status.
    pub fn glyph(self) -> &'static str {
        match self {
            TestStatus::Passed => "✓",
            TestStatus::Flawed | TestStatus::Risky => "!",
            TestStatus::Failed | TestStatus::Errored => "⨯",
            TestStatus::Skipped => "S",
            TestStatus::Incomplete => "I",
            TestStatus::Notice => "N",
            TestStatus::Warning => "W",
            TestStatus::Deprecated => "D",
        }
    }

    /// First-write-wins assignment: returns `current` if a status was already attributed,
    /// otherwise `candidate`.
    pub fn assign_first(current: Option<TestStatus>, candidate: TestStatus) -> TestStatus {
        current.unwrap_or(candidate)
    }

    /// Escalates a Passed or Flawed status to Risky. Any other status, including an
    /// unassigned one, is returned unchanged.
    pub fn escalate_to_risky(current: Option<TestStatus>) -> Option<TestStatus> {
        match current {
            Some(TestStatus::Passed | TestStatus::Flawed) => Some(TestStatus::Risky),
            other => other,
        }
    }

    /// The style dedicated to this status's glyph, if it has one.
    pub(crate) fn status_style(self, styles: &Styles) -> Option<Style> {
        match self {
            TestStatus::Passed => Some(styles.pass),
            TestStatus::Flawed => Some(styles.flawed),
            _ => None,
        }
    }

    /// The general style for this status family.
    pub(crate) fn general_style(self, styles: &Styles) -> Style {
        match self {
            TestStatus::Passed | TestStatus::Flawed => styles.pass_bold,
            TestStatus::Failed | TestStatus::Errored => styles.fail,
            TestStatus::Skipped => styles.skip,
            TestStatus::Incomplete
            | TestStatus::Risky
            | TestStatus::Notice
            | TestStatus::Warning
            | TestStatus::Deprecated => styles.advice,
        }
    }

    /// The style used to render this status's glyph: the dedicated status style when one
    /// exists, the general style otherwise.
    pub(crate) fn glyph_style(self, styles: &Styles) -> Style {
        self.status_style(styles)
            .unwrap_or_else(|| self.general_style(styles))
    }
}

impl From<DiagnosticKind> for TestStatus {
    fn from(kind: DiagnosticKind) -> Self {
        match kind {
            DiagnosticKind::Notice => TestStatus::Notice,
            DiagnosticKind::Warning => TestStatus::Warning,
            DiagnosticKind::Deprecated => TestStatus::Deprecated,
        }
    }
}
