// Copyright (c) The testline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Events consumed by the reporter.

use camino::Utf8PathBuf;
use chrono::{DateTime, FixedOffset};
use std::time::Duration;

/// A test event.
///
/// Events are emitted in order by the test-execution engine and consumed by a
/// [`Reporter`](crate::reporter::Reporter). Delivery is strictly sequential: each event is
/// processed to completion before the next one arrives.
#[derive(Clone, Debug)]
pub struct TestEvent {
    /// The time at which the event was generated, including the offset from UTC.
    pub timestamp: DateTime<FixedOffset>,

    /// The kind of test event this is.
    pub kind: TestEventKind,
}

/// The kind of test event this is.
///
/// Forms part of [`TestEvent`].
#[derive(Clone, Debug)]
pub enum TestEventKind {
    /// The test run started.
    RunStarted {
        /// The total number of tests that will be run.
        test_count: usize,
    },

    /// A test is about to start running.
    TestPrepared,

    /// The test body completed without failing an assertion.
    TestPassed,

    /// An assertion failed during the test.
    TestFailed {
        /// The failure reported by the engine.
        error: ErrorChain,
    },

    /// An unhandled error escaped the test.
    TestErrored {
        /// The error reported by the engine.
        error: ErrorChain,
    },

    /// The test was explicitly skipped.
    TestSkipped,

    /// The test marked itself incomplete.
    TestMarkedIncomplete,

    /// The engine flagged the test as risky.
    TestConsideredRisky {
        /// The message and source location attached by the engine.
        trace: DiagnosticTrace,
    },

    /// A runtime diagnostic fired while the test ran.
    DiagnosticTriggered {
        /// The kind of diagnostic.
        kind: DiagnosticKind,

        /// The message and source location attached by the engine.
        trace: DiagnosticTrace,
    },

    /// A test finished running.
    TestFinished {
        /// The raw test name as reported by the engine.
        name: String,

        /// Data-provider arguments, if the test ran against a provided data set.
        data: Option<ProvidedData>,

        /// The time the test took to run.
        elapsed: Duration,
    },

    /// The test run finished.
    RunFinished,
}

/// The kind of runtime diagnostic attached to a [`TestEventKind::DiagnosticTriggered`] event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum DiagnosticKind {
    /// A runtime notice fired.
    Notice,

    /// A runtime warning fired.
    Warning,

    /// A deprecation notice fired.
    Deprecated,
}

/// A message and source location attached to a test by a risky or diagnostic event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiagnosticTrace {
    /// The diagnostic message.
    pub message: String,

    /// The source file the diagnostic points at.
    pub file: Utf8PathBuf,

    /// The line within `file`.
    pub line: u32,
}

/// An exception-like failure reported by the engine, with an optional causal predecessor.
///
/// Chains are walked outermost-first when dumped. No cycles are expected, but traversal is
/// capped defensively.
#[derive(Clone, Debug)]
pub struct ErrorChain {
    /// The name of the error type as reported by the engine.
    pub type_name: String,

    /// The human-readable message.
    pub message: String,

    /// The rendered stack trace.
    pub stack_trace: String,

    /// The error that caused this one, if any.
    pub previous: Option<Box<ErrorChain>>,
}

/// Data-provider arguments attached to a finished test case.
#[derive(Clone, Debug)]
pub struct ProvidedData {
    /// The key of the data set the test ran against.
    pub data_set: DataSetKey,

    /// The arguments as serialized by the engine for result output.
    pub args: String,
}

/// The key of a data-provider data set: a numeric index or an explicit name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DataSetKey {
    /// A positional index.
    Index(u64),

    /// An explicitly named data set.
    Name(String),
}
