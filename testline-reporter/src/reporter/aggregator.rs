// Copyright (c) The testline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Folds the event stream into per-test terminal state.
//!
//! The main structure in this module is [`RunAggregator`], a state machine over one run:
//! `Idle` between tests, `InFlight` while a test accumulates status events, back to `Idle`
//! once a finish event yields a [`FinishedCase`] snapshot for rendering.

use super::{DiagnosticKind, DiagnosticTrace, ErrorChain, ProvidedData, TestStatus};
use crate::errors::{ConfigurationError, ProtocolError};
use chrono::{DateTime, FixedOffset};
use debug_ignore::DebugIgnore;
use std::time::Duration;

/// Aggregates lifecycle events into one terminal status per test.
///
/// One aggregator is created per run and owned exclusively by the single event consumer; the
/// precedence logic assumes exclusive, ordered access.
#[derive(Debug)]
pub struct RunAggregator {
    total_tests: Option<usize>,
    completed: usize,
    flawless: bool,
    current: Option<CaseState>,
}

/// State accumulated for the test currently in flight.
#[derive(Debug)]
struct CaseState {
    start_time: DateTime<FixedOffset>,
    status: Option<TestStatus>,
    trace: Option<DiagnosticTrace>,
    error: Option<DebugIgnore<ErrorChain>>,
}

/// Snapshot of a completed test, handed to the line renderer.
#[derive(Clone, Debug)]
pub struct FinishedCase {
    /// The raw test name as reported by the engine.
    pub name: String,

    /// Data-provider arguments, if any.
    pub data: Option<ProvidedData>,

    /// The terminal status attributed to the test.
    pub status: TestStatus,

    /// The diagnostic trace attached by risky or diagnostic events, if any.
    pub trace: Option<DiagnosticTrace>,

    /// The error chain for failed or errored tests. Taken out of aggregator state, so the
    /// renderer consumes it.
    pub error: Option<ErrorChain>,

    /// The time the test took to run.
    pub elapsed: Duration,

    /// The number of completed tests, including this one.
    pub completed: usize,

    /// The total number of tests in the run.
    pub total: usize,
}

impl RunAggregator {
    /// Creates a new aggregator for a run.
    pub fn new() -> Self {
        Self {
            total_tests: None,
            completed: 0,
            flawless: true,
            current: None,
        }
    }

    /// The run started with the given total test count.
    ///
    /// A repeated start with the same total is a no-op; a conflicting total is a
    /// configuration error.
    pub fn run_started(&mut self, test_count: usize) -> Result<(), ConfigurationError> {
        match self.total_tests {
            None => {
                tracing::debug!(test_count, "run started");
                self.total_tests = Some(test_count);
                Ok(())
            }
            Some(existing) if existing == test_count => {
                tracing::debug!(test_count, "duplicate run start ignored");
                Ok(())
            }
            Some(existing) => Err(ConfigurationError::ConflictingTestCount {
                first: existing,
                second: test_count,
            }),
        }
    }

    /// A test is about to run: record its start time and clear per-test state.
    pub fn test_prepared(&mut self, timestamp: DateTime<FixedOffset>) -> Result<(), ProtocolError> {
        if self.total_tests.is_none() {
            return Err(ProtocolError::RunNotStarted {
                event: "TestPrepared",
            });
        }
        if self.current.is_some() {
            return Err(ProtocolError::AlreadyInFlight);
        }
        self.current = Some(CaseState {
            start_time: timestamp,
            status: None,
            trace: None,
            error: None,
        });
        Ok(())
    }

    /// The in-flight test passed.
    ///
    /// Attributes Passed, or Flawed once the run has lost its flawless state.
    pub fn test_passed(&mut self) -> Result<(), ProtocolError> {
        let candidate = if self.flawless {
            TestStatus::Passed
        } else {
            TestStatus::Flawed
        };
        let case = self.current_mut("TestPassed")?;
        case.status = Some(TestStatus::assign_first(case.status, candidate));
        Ok(())
    }

    /// An assertion failed in the in-flight test.
    pub fn test_failed(&mut self, error: ErrorChain) -> Result<(), ProtocolError> {
        let case = self.current_mut("TestFailed")?;
        case.status = Some(TestStatus::assign_first(case.status, TestStatus::Failed));
        case.error = Some(DebugIgnore(error));
        self.flawless = false;
        Ok(())
    }

    /// An unhandled error escaped the in-flight test.
    pub fn test_errored(&mut self, error: ErrorChain) -> Result<(), ProtocolError> {
        let case = self.current_mut("TestErrored")?;
        case.status = Some(TestStatus::assign_first(case.status, TestStatus::Errored));
        case.error = Some(DebugIgnore(error));
        self.flawless = false;
        Ok(())
    }

    /// The in-flight test was skipped.
    pub fn test_skipped(&mut self) -> Result<(), ProtocolError> {
        let case = self.current_mut("TestSkipped")?;
        case.status = Some(TestStatus::assign_first(case.status, TestStatus::Skipped));
        Ok(())
    }

    /// The in-flight test marked itself incomplete.
    pub fn test_marked_incomplete(&mut self) -> Result<(), ProtocolError> {
        let case = self.current_mut("TestMarkedIncomplete")?;
        case.status = Some(TestStatus::assign_first(case.status, TestStatus::Incomplete));
        Ok(())
    }

    /// The in-flight test was flagged risky.
    ///
    /// The trace is overwritten regardless of whether the status escalates.
    pub fn test_considered_risky(&mut self, trace: DiagnosticTrace) -> Result<(), ProtocolError> {
        let case = self.current_mut("TestConsideredRisky")?;
        case.status = TestStatus::escalate_to_risky(case.status);
        case.trace = Some(trace);
        Ok(())
    }

    /// A runtime diagnostic fired in the in-flight test.
    ///
    /// The trace is overwritten regardless of whether the status was already decided.
    pub fn diagnostic_triggered(
        &mut self,
        kind: DiagnosticKind,
        trace: DiagnosticTrace,
    ) -> Result<(), ProtocolError> {
        let case = self.current_mut("DiagnosticTriggered")?;
        case.status = Some(TestStatus::assign_first(case.status, kind.into()));
        case.trace = Some(trace);
        Ok(())
    }

    /// The in-flight test finished: yields the snapshot to render and resets per-test state.
    pub fn test_finished(
        &mut self,
        name: String,
        data: Option<ProvidedData>,
        elapsed: Duration,
    ) -> Result<FinishedCase, ProtocolError> {
        let total = self.total_tests.ok_or(ProtocolError::RunNotStarted {
            event: "TestFinished",
        })?;
        let case = self.current.take().ok_or(ProtocolError::NoTestInFlight {
            event: "TestFinished",
        })?;
        let Some(status) = case.status else {
            return Err(ProtocolError::NoStatusAssigned { name });
        };

        self.completed += 1;
        tracing::trace!(
            name = %name,
            ?status,
            started_at = %case.start_time,
            completed = self.completed,
            "test finished",
        );

        Ok(FinishedCase {
            name,
            data,
            status,
            trace: case.trace,
            error: case.error.map(|error| error.0),
            elapsed,
            completed: self.completed,
            total,
        })
    }

    /// The run finished. Terminal state.
    pub fn run_finished(&self) {
        tracing::debug!(
            completed = self.completed,
            total = self.total_tests,
            flawless = self.flawless,
            "run finished",
        );
    }

    fn current_mut(&mut self, event: &'static str) -> Result<&mut CaseState, ProtocolError> {
        self.current
            .as_mut()
            .ok_or(ProtocolError::NoTestInFlight { event })
    }
}

impl Default for RunAggregator {
    fn default() -> Self {
        Self::new()
    }
}
