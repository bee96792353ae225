// Copyright (c) The testline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the reporter.
//!
//! Errors fall into three tiers: I/O failures while writing output, violations of the event
//! stream's ordering contract, and inconsistent run configuration. Test-run outcomes
//! (failures, errors, skips, diagnostics) are data consumed by the reporter and never
//! surface as errors here.

use thiserror::Error;

/// An error that occurs while writing an event.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WriteEventError {
    /// An error occurred while writing the event to the provided output.
    #[error("error writing to output")]
    Io(#[source] std::io::Error),

    /// The event stream violated its ordering contract.
    #[error("event stream protocol violation")]
    Protocol(#[from] ProtocolError),

    /// The run was configured inconsistently.
    #[error("inconsistent run configuration")]
    Configuration(#[from] ConfigurationError),
}

/// The event stream broke its ordering contract.
///
/// The event source guarantees in-order delivery, so any of these indicate an integration
/// bug rather than a test-run condition. They are fatal: the reporter makes no attempt to
/// recover from them.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProtocolError {
    /// A per-test event arrived while no test was in flight.
    #[error("{event} event received with no test in flight")]
    NoTestInFlight {
        /// The event that was received.
        event: &'static str,
    },

    /// A test was prepared before the previous test finished.
    #[error("test prepared while another test was still in flight")]
    AlreadyInFlight,

    /// A per-test event arrived before the run started.
    #[error("{event} event received before the run started")]
    RunNotStarted {
        /// The event that was received.
        event: &'static str,
    },

    /// A test finished without any status event having been delivered for it.
    #[error("test `{name}` finished with no status assigned")]
    NoStatusAssigned {
        /// The name of the test that finished.
        name: String,
    },
}

/// The reporter was configured inconsistently by the event source.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigurationError {
    /// The run was started twice with conflicting test counts.
    #[error("run started twice with conflicting test counts (first {first}, then {second})")]
    ConflictingTestCount {
        /// The total announced by the first start event.
        first: usize,
        /// The total announced by the second start event.
        second: usize,
    },
}
