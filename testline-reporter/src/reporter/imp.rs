// Copyright (c) The testline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prints out per-test progress as lifecycle events arrive.
//!
//! The main structure in this module is [`Reporter`].

use crate::{
    config::ReporterConfig,
    errors::WriteEventError,
    reporter::{LineDisplayer, RunAggregator, Styles, TestEvent, TestEventKind},
};
use std::io::Write;

/// Output destination for the reporter.
///
/// This is usually a terminal, but can be an in-memory buffer for tests.
pub enum ReporterOutput<'a> {
    /// Produce output on the terminal, flushing after every written event.
    Terminal,

    /// Write output to a buffer.
    Buffer(&'a mut String),
}

/// Reporter builder.
#[derive(Debug, Default)]
pub struct ReporterBuilder {
    should_colorize: bool,
}

impl ReporterBuilder {
    /// Set to true if the reporter should colorize output.
    pub fn set_colorize(&mut self, should_colorize: bool) -> &mut Self {
        self.should_colorize = should_colorize;
        self
    }

    /// Creates a new reporter for one run.
    pub fn build<'a>(&self, config: &ReporterConfig, output: ReporterOutput<'a>) -> Reporter<'a> {
        let mut styles = Box::<Styles>::default();
        if self.should_colorize {
            styles.colorize();
        }
        tracing::debug!(colorize = self.should_colorize, ?config, "building reporter");

        Reporter {
            aggregator: RunAggregator::new(),
            displayer: LineDisplayer::new(
                styles,
                config.performance_thresholds(),
                config.full_data_args,
            ),
            output,
        }
    }
}

/// Reports the progress of one test run to its output, one line per finished test.
///
/// Events are consumed strictly in order; the aggregator state is owned exclusively by this
/// reporter for the duration of the run.
pub struct Reporter<'a> {
    aggregator: RunAggregator,
    displayer: LineDisplayer,
    output: ReporterOutput<'a>,
}

impl Reporter<'_> {
    /// Report a test event.
    pub fn report_event(&mut self, event: TestEvent) -> Result<(), WriteEventError> {
        let mut buf = String::new();
        match event.kind {
            TestEventKind::RunStarted { test_count } => {
                self.aggregator.run_started(test_count)?;
            }
            TestEventKind::TestPrepared => {
                self.aggregator.test_prepared(event.timestamp)?;
            }
            TestEventKind::TestPassed => {
                self.aggregator.test_passed()?;
            }
            TestEventKind::TestFailed { error } => {
                self.aggregator.test_failed(error)?;
            }
            TestEventKind::TestErrored { error } => {
                self.aggregator.test_errored(error)?;
            }
            TestEventKind::TestSkipped => {
                self.aggregator.test_skipped()?;
            }
            TestEventKind::TestMarkedIncomplete => {
                self.aggregator.test_marked_incomplete()?;
            }
            TestEventKind::TestConsideredRisky { trace } => {
                self.aggregator.test_considered_risky(trace)?;
            }
            TestEventKind::DiagnosticTriggered { kind, trace } => {
                self.aggregator.diagnostic_triggered(kind, trace)?;
            }
            TestEventKind::TestFinished {
                name,
                data,
                elapsed,
            } => {
                let case = self.aggregator.test_finished(name, data, elapsed)?;
                self.displayer.write_case(&case, &mut buf);
            }
            TestEventKind::RunFinished => {
                self.aggregator.run_finished();
                // Visual separation after the last progress line.
                buf.push_str("\n\n");
            }
        }

        if buf.is_empty() {
            return Ok(());
        }
        self.write_output(&buf)
    }

    fn write_output(&mut self, buf: &str) -> Result<(), WriteEventError> {
        match &mut self.output {
            ReporterOutput::Terminal => {
                let mut stderr = std::io::stderr().lock();
                stderr
                    .write_all(buf.as_bytes())
                    .map_err(WriteEventError::Io)?;
                stderr.flush().map_err(WriteEventError::Io)
            }
            ReporterOutput::Buffer(out) => {
                out.push_str(buf);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        errors::ProtocolError,
        reporter::{DiagnosticTrace, ErrorChain},
    };
    use chrono::{DateTime, FixedOffset, TimeZone, Utc};
    use indoc::indoc;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    /// Creates a reporter with the given config and calls the given function with it.
    ///
    /// Output is captured in `out`.
    fn with_reporter<'a, F>(config: &ReporterConfig, f: F, out: &'a mut String)
    where
        F: FnOnce(Reporter<'a>),
    {
        let reporter = ReporterBuilder::default().build(config, ReporterOutput::Buffer(out));
        f(reporter);
    }

    fn timestamp() -> DateTime<FixedOffset> {
        Utc.timestamp_opt(1_700_000_000, 0)
            .single()
            .expect("valid timestamp")
            .fixed_offset()
    }

    fn event(kind: TestEventKind) -> TestEvent {
        TestEvent {
            timestamp: timestamp(),
            kind,
        }
    }

    fn finished(name: &str, elapsed_ms: u64) -> TestEventKind {
        TestEventKind::TestFinished {
            name: name.to_owned(),
            data: None,
            elapsed: Duration::from_millis(elapsed_ms),
        }
    }

    #[test]
    fn single_passing_test() {
        let mut out = String::new();
        with_reporter(
            &ReporterConfig::default(),
            |mut reporter| {
                for kind in [
                    TestEventKind::RunStarted { test_count: 1 },
                    TestEventKind::TestPrepared,
                    TestEventKind::TestPassed,
                    finished("test_ok", 5),
                ] {
                    reporter.report_event(event(kind)).expect("event written");
                }
            },
            &mut out,
        );
        assert_eq!(out, "  [100%] ✓ ok (5 ms)\n");
    }

    #[test]
    fn percentages_step_through_the_run() {
        let mut out = String::new();
        with_reporter(
            &ReporterConfig::default(),
            |mut reporter| {
                reporter
                    .report_event(event(TestEventKind::RunStarted { test_count: 4 }))
                    .unwrap();
                for name in ["test_a", "test_b", "test_c", "test_d"] {
                    reporter.report_event(event(TestEventKind::TestPrepared)).unwrap();
                    reporter.report_event(event(TestEventKind::TestPassed)).unwrap();
                    reporter.report_event(event(finished(name, 1))).unwrap();
                }
                reporter.report_event(event(TestEventKind::RunFinished)).unwrap();
            },
            &mut out,
        );

        let expected = indoc! {"
              [ 25%] ✓ a (1 ms)
              [ 50%] ✓ b (1 ms)
              [ 75%] ✓ c (1 ms)
              [100%] ✓ d (1 ms)


        "};
        assert_eq!(out, expected);
    }

    #[test]
    fn errored_test_dumps_the_cause_chain() {
        let mut out = String::new();
        with_reporter(
            &ReporterConfig::default(),
            |mut reporter| {
                let error = ErrorChain {
                    type_name: "TimeoutError".to_owned(),
                    message: "connection timed out".to_owned(),
                    stack_trace: "#0 connect()".to_owned(),
                    previous: Some(Box::new(ErrorChain {
                        type_name: "SocketError".to_owned(),
                        message: "connection refused".to_owned(),
                        stack_trace: "#0 socket()".to_owned(),
                        previous: None,
                    })),
                };
                for kind in [
                    TestEventKind::RunStarted { test_count: 1 },
                    TestEventKind::TestPrepared,
                    TestEventKind::TestErrored { error },
                    finished("test_boom", 7),
                ] {
                    reporter.report_event(event(kind)).expect("event written");
                }
            },
            &mut out,
        );

        let expected = indoc! {"
              [100%] ⨯ boom (7 ms)

             TimeoutError  connection timed out

            #0 connect()
            Caused by
             SocketError  connection refused

            #0 socket()
        "};
        assert_eq!(out, expected);
    }

    #[test]
    fn risky_annotation_reaches_the_line() {
        let mut out = String::new();
        with_reporter(
            &ReporterConfig::default(),
            |mut reporter| {
                for kind in [
                    TestEventKind::RunStarted { test_count: 1 },
                    TestEventKind::TestPrepared,
                    TestEventKind::TestPassed,
                    TestEventKind::TestConsideredRisky {
                        trace: DiagnosticTrace {
                            message: "this test did not perform any assertions".to_owned(),
                            file: "tests/sample.rs".into(),
                            line: 11,
                        },
                    },
                    finished("test_noop", 2),
                ] {
                    reporter.report_event(event(kind)).expect("event written");
                }
            },
            &mut out,
        );
        assert_eq!(
            out,
            "  [100%] ! noop → this test did not perform any assertions (2 ms)\n",
        );
    }

    #[test]
    fn protocol_violations_abort_the_reporter() {
        let mut out = String::new();
        with_reporter(
            &ReporterConfig::default(),
            |mut reporter| {
                reporter
                    .report_event(event(TestEventKind::RunStarted { test_count: 1 }))
                    .unwrap();
                let err = reporter
                    .report_event(event(TestEventKind::TestPassed))
                    .expect_err("no test in flight");
                assert!(matches!(
                    err,
                    WriteEventError::Protocol(ProtocolError::NoTestInFlight { .. }),
                ));
            },
            &mut out,
        );
        assert_eq!(out, "");
    }

    #[test]
    fn colorized_line_styles_each_segment() {
        let mut out = String::new();
        let mut builder = ReporterBuilder::default();
        builder.set_colorize(true);
        let mut reporter = builder.build(&ReporterConfig::default(), ReporterOutput::Buffer(&mut out));
        for kind in [
            TestEventKind::RunStarted { test_count: 1 },
            TestEventKind::TestPrepared,
            TestEventKind::TestPassed,
            finished("test_ok", 5),
        ] {
            reporter.report_event(event(kind)).expect("event written");
        }

        // Green glyph, dimmed identifier, green duration for the normal band.
        assert_eq!(
            out,
            "  [100%] \u{1b}[32m✓\u{1b}[0m \u{1b}[2mok\u{1b}[0m \u{1b}[32m(5 ms)\u{1b}[0m\n",
        );
    }
}
