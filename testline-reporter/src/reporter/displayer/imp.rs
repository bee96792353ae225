// Copyright (c) The testline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Renders one progress line per finished test, plus error dumps for hard failures.

use super::duration::{DisplayBracketedMs, elapsed_millis};
use crate::reporter::{
    DataSetKey, ErrorChain, FinishedCase, PerformanceThresholds, SeverityBand, Styles, TestStatus,
};
use owo_colors::{OwoColorize, Style};
use swrite::{SWrite, swrite};

/// Traversal bound for malformed (possibly cyclic) cause chains.
const MAX_CAUSE_DEPTH: usize = 100;

/// Formats finished test cases into an output buffer.
///
/// Pure formatting: all state lives in the [`FinishedCase`] snapshot handed in per test.
#[derive(Debug)]
pub(crate) struct LineDisplayer {
    styles: Box<Styles>,
    thresholds: PerformanceThresholds,
    full_data_args: bool,
}

impl LineDisplayer {
    pub(crate) fn new(
        styles: Box<Styles>,
        thresholds: PerformanceThresholds,
        full_data_args: bool,
    ) -> Self {
        Self {
            styles,
            thresholds,
            full_data_args,
        }
    }

    /// Writes the progress line for a finished test, and the full cause-chain dump if the
    /// test errored.
    pub(crate) fn write_case(&self, case: &FinishedCase, out: &mut String) {
        self.write_case_line(case, out);
        if case.status == TestStatus::Errored {
            if let Some(error) = &case.error {
                self.write_error_dump(error, out);
            }
        }
    }

    fn write_case_line(&self, case: &FinishedCase, out: &mut String) {
        let ms = elapsed_millis(case.elapsed);
        let band = self.thresholds.classify(ms);
        swrite!(
            out,
            "  [{:>3}%] {} {} {}\n",
            run_percentage(case.completed, case.total),
            case.status
                .glyph()
                .style(case.status.glyph_style(&self.styles)),
            self.display_identifier(case).style(self.styles.identifier),
            DisplayBracketedMs(ms).style(self.band_style(band)),
        );
    }

    fn display_identifier(&self, case: &FinishedCase) -> String {
        let mut id = humanize_test_name(&case.name);

        // Data-provider case: the identity carries a "#" separator before the data-set key.
        if let Some(data) = &case.data {
            if let Some(pos) = id.rfind('#') {
                id.truncate(pos);
            }
            if self.full_data_args {
                id.push_str(&data.args);
            } else {
                id.extend(data.args.chars().take(preview_width(&data.data_set)));
            }
        }

        // Failed and errored tests render their own detailed output instead.
        if let Some(trace) = &case.trace {
            if !matches!(case.status, TestStatus::Failed | TestStatus::Errored) {
                let annotation = format!(" → {}", trace.message);
                swrite!(id, "{}", annotation.style(self.styles.annotation));
            }
        }

        id
    }

    fn write_error_dump(&self, chain: &ErrorChain, out: &mut String) {
        let mut link = chain;
        for depth in 1.. {
            swrite!(
                out,
                "\n{} {}\n\n{}\n",
                format!(" {} ", link.type_name).style(self.styles.error_badge),
                link.message.style(self.styles.error_text),
                link.stack_trace.style(self.styles.error_text),
            );
            match link.previous.as_deref() {
                Some(previous) if depth < MAX_CAUSE_DEPTH => {
                    swrite!(out, "{}", "Caused by".style(self.styles.error_text));
                    link = previous;
                }
                Some(_) => {
                    tracing::warn!(depth, "cause chain traversal cap reached, dump truncated");
                    break;
                }
                None => break,
            }
        }
    }

    fn band_style(&self, band: SeverityBand) -> Style {
        match band {
            SeverityBand::VerySlow => self.styles.very_slow,
            SeverityBand::Slow => self.styles.slow,
            SeverityBand::Normal => self.styles.pass,
        }
    }
}

/// Derives the displayed identifier from a raw test name: strips a leading `test` token and
/// substitutes spaces for underscores. Non-prefix occurrences of `test` survive.
fn humanize_test_name(name: &str) -> String {
    let stripped = name.strip_prefix("test").unwrap_or(name);
    stripped.replace('_', " ").trim_start().to_owned()
}

/// Preview width for truncated data-provider arguments, sized to the data-set key.
fn preview_width(key: &DataSetKey) -> usize {
    match key {
        DataSetKey::Index(index) => 16 + decimal_char_width(*index),
        DataSetKey::Name(name) => 17 + name.chars().count(),
    }
}

fn decimal_char_width(value: u64) -> usize {
    value.checked_ilog10().map_or(1, |width| width as usize + 1)
}

/// Percentage of the run completed, floored. Defined as 0 for an empty run.
fn run_percentage(completed: usize, total: usize) -> u64 {
    if total == 0 {
        return 0;
    }
    (completed as f64 / total as f64 * 100.0).floor() as u64
}
