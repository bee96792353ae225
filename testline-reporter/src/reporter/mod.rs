// Copyright (c) The testline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Report the progress of a test run, one line per test.
//!
//! The main type here is [`Reporter`], which is constructed via a [`ReporterBuilder`].

mod aggregator;
mod displayer;
mod events;
mod helpers;
mod imp;
mod status;

pub use aggregator::*;
pub use displayer::{PerformanceThresholds, SeverityBand};
pub use events::*;
pub use imp::*;
pub use status::*;

pub(crate) use displayer::LineDisplayer;
pub(crate) use helpers::Styles;
