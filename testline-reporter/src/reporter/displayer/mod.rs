// Copyright (c) The testline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The displayer for human-friendly output.

mod duration;
mod imp;

pub use duration::{PerformanceThresholds, SeverityBand};

pub(crate) use imp::LineDisplayer;
