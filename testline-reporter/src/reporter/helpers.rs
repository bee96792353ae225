// Copyright (c) The testline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use owo_colors::Style;

/// The styles used to render output.
///
/// Defaults to no-op styles that emit no escape codes, so an uncolorized reporter produces
/// plain text through the same code path.
#[derive(Debug, Default, Clone)]
pub(crate) struct Styles {
    pub(crate) pass: Style,
    pub(crate) pass_bold: Style,
    pub(crate) flawed: Style,
    pub(crate) fail: Style,
    pub(crate) skip: Style,
    pub(crate) advice: Style,
    pub(crate) annotation: Style,
    pub(crate) identifier: Style,
    pub(crate) error_badge: Style,
    pub(crate) error_text: Style,
    pub(crate) slow: Style,
    pub(crate) very_slow: Style,
}

impl Styles {
    pub(crate) fn colorize(&mut self) {
        self.pass = Style::new().green();
        self.pass_bold = Style::new().green().bold();
        self.flawed = Style::new().red();
        self.fail = Style::new().red().bold();
        self.skip = Style::new().cyan().bold();
        self.advice = Style::new().yellow().bold();
        self.annotation = Style::new().yellow();
        self.identifier = Style::new().dimmed();
        self.error_badge = Style::new().white().on_red();
        self.error_text = Style::new().red();
        self.slow = Style::new().yellow();
        self.very_slow = Style::new().red();
    }
}
