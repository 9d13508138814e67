//! Command implementations of the `seqdiff` front end
//!
//! Every output format is an `impl Comparison` block writing to the
//! comparison's writer:
//!
//! - `text_diff`: unified and context diffs, byte exact for non UTF-8 files
//! - `ndiff`: line deltas with intraline `?` guides
//! - `html`: side by side XHTML document
//!
//! Line oriented output is colored through `LineStyle`; whether colors are
//! actually emitted is decided once by the binary.

pub mod html;
pub mod ndiff;
pub mod text_diff;

use crate::areas::comparison::Comparison;
use colored::{ColoredString, Colorize};

/// Output format selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffMode {
    Context,
    Unified,
    Ndiff,
    Html { context: bool },
}

/// Role of an output line, deciding its color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Header,
    Range,
    Removed,
    Added,
    Changed,
    Hint,
    Plain,
}

impl LineStyle {
    pub fn paint(self, text: &str) -> ColoredString {
        match self {
            LineStyle::Header => text.bold(),
            LineStyle::Range => text.cyan(),
            LineStyle::Removed => text.red(),
            LineStyle::Added => text.green(),
            LineStyle::Changed | LineStyle::Hint => text.yellow(),
            LineStyle::Plain => text.normal(),
        }
    }
}

impl Comparison {
    pub fn diff(&self, mode: DiffMode, lines: usize) -> anyhow::Result<()> {
        match mode {
            DiffMode::Context => self.context_diff(lines),
            DiffMode::Unified => self.unified_diff(lines),
            DiffMode::Ndiff => self.ndiff(),
            DiffMode::Html { context } => self.html_diff(context, lines),
        }?;

        self.writer().flush()?;
        Ok(())
    }

    /// Writes one line, keeping its ending outside the color escapes.
    pub(crate) fn write_styled(&self, line: &str, style: LineStyle) -> anyhow::Result<()> {
        let body = line.trim_end_matches(['\n', '\r']);
        let ending = &line[body.len()..];

        write!(self.writer(), "{}{}", style.paint(body), ending)?;
        Ok(())
    }
}
