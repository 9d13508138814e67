use crate::areas::comparison::Comparison;
use crate::artifacts::text::diff_options::DiffOptions;
use crate::artifacts::text::diff_text::{DiffFormat, context_diff, unified_diff};
use crate::artifacts::text::request::{DiffRequest, diff_bytes};
use crate::commands::LineStyle;

impl Comparison {
    pub fn unified_diff(&self, lines: usize) -> anyhow::Result<()> {
        self.text_diff(DiffFormat::Unified, lines)
    }

    pub fn context_diff(&self, lines: usize) -> anyhow::Result<()> {
        self.text_diff(DiffFormat::Context, lines)
    }

    fn text_diff(&self, format: DiffFormat, lines: usize) -> anyhow::Result<()> {
        let (from, to) = (self.from_file(), self.to_file());

        let (Some(a), Some(b)) = (from.text_lines(), to.text_lines()) else {
            return self.byte_diff(format, lines);
        };

        let options = DiffOptions::default()
            .files(from.display_name(), to.display_name())
            .dates(from.modified(), to.modified())
            .context(lines);
        let diff = match format {
            DiffFormat::Unified => unified_diff(&a, &b, options),
            DiffFormat::Context => context_diff(&a, &b, options),
        };

        for (index, line) in diff.enumerate() {
            // File headers always come first.
            let style = if index < 2 {
                LineStyle::Header
            } else {
                classify(format, &line)
            };
            self.write_styled(&line, style)?;
        }

        Ok(())
    }

    /// Diff of files that are not both UTF-8, written back byte for byte.
    fn byte_diff(&self, format: DiffFormat, lines: usize) -> anyhow::Result<()> {
        let (from, to) = (self.from_file(), self.to_file());

        let request = DiffRequest::new(from.byte_lines(), to.byte_lines())
            .files(
                from.display_name().into_bytes(),
                to.display_name().into_bytes(),
            )
            .dates(from.modified().as_bytes(), to.modified().as_bytes())
            .context(lines);

        for line in diff_bytes(format, request)? {
            self.writer().write_all(&line)?;
        }

        Ok(())
    }
}

fn classify(format: DiffFormat, line: &str) -> LineStyle {
    let body = line.trim_end_matches(['\n', '\r']);
    match format {
        DiffFormat::Unified => match body.chars().next() {
            Some('@') if body.starts_with("@@ ") => LineStyle::Range,
            Some('-') => LineStyle::Removed,
            Some('+') => LineStyle::Added,
            _ => LineStyle::Plain,
        },
        DiffFormat::Context => {
            if body == "***************"
                || (body.starts_with("*** ") && body.ends_with(" ****"))
                || (body.starts_with("--- ") && body.ends_with(" ----"))
            {
                LineStyle::Range
            } else if body.starts_with("- ") {
                LineStyle::Removed
            } else if body.starts_with("+ ") {
                LineStyle::Added
            } else if body.starts_with("! ") {
                LineStyle::Changed
            } else {
                LineStyle::Plain
            }
        }
    }
}
