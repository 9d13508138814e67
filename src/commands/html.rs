use crate::areas::comparison::Comparison;
use crate::artifacts::html::html_diff::{HtmlDiff, TableOptions};

impl Comparison {
    /// Side by side document; `context` keeps only `lines` around each change.
    pub fn html_diff(&self, context: bool, lines: usize) -> anyhow::Result<()> {
        let (from, to) = (self.from_file(), self.to_file());
        let a = from.require_text_lines()?;
        let b = to.require_text_lines()?;

        let options = TableOptions::default()
            .descriptions(from.display_name(), to.display_name())
            .context(context)
            .numlines(lines);
        let document = HtmlDiff::new().make_file(&a, &b, &options)?;

        write!(self.writer(), "{document}")?;
        Ok(())
    }
}
