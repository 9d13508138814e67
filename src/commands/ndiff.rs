use crate::areas::comparison::Comparison;
use crate::artifacts::differ::restore::ndiff;
use crate::commands::LineStyle;

impl Comparison {
    pub fn ndiff(&self) -> anyhow::Result<()> {
        let a = self.from_file().require_text_lines()?;
        let b = self.to_file().require_text_lines()?;

        for line in ndiff(&a, &b, None) {
            let style = match line.get(..2) {
                Some("- ") => LineStyle::Removed,
                Some("+ ") => LineStyle::Added,
                Some("? ") => LineStyle::Hint,
                _ => LineStyle::Plain,
            };
            self.write_styled(&line, style)?;
        }

        Ok(())
    }
}
