use crate::areas::source_file::SourceFile;
use std::cell::{RefCell, RefMut};
use std::path::Path;

/// Two files being compared and the sink their diff is written to
pub struct Comparison {
    from_file: SourceFile,
    to_file: SourceFile,
    writer: RefCell<Box<dyn std::io::Write>>,
}

impl Comparison {
    pub fn new(from: &Path, to: &Path, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let from_file = SourceFile::open(from)?;
        let to_file = SourceFile::open(to)?;

        Ok(Comparison {
            from_file,
            to_file,
            writer: RefCell::new(writer),
        })
    }

    pub fn from_file(&self) -> &SourceFile {
        &self.from_file
    }

    pub fn to_file(&self) -> &SourceFile {
        &self.to_file
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }
}
