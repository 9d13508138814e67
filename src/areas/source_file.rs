use anyhow::Context;
use chrono::{DateTime, Local, SecondsFormat};
use std::path::{Path, PathBuf};

/// One side of a comparison, read fully into memory
#[derive(Debug, Clone)]
pub struct SourceFile {
    path: PathBuf,
    data: Vec<u8>,
    modified: String,
}

impl SourceFile {
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let data = std::fs::read(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        let modified = std::fs::metadata(path)
            .and_then(|metadata| metadata.modified())
            .with_context(|| format!("Failed to read modification time: {}", path.display()))?;
        let modified =
            DateTime::<Local>::from(modified).to_rfc3339_opts(SecondsFormat::Micros, false);

        Ok(SourceFile {
            path: path.to_path_buf(),
            data,
            modified,
        })
    }

    pub fn display_name(&self) -> String {
        self.path.display().to_string()
    }

    /// Modification time as RFC 3339 local time
    pub fn modified(&self) -> &str {
        &self.modified
    }

    /// Lines with their endings, or `None` when the file is not UTF-8.
    pub fn text_lines(&self) -> Option<Vec<&str>> {
        let text = std::str::from_utf8(&self.data).ok()?;
        Some(text.split_inclusive('\n').collect())
    }

    /// Lines with their endings, split on `\n` regardless of encoding.
    pub fn byte_lines(&self) -> Vec<&[u8]> {
        self.data.split_inclusive(|&byte| byte == b'\n').collect()
    }

    pub fn require_text_lines(&self) -> anyhow::Result<Vec<&str>> {
        self.text_lines()
            .with_context(|| format!("File is not valid UTF-8: {}", self.path.display()))
    }
}
