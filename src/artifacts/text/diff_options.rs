/// Header and formatting settings shared by unified and context diffs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffOptions {
    pub fromfile: String,
    pub tofile: String,
    pub fromfiledate: String,
    pub tofiledate: String,
    /// Lines of context around each change
    pub n: usize,
    /// Appended to header lines; content lines keep their own endings
    pub lineterm: String,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            fromfile: String::new(),
            tofile: String::new(),
            fromfiledate: String::new(),
            tofiledate: String::new(),
            n: 3,
            lineterm: "\n".to_string(),
        }
    }
}

impl DiffOptions {
    pub fn files(mut self, fromfile: impl Into<String>, tofile: impl Into<String>) -> Self {
        self.fromfile = fromfile.into();
        self.tofile = tofile.into();
        self
    }

    pub fn dates(mut self, fromfiledate: impl Into<String>, tofiledate: impl Into<String>) -> Self {
        self.fromfiledate = fromfiledate.into();
        self.tofiledate = tofiledate.into();
        self
    }

    pub fn context(mut self, n: usize) -> Self {
        self.n = n;
        self
    }

    pub fn lineterm(mut self, lineterm: impl Into<String>) -> Self {
        self.lineterm = lineterm.into();
        self
    }

    pub(crate) fn file_header(&self, marker: &str, file: &str, date: &str) -> String {
        if date.is_empty() {
            format!("{marker} {file}{}", self.lineterm)
        } else {
            format!("{marker} {file}\t{date}{}", self.lineterm)
        }
    }
}

/// `start+1` for one line, `start+1,len` otherwise; an empty range names the
/// line before it.
pub(crate) fn format_range_unified(start: usize, stop: usize) -> String {
    let beginning = start + 1;
    match stop - start {
        1 => format!("{beginning}"),
        0 => format!("{start},0"),
        length => format!("{beginning},{length}"),
    }
}

/// `end` for at most one line, `start+1,end` otherwise.
pub(crate) fn format_range_context(start: usize, stop: usize) -> String {
    let length = stop - start;
    let beginning = if length == 0 { start } else { start + 1 };
    if length <= 1 {
        format!("{beginning}")
    } else {
        format!("{beginning},{}", beginning + length - 1)
    }
}
