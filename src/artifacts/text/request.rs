use crate::artifacts::core::error::{Category, DiffError};
use crate::artifacts::text::content::{Content, decode_bytes, encode_bytes};
use crate::artifacts::text::diff_options::DiffOptions;
use crate::artifacts::text::diff_text::{DiffFormat, DiffText};
use std::borrow::Cow;

/// Diff arguments whose text or byte category is checked at run time
///
/// Header fields left unset take the empty value of whichever category the
/// entry point expects; `lineterm` defaults to a newline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffRequest {
    pub a: Vec<Content>,
    pub b: Vec<Content>,
    pub fromfile: Option<Content>,
    pub tofile: Option<Content>,
    pub fromfiledate: Option<Content>,
    pub tofiledate: Option<Content>,
    pub n: usize,
    pub lineterm: Option<Content>,
}

impl DiffRequest {
    pub fn new<A, B>(a: A, b: B) -> Self
    where
        A: IntoIterator,
        A::Item: Into<Content>,
        B: IntoIterator,
        B::Item: Into<Content>,
    {
        Self {
            a: a.into_iter().map(Into::into).collect(),
            b: b.into_iter().map(Into::into).collect(),
            fromfile: None,
            tofile: None,
            fromfiledate: None,
            tofiledate: None,
            n: 3,
            lineterm: None,
        }
    }

    pub fn files(mut self, fromfile: impl Into<Content>, tofile: impl Into<Content>) -> Self {
        self.fromfile = Some(fromfile.into());
        self.tofile = Some(tofile.into());
        self
    }

    pub fn dates(
        mut self,
        fromfiledate: impl Into<Content>,
        tofiledate: impl Into<Content>,
    ) -> Self {
        self.fromfiledate = Some(fromfiledate.into());
        self.tofiledate = Some(tofiledate.into());
        self
    }

    pub fn context(mut self, n: usize) -> Self {
        self.n = n;
        self
    }

    pub fn lineterm(mut self, lineterm: impl Into<Content>) -> Self {
        self.lineterm = Some(lineterm.into());
        self
    }

    /// Renders a text diff; fails before producing anything if any value is bytes.
    pub fn diff_text(self, format: DiffFormat) -> Result<DiffText<'static>, DiffError> {
        let checked = self.into_checked(Category::Text)?;
        Ok(checked.render(format))
    }

    fn into_checked(self, expected: Category) -> Result<CheckedRequest, DiffError> {
        // The text entry point reports bad content lines separately from bad
        // header arguments; the byte entry point treats every value alike.
        let line_error = |content: &Content| match expected {
            Category::Text => DiffError::LineTypeMismatch {
                expected,
                found: content.category(),
                value: content.describe(),
            },
            Category::Bytes => argument_error(expected, content),
        };

        let a = decode_lines(self.a, expected, line_error)?;
        let b = decode_lines(self.b, expected, line_error)?;
        let fromfile = decode_argument(self.fromfile, expected, "")?;
        let tofile = decode_argument(self.tofile, expected, "")?;
        let fromfiledate = decode_argument(self.fromfiledate, expected, "")?;
        let tofiledate = decode_argument(self.tofiledate, expected, "")?;
        let lineterm = decode_argument(self.lineterm, expected, "\n")?;

        let options = DiffOptions::default()
            .files(fromfile, tofile)
            .dates(fromfiledate, tofiledate)
            .context(self.n)
            .lineterm(lineterm);

        Ok(CheckedRequest { a, b, options })
    }
}

struct CheckedRequest {
    a: Vec<Cow<'static, str>>,
    b: Vec<Cow<'static, str>>,
    options: DiffOptions,
}

impl CheckedRequest {
    fn render(self, format: DiffFormat) -> DiffText<'static> {
        DiffText::new(format, self.a, self.b, self.options)
    }
}

fn argument_error(expected: Category, content: &Content) -> DiffError {
    DiffError::ArgumentTypeMismatch {
        expected,
        found: content.category(),
        value: content.describe(),
    }
}

fn decode_content(content: Content, expected: Category) -> Result<String, Content> {
    match (content, expected) {
        (Content::Text(text), Category::Text) => Ok(text),
        (Content::Bytes(bytes), Category::Bytes) => Ok(decode_bytes(&bytes)),
        (content, _) => Err(content),
    }
}

fn decode_lines(
    lines: Vec<Content>,
    expected: Category,
    on_mismatch: impl Fn(&Content) -> DiffError,
) -> Result<Vec<Cow<'static, str>>, DiffError> {
    lines
        .into_iter()
        .map(|line| {
            decode_content(line, expected)
                .map(Cow::Owned)
                .map_err(|line| on_mismatch(&line))
        })
        .collect()
}

fn decode_argument(
    argument: Option<Content>,
    expected: Category,
    default: &str,
) -> Result<String, DiffError> {
    match argument {
        None => Ok(default.to_string()),
        Some(content) => {
            decode_content(content, expected).map_err(|content| argument_error(expected, &content))
        }
    }
}

/// Byte lines produced by `diff_bytes`
pub struct ByteDiff {
    inner: DiffText<'static>,
}

impl Iterator for ByteDiff {
    type Item = Vec<u8>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|line| encode_bytes(&line))
    }
}

/// Runs a text diff over byte content.
///
/// Every value must be bytes. Bytes are mapped one-to-one onto chars, the
/// text renderer does its work, and each produced line is mapped back, so
/// content in any encoding (or none) is reproduced exactly.
pub fn diff_bytes(format: DiffFormat, request: DiffRequest) -> Result<ByteDiff, DiffError> {
    let checked = request.into_checked(Category::Bytes)?;
    Ok(ByteDiff {
        inner: checked.render(format),
    })
}
