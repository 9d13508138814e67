use crate::artifacts::matcher::grouped_opcodes::GroupedOpcodes;
use crate::artifacts::matcher::opcode::{Opcode, Tag};
use crate::artifacts::matcher::sequence_matcher::SequenceMatcher;
use crate::artifacts::text::diff_options::{DiffOptions, format_range_context, format_range_unified};
use std::borrow::Cow;
use std::collections::VecDeque;

/// Text diff layout produced by `DiffText`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiffFormat {
    Unified,
    Context,
}

/// Lazy diff text, one hunk rendered per refill
///
/// The file headers are emitted right before the first hunk, so inputs
/// without differences produce no lines at all.
pub struct DiffText<'a> {
    format: DiffFormat,
    a: Vec<Cow<'a, str>>,
    b: Vec<Cow<'a, str>>,
    options: DiffOptions,
    groups: GroupedOpcodes,
    started: bool,
    pending: VecDeque<String>,
}

/// Unified diff of two line sequences (`---`/`+++` headers, `@@` hunks)
pub fn unified_diff<'a, S>(a: &'a [S], b: &'a [S], options: DiffOptions) -> DiffText<'a>
where
    S: AsRef<str>,
{
    DiffText::new(
        DiffFormat::Unified,
        borrow_lines(a),
        borrow_lines(b),
        options,
    )
}

/// Context diff of two line sequences (`***`/`---` headers, `!` changes)
pub fn context_diff<'a, S>(a: &'a [S], b: &'a [S], options: DiffOptions) -> DiffText<'a>
where
    S: AsRef<str>,
{
    DiffText::new(
        DiffFormat::Context,
        borrow_lines(a),
        borrow_lines(b),
        options,
    )
}

fn borrow_lines<S: AsRef<str>>(lines: &[S]) -> Vec<Cow<'_, str>> {
    lines
        .iter()
        .map(|line| Cow::Borrowed(line.as_ref()))
        .collect()
}

impl<'a> DiffText<'a> {
    pub fn new(
        format: DiffFormat,
        a: Vec<Cow<'a, str>>,
        b: Vec<Cow<'a, str>>,
        options: DiffOptions,
    ) -> Self {
        let groups = SequenceMatcher::new(&a, &b).get_grouped_opcodes(options.n);

        Self {
            format,
            a,
            b,
            options,
            groups,
            started: false,
            pending: VecDeque::new(),
        }
    }

    fn render_headers(&mut self) {
        let (old_marker, new_marker) = match self.format {
            DiffFormat::Unified => ("---", "+++"),
            DiffFormat::Context => ("***", "---"),
        };
        let opts = &self.options;

        self.pending
            .push_back(opts.file_header(old_marker, &opts.fromfile, &opts.fromfiledate));
        self.pending
            .push_back(opts.file_header(new_marker, &opts.tofile, &opts.tofiledate));
    }

    fn render_group(&mut self, group: &[Opcode]) {
        if !self.started {
            self.started = true;
            self.render_headers();
        }

        match self.format {
            DiffFormat::Unified => self.render_unified(group),
            DiffFormat::Context => self.render_context(group),
        }
    }

    fn render_unified(&mut self, group: &[Opcode]) {
        let (Some(first), Some(last)) = (group.first(), group.last()) else {
            return;
        };
        let lineterm = &self.options.lineterm;

        self.pending.push_back(format!(
            "@@ -{} +{} @@{lineterm}",
            format_range_unified(first.a_start, last.a_end),
            format_range_unified(first.b_start, last.b_end),
        ));

        for op in group {
            let old = &self.a[op.a_start..op.a_end];
            let new = &self.b[op.b_start..op.b_end];
            match op.tag {
                Tag::Equal => prefix_lines(&mut self.pending, " ", old),
                Tag::Delete => prefix_lines(&mut self.pending, "-", old),
                Tag::Insert => prefix_lines(&mut self.pending, "+", new),
                Tag::Replace => {
                    prefix_lines(&mut self.pending, "-", old);
                    prefix_lines(&mut self.pending, "+", new);
                }
            }
        }
    }

    fn render_context(&mut self, group: &[Opcode]) {
        let (Some(first), Some(last)) = (group.first(), group.last()) else {
            return;
        };
        let lineterm = &self.options.lineterm;

        self.pending.push_back(format!("***************{lineterm}"));

        self.pending.push_back(format!(
            "*** {} ****{lineterm}",
            format_range_context(first.a_start, last.a_end)
        ));
        if group
            .iter()
            .any(|op| matches!(op.tag, Tag::Replace | Tag::Delete))
        {
            for op in group.iter().filter(|op| op.tag != Tag::Insert) {
                let old = &self.a[op.a_start..op.a_end];
                prefix_lines(&mut self.pending, context_prefix(op.tag), old);
            }
        }

        self.pending.push_back(format!(
            "--- {} ----{lineterm}",
            format_range_context(first.b_start, last.b_end)
        ));
        if group
            .iter()
            .any(|op| matches!(op.tag, Tag::Replace | Tag::Insert))
        {
            for op in group.iter().filter(|op| op.tag != Tag::Delete) {
                let new = &self.b[op.b_start..op.b_end];
                prefix_lines(&mut self.pending, context_prefix(op.tag), new);
            }
        }
    }
}

fn context_prefix(tag: Tag) -> &'static str {
    match tag {
        Tag::Insert => "+ ",
        Tag::Delete => "- ",
        Tag::Replace => "! ",
        Tag::Equal => "  ",
    }
}

fn prefix_lines(pending: &mut VecDeque<String>, prefix: &str, lines: &[Cow<'_, str>]) {
    pending.extend(lines.iter().map(|line| format!("{prefix}{line}")));
}

impl Iterator for DiffText<'_> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(line) = self.pending.pop_front() {
                return Some(line);
            }

            let group = self.groups.next()?;
            self.render_group(&group);
        }
    }
}
