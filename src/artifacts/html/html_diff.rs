use crate::artifacts::core::error::DiffError;
use crate::artifacts::html::charset::{charset_limit, encode_references};
use crate::artifacts::html::line_pairs::{
    LineNumber, MARK_END, MARK_START, Row, SideLine, side_by_side,
};
use crate::artifacts::html::templates;
use crate::artifacts::junk::{CharJunk, LineJunk, is_character_junk};
use derive_new::new;
use std::cell::Cell;

/// Per table settings of `HtmlDiff::make_table` and `HtmlDiff::make_file`
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct TableOptions {
    /// Column header of the from side, inserted as is
    #[new(default)]
    pub fromdesc: String,
    #[new(default)]
    pub todesc: String,
    /// Show only the lines around each change instead of the full files
    #[new(value = "false")]
    pub context: bool,
    /// Lines of context around each change, and how far before a change the
    /// "next" anchors are dropped
    #[new(value = "5")]
    pub numlines: usize,
    /// Encoding the `make_file` document declares
    #[new(value = "\"utf-8\".to_string()")]
    pub charset: String,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl TableOptions {
    pub fn descriptions(mut self, fromdesc: impl Into<String>, todesc: impl Into<String>) -> Self {
        self.fromdesc = fromdesc.into();
        self.todesc = todesc.into();
        self
    }

    pub fn context(mut self, context: bool) -> Self {
        self.context = context;
        self
    }

    pub fn numlines(mut self, numlines: usize) -> Self {
        self.numlines = numlines;
        self
    }

    pub fn charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = charset.into();
        self
    }
}

/// Side by side HTML comparison of two line sequences
///
/// Rows carry line numbers, intraline change highlights and "next change"
/// navigation links. Tables made by one instance get distinct anchor
/// prefixes, so several of them can share a page.
#[derive(Debug)]
pub struct HtmlDiff {
    tabsize: usize,
    wrapcolumn: Option<usize>,
    linejunk: Option<LineJunk>,
    charjunk: Option<CharJunk>,
    next_prefix: Cell<usize>,
}

impl Default for HtmlDiff {
    fn default() -> Self {
        Self {
            tabsize: 8,
            wrapcolumn: None,
            linejunk: None,
            charjunk: Some(is_character_junk),
            next_prefix: Cell::new(0),
        }
    }
}

impl HtmlDiff {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tabsize(mut self, tabsize: usize) -> Self {
        self.tabsize = tabsize;
        self
    }

    /// Column at which long lines are wrapped; `None` or `Some(0)` disables wrapping.
    pub fn wrapcolumn(mut self, wrapcolumn: Option<usize>) -> Self {
        self.wrapcolumn = wrapcolumn.filter(|&column| column > 0);
        self
    }

    pub fn linejunk(mut self, linejunk: Option<LineJunk>) -> Self {
        self.linejunk = linejunk;
        self
    }

    pub fn charjunk(mut self, charjunk: Option<CharJunk>) -> Self {
        self.charjunk = charjunk;
        self
    }

    /// Complete XHTML document holding the table and a legend.
    ///
    /// The document declares `options.charset` (utf-8 unless set), and
    /// characters the charset cannot represent are written as numeric
    /// character references.
    pub fn make_file<S>(
        &self,
        fromlines: &[S],
        tolines: &[S],
        options: &TableOptions,
    ) -> Result<String, DiffError>
    where
        S: AsRef<str>,
    {
        let limit = charset_limit(&options.charset)?;
        let table = self.make_table(fromlines, tolines, options);

        let document = templates::document(&options.charset, &table);

        Ok(encode_references(&document, limit))
    }

    /// Table with one row per line pair; lines should not carry endings.
    pub fn make_table<S>(&self, fromlines: &[S], tolines: &[S], options: &TableOptions) -> String
    where
        S: AsRef<str>,
    {
        let prefix = self.next_prefix.get();
        self.next_prefix.set(prefix + 1);
        let (fromprefix, toprefix) = (format!("from{prefix}_"), format!("to{prefix}_"));

        let fromlines: Vec<String> = fromlines
            .iter()
            .map(|line| expand_tabs(line.as_ref(), self.tabsize))
            .collect();
        let tolines: Vec<String> = tolines
            .iter()
            .map(|line| expand_tabs(line.as_ref(), self.tabsize))
            .collect();

        let context = options.context.then_some(options.numlines);
        let mut rows = side_by_side(&fromlines, &tolines, context, self.linejunk, self.charjunk);
        if let Some(wrapcolumn) = self.wrapcolumn {
            rows = wrap_rows(rows, wrapcolumn);
        }

        let cells: Vec<Option<(String, String)>> = rows
            .iter()
            .map(|row| match row {
                Row::Separator => None,
                Row::Pair { from, to, .. } => {
                    Some((format_line(&fromprefix, from), format_line(&toprefix, to)))
                }
            })
            .collect();
        let flags: Vec<Option<bool>> = rows
            .iter()
            .map(|row| match row {
                Row::Separator => None,
                Row::Pair { changed, .. } => Some(*changed),
            })
            .collect();

        let data_rows = render_rows(cells, flags, &toprefix, options);
        let header_row = if options.fromdesc.is_empty() && options.todesc.is_empty() {
            String::new()
        } else {
            templates::header_row(&options.fromdesc, &options.todesc)
        };

        templates::table(&toprefix, &header_row, &data_rows)
            .replace(&format!("{MARK_START}+"), r#"<span class="diff_add">"#)
            .replace(&format!("{MARK_START}-"), r#"<span class="diff_sub">"#)
            .replace(&format!("{MARK_START}^"), r#"<span class="diff_chg">"#)
            .replace(MARK_END, "</span>")
            .replace('\t', "&nbsp;")
    }
}

/// Expands tabs to spaces, then turns those spaces (but not the original
/// ones) into tabs so they survive until the final markup pass.
fn expand_tabs(line: &str, tabsize: usize) -> String {
    let mut expanded = String::with_capacity(line.len());
    let mut column = 0;
    for ch in line.chars() {
        match ch {
            '\t' => {
                if tabsize > 0 {
                    let width = tabsize - column % tabsize;
                    expanded.extend(std::iter::repeat_n('\t', width));
                    column += width;
                }
            }
            '\n' | '\r' => {
                expanded.push(ch);
                column = 0;
            }
            _ => {
                expanded.push(ch);
                column += 1;
            }
        }
    }
    expanded.trim_end_matches('\n').to_string()
}

fn wrap_rows(rows: Vec<Row>, wrapcolumn: usize) -> Vec<Row> {
    let mut wrapped = Vec::with_capacity(rows.len());
    for row in rows {
        match row {
            Row::Separator => wrapped.push(Row::Separator),
            Row::Pair { from, to, changed } => {
                let mut froms = split_line(from, wrapcolumn).into_iter();
                let mut tos = split_line(to, wrapcolumn).into_iter();
                loop {
                    let (from, to) = match (froms.next(), tos.next()) {
                        (None, None) => break,
                        (from, to) => (
                            from.unwrap_or_else(SideLine::padding),
                            to.unwrap_or_else(SideLine::padding),
                        ),
                    };
                    wrapped.push(Row::Pair { from, to, changed });
                }
            }
        }
    }
    wrapped
}

/// Splits a line into fragments of at most `wrapcolumn` visible chars.
///
/// Marks are not counted. A fragment ending inside a mark closes it and the
/// next fragment reopens it.
fn split_line(line: SideLine, wrapcolumn: usize) -> Vec<SideLine> {
    if line.number == LineNumber::Blank {
        return vec![line];
    }

    let mut fragments = Vec::new();
    let mut number = line.number;
    let mut text: Vec<char> = line.text.chars().collect();
    loop {
        let size = text.len();
        let marks = text.iter().filter(|&&ch| ch == MARK_START).count();
        if size <= wrapcolumn || size.saturating_sub(marks * 3) <= wrapcolumn {
            fragments.push(SideLine {
                number,
                text: text.into_iter().collect(),
            });
            return fragments;
        }

        let (mut i, mut visible, mut mark) = (0, 0, None);
        while visible < wrapcolumn && i < size {
            match text[i] {
                MARK_START => {
                    mark = text.get(i + 1).copied();
                    i += 2;
                }
                MARK_END => {
                    mark = None;
                    i += 1;
                }
                _ => {
                    visible += 1;
                    i += 1;
                }
            }
        }

        let mut rest = text.split_off(i.min(size));
        if let Some(mark) = mark {
            text.push(MARK_END);
            rest.splice(0..0, [MARK_START, mark]);
        }
        fragments.push(SideLine {
            number,
            text: text.into_iter().collect(),
        });

        number = LineNumber::Continuation;
        text = rest;
    }
}

/// Header and text cells of one side; spaces become non-breaking.
fn format_line(prefix: &str, line: &SideLine) -> String {
    let (id, number) = match line.number {
        LineNumber::Number(number) => (format!(" id=\"{prefix}{number}\""), number.to_string()),
        LineNumber::Blank => (String::new(), String::new()),
        LineNumber::Continuation => (String::new(), ">".to_string()),
    };
    let text = line
        .text
        .replace('&', "&amp;")
        .replace('>', "&gt;")
        .replace('<', "&lt;")
        .replace(' ', "&nbsp;");

    templates::line_cells(&id, &number, text.trim_end())
}

/// Table body rows with the navigation column filled in.
///
/// Each change gets an anchor `numlines` rows ahead of it and a link to the
/// following change; the first row links to the first change and the last
/// change links back to the top.
fn render_rows(
    mut cells: Vec<Option<(String, String)>>,
    mut flags: Vec<Option<bool>>,
    toprefix: &str,
    options: &TableOptions,
) -> String {
    let mut next_id = vec![String::new(); flags.len()];
    let mut next_href = vec![String::new(); flags.len()];
    let (mut changes, mut in_change, mut last) = (0, false, 0);

    for (i, flag) in flags.iter().enumerate() {
        if *flag == Some(true) {
            if !in_change {
                in_change = true;
                last = i;
                next_id[i.saturating_sub(options.numlines)] =
                    format!(" id=\"difflib_chg_{toprefix}_{changes}\"");
                changes += 1;
                next_href[last] = format!("<a href=\"#difflib_chg_{toprefix}_{changes}\">n</a>");
            }
        } else {
            in_change = false;
        }
    }

    if flags.is_empty() {
        let placeholder = if options.context {
            templates::NO_DIFFERENCES_CELLS
        } else {
            templates::EMPTY_FILE_CELLS
        };
        flags.push(Some(false));
        cells.push(Some((placeholder.to_string(), placeholder.to_string())));
        next_id.push(String::new());
        next_href.push(String::new());
    }
    if flags[0] != Some(true) {
        next_href[0] = format!("<a href=\"#difflib_chg_{toprefix}_0\">f</a>");
    }
    next_href[last] = format!("<a href=\"#difflib_chg_{toprefix}_top\">t</a>");

    let mut rows = String::new();
    for (i, row) in cells.iter().enumerate() {
        match row {
            // A separator before the first row opens nothing.
            None if i == 0 => {}
            None => rows.push_str(templates::SECTION_BREAK),
            Some((from_cells, to_cells)) => rows.push_str(&templates::data_row(
                &next_id[i],
                &next_href[i],
                from_cells,
                to_cells,
            )),
        }
    }
    rows
}
