//! Side by side line pairs for the HTML renderer
//!
//! The ndiff delta is re-read four lines at a time. The first characters of
//! those lines (`-`, `+`, `?`, ` ` or `X` past the end) decide what pair to
//! emit, how `?` guides turn into intraline marks and when blank filler lines
//! are needed so that both columns stay aligned.
//!
//! Intraline changes are marked with `\0` followed by `+`, `-` or `^` at the
//! start and `\x01` at the end. Neither character survives HTML escaping
//! untouched, so the marks are swapped for `<span>` tags only after escaping.

use crate::artifacts::differ::differ::Differ;
use crate::artifacts::junk::{CharJunk, LineJunk};
use std::collections::VecDeque;

pub(crate) const MARK_START: char = '\0';
pub(crate) const MARK_END: char = '\x01';

/// Lookahead placeholder once the delta is exhausted
const END: &str = "X";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LineNumber {
    Number(usize),
    /// Filler line opposite an addition or deletion
    Blank,
    /// Continuation of a wrapped line
    Continuation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SideLine {
    pub number: LineNumber,
    pub text: String,
}

impl SideLine {
    fn filler() -> Self {
        Self {
            number: LineNumber::Blank,
            text: "\n".to_string(),
        }
    }

    pub(crate) fn padding() -> Self {
        Self {
            number: LineNumber::Blank,
            text: " ".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Row {
    /// Boundary between two context sections
    Separator,
    Pair {
        from: SideLine,
        to: SideLine,
        changed: bool,
    },
}

/// How `LineMaker` marks the line it takes from the delta
#[derive(Debug, Clone, Copy)]
enum Mark {
    /// Text as is
    Plain,
    /// Spans taken from the `?` guide line that follows
    Guided,
    /// Whole line highlighted with the given key
    Whole(char),
}

struct LineMaker {
    numbers: [usize; 2],
}

impl LineMaker {
    fn make(&mut self, lines: &mut VecDeque<String>, mark: Mark, side: usize) -> SideLine {
        self.numbers[side] += 1;
        let number = LineNumber::Number(self.numbers[side]);
        let line = lines.pop_front().unwrap_or_default();

        let text = match mark {
            Mark::Plain => strip_code(&line).to_string(),
            Mark::Guided => {
                let guide = lines.pop_front().unwrap_or_default();
                apply_guide(&line, &guide)
            }
            Mark::Whole(key) => {
                let text = match strip_code(&line) {
                    "" => " ",
                    text => text,
                };
                format!("{MARK_START}{key}{text}{MARK_END}")
            }
        };

        SideLine { number, text }
    }

    /// Both sides of an unchanged line
    fn make_common(&mut self, lines: &mut VecDeque<String>) -> (SideLine, SideLine) {
        let from = match lines.front() {
            Some(line) => {
                self.numbers[0] += 1;
                SideLine {
                    number: LineNumber::Number(self.numbers[0]),
                    text: strip_code(line).to_string(),
                }
            }
            None => SideLine::filler(),
        };
        let to = self.make(lines, Mark::Plain, 1);
        (from, to)
    }
}

fn strip_code(line: &str) -> &str {
    line.get(2..).unwrap_or("")
}

/// Wraps every run of `+`, `-` or `^` in the guide around the chars it points at.
fn apply_guide(line: &str, guide: &str) -> String {
    let mut text: Vec<char> = line.chars().collect();
    let guide: Vec<char> = guide.chars().collect();

    let mut spans = Vec::new();
    let mut start = 0;
    while start < guide.len() {
        let key = guide[start];
        let mut end = start + 1;
        if matches!(key, '+' | '-' | '^') {
            while end < guide.len() && guide[end] == key {
                end += 1;
            }
            spans.push((key, start, end));
        }
        start = end;
    }

    for &(key, begin, end) in spans.iter().rev() {
        let (begin, end) = (begin.min(text.len()), end.min(text.len()));
        text.insert(end, MARK_END);
        text.splice(begin..begin, [MARK_START, key]);
    }

    text.into_iter().skip(2).collect()
}

/// Aligned `(from, to, changed)` triples, either side possibly absent
fn aligned_lines(
    delta: impl Iterator<Item = String>,
) -> Vec<(Option<SideLine>, Option<SideLine>, bool)> {
    let mut delta = delta;
    let mut lines: VecDeque<String> = VecDeque::new();
    let mut maker = LineMaker { numbers: [0, 0] };
    let mut out = Vec::new();
    let mut blanks_pending: isize = 0;

    loop {
        while lines.len() < 4 {
            lines.push_back(delta.next().unwrap_or_else(|| END.to_string()));
        }
        let codes: String = lines
            .iter()
            .map(|line| line.chars().next().unwrap_or('X'))
            .collect();

        let mut blanks_to_yield: isize;
        let held;
        if codes.starts_with('X') {
            held = None;
            blanks_to_yield = blanks_pending;
        } else if codes.starts_with("-?+?") {
            let from = maker.make(&mut lines, Mark::Guided, 0);
            let to = maker.make(&mut lines, Mark::Guided, 1);
            out.push((Some(from), Some(to), true));
            continue;
        } else if codes.starts_with("--++") {
            blanks_pending -= 1;
            let from = maker.make(&mut lines, Mark::Whole('-'), 0);
            out.push((Some(from), None, true));
            continue;
        } else if codes.starts_with("--?+") || codes.starts_with("--+") || codes.starts_with("- ") {
            // Leaving a deletion block: catch up on fillers first.
            held = Some((Some(maker.make(&mut lines, Mark::Whole('-'), 0)), None));
            blanks_to_yield = blanks_pending - 1;
            blanks_pending = 0;
        } else if codes.starts_with("-+?") {
            let from = maker.make(&mut lines, Mark::Plain, 0);
            let to = maker.make(&mut lines, Mark::Guided, 1);
            out.push((Some(from), Some(to), true));
            continue;
        } else if codes.starts_with("-?+") {
            let from = maker.make(&mut lines, Mark::Guided, 0);
            let to = maker.make(&mut lines, Mark::Plain, 1);
            out.push((Some(from), Some(to), true));
            continue;
        } else if codes.starts_with('-') {
            blanks_pending -= 1;
            let from = maker.make(&mut lines, Mark::Whole('-'), 0);
            out.push((Some(from), None, true));
            continue;
        } else if codes.starts_with("+--") {
            blanks_pending += 1;
            let to = maker.make(&mut lines, Mark::Whole('+'), 1);
            out.push((None, Some(to), true));
            continue;
        } else if codes.starts_with("+ ") || codes.starts_with("+-") {
            // Leaving an addition block.
            held = Some((None, Some(maker.make(&mut lines, Mark::Whole('+'), 1))));
            blanks_to_yield = blanks_pending + 1;
            blanks_pending = 0;
        } else if codes.starts_with('+') {
            blanks_pending += 1;
            let to = maker.make(&mut lines, Mark::Whole('+'), 1);
            out.push((None, Some(to), true));
            continue;
        } else if codes.starts_with(' ') {
            let (from, to) = maker.make_common(&mut lines);
            out.push((Some(from), Some(to), false));
            continue;
        } else {
            // A stray guide line: nothing to pair it with.
            lines.pop_front();
            continue;
        }

        while blanks_to_yield < 0 {
            blanks_to_yield += 1;
            out.push((None, Some(SideLine::filler()), true));
        }
        while blanks_to_yield > 0 {
            blanks_to_yield -= 1;
            out.push((Some(SideLine::filler()), None, true));
        }

        match held {
            Some((from, to)) => out.push((from, to, true)),
            None => return out,
        }
    }
}

/// Pairs up the aligned lines, flagging a pair changed if either half is.
fn line_pairs(
    aligned: Vec<(Option<SideLine>, Option<SideLine>, bool)>,
) -> Vec<(SideLine, SideLine, bool)> {
    let mut froms: VecDeque<(SideLine, bool)> = VecDeque::new();
    let mut tos: VecDeque<(SideLine, bool)> = VecDeque::new();
    let mut pairs = Vec::new();

    for (from, to, changed) in aligned {
        if let Some(from) = from {
            froms.push_back((from, changed));
        }
        if let Some(to) = to {
            tos.push_back((to, changed));
        }
        while !froms.is_empty() && !tos.is_empty() {
            if let (Some((from, from_changed)), Some((to, to_changed))) =
                (froms.pop_front(), tos.pop_front())
            {
                pairs.push((from, to, from_changed || to_changed));
            }
        }
    }

    pairs
}

/// Keeps `numlines` unchanged pairs around every change and separates the
/// retained sections.
fn with_context(pairs: Vec<(SideLine, SideLine, bool)>, numlines: usize) -> Vec<Row> {
    let context = numlines + 1;
    let mut pairs = pairs.into_iter();
    let mut rows = Vec::new();

    loop {
        // Ring buffer of the most recent `context` pairs before a change.
        let mut ring: Vec<Option<(SideLine, SideLine, bool)>> = vec![None; context];
        let mut index = 0;
        let mut found_change = false;
        while !found_change {
            let Some(pair) = pairs.next() else {
                return rows;
            };
            found_change = pair.2;
            ring[index % context] = Some(pair);
            index += 1;
        }

        let mut to_write;
        if index > context {
            rows.push(Row::Separator);
            to_write = context;
        } else {
            to_write = index;
            index = 0;
        }
        while to_write > 0 {
            if let Some((from, to, changed)) = ring[index % context].take() {
                rows.push(Row::Pair { from, to, changed });
            }
            index += 1;
            to_write -= 1;
        }

        to_write = context - 1;
        while to_write > 0 {
            let Some((from, to, changed)) = pairs.next() else {
                return rows;
            };
            if changed {
                to_write = context - 1;
            } else {
                to_write -= 1;
            }
            rows.push(Row::Pair { from, to, changed });
        }
    }
}

/// Side by side rows of an ndiff of the two inputs, optionally reduced to
/// `context` lines around each change.
pub(crate) fn side_by_side<S>(
    fromlines: &[S],
    tolines: &[S],
    context: Option<usize>,
    linejunk: Option<LineJunk>,
    charjunk: Option<CharJunk>,
) -> Vec<Row>
where
    S: AsRef<str>,
{
    let delta = Differ::with_junk(linejunk, charjunk).compare(fromlines, tolines);
    let pairs = line_pairs(aligned_lines(delta));

    match context {
        Some(numlines) => with_context(pairs, numlines),
        None => pairs
            .into_iter()
            .map(|(from, to, changed)| Row::Pair { from, to, changed })
            .collect(),
    }
}
