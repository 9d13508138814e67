use crate::artifacts::junk::{CharJunk, JunkPredicate, LineJunk};
use crate::artifacts::matcher::opcode::{Opcode, Tag};
use crate::artifacts::matcher::sequence_matcher::SequenceMatcher;
use std::collections::VecDeque;
use std::vec;

/// Ratio a candidate pair has to beat to be considered at all
const BEST_RATIO_FLOOR: f64 = 0.74;
/// Ratio the best pair needs to be synced on when no identical pair exists
const SYNC_CUTOFF: f64 = 0.75;

/// Line differ producing human readable deltas with intraline hints
///
/// Each output line starts with a two character code: `"- "` (only in the
/// first sequence), `"+ "` (only in the second), `"  "` (in both) or `"? "`
/// (a guide line pointing at intraline changes, never present in either).
#[derive(Debug, Clone, Copy, Default)]
pub struct Differ {
    linejunk: Option<LineJunk>,
    charjunk: Option<CharJunk>,
}

impl Differ {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_junk(linejunk: Option<LineJunk>, charjunk: Option<CharJunk>) -> Self {
        Self { linejunk, charjunk }
    }

    /// Lazily compares two line sequences; lines should keep their endings.
    pub fn compare<'a, S>(&self, a: &'a [S], b: &'a [S]) -> Compare<'a>
    where
        S: AsRef<str>,
    {
        let a: Vec<&'a str> = a.iter().map(|line| line.as_ref()).collect();
        let b: Vec<&'a str> = b.iter().map(|line| line.as_ref()).collect();

        let opcodes = {
            let isjunk = self
                .linejunk
                .map(|junk| Box::new(move |line: &&str| junk(line)) as JunkPredicate<'_, &str>);
            SequenceMatcher::with_junk(isjunk, &a, &b, true)
                .get_opcodes()
                .to_vec()
        };

        Compare {
            a,
            b,
            charjunk: self.charjunk,
            opcodes: opcodes.into_iter(),
            pending: VecDeque::new(),
        }
    }
}

/// Delta lines of a `Differ::compare` run, computed one opcode at a time
pub struct Compare<'a> {
    a: Vec<&'a str>,
    b: Vec<&'a str>,
    charjunk: Option<CharJunk>,
    opcodes: vec::IntoIter<Opcode>,
    pending: VecDeque<String>,
}

/// Pending work of a replace block, processed last-in first-out
enum Task {
    /// Pair up lines of `a[alo..ahi]` and `b[blo..bhi]`, both non empty
    Replace {
        alo: usize,
        ahi: usize,
        blo: usize,
        bhi: usize,
    },
    /// Sub-block on one side of a synced pair, either side may be empty
    Helper {
        alo: usize,
        ahi: usize,
        blo: usize,
        bhi: usize,
    },
    Lines(Vec<String>),
}

impl<'a> Compare<'a> {
    fn render_opcode(&mut self, op: Opcode) {
        match op.tag {
            Tag::Replace => self.fancy_replace(op.a_start, op.a_end, op.b_start, op.b_end),
            Tag::Delete => self.dump("-", Seq::A, op.a_start, op.a_end),
            Tag::Insert => self.dump("+", Seq::B, op.b_start, op.b_end),
            Tag::Equal => self.dump(" ", Seq::A, op.a_start, op.a_end),
        }
    }

    fn dump(&mut self, tag: &str, seq: Seq, lo: usize, hi: usize) {
        let lines = match seq {
            Seq::A => &self.a[lo..hi],
            Seq::B => &self.b[lo..hi],
        };
        self.pending
            .extend(lines.iter().map(|line| format!("{tag} {line}")));
    }

    fn fancy_replace(&mut self, alo: usize, ahi: usize, blo: usize, bhi: usize) {
        let mut tasks = vec![Task::Replace { alo, ahi, blo, bhi }];

        while let Some(task) = tasks.pop() {
            match task {
                Task::Lines(lines) => self.pending.extend(lines),
                Task::Helper { alo, ahi, blo, bhi } => match (alo < ahi, blo < bhi) {
                    (true, true) => tasks.push(Task::Replace { alo, ahi, blo, bhi }),
                    (true, false) => self.dump("-", Seq::A, alo, ahi),
                    (false, true) => self.dump("+", Seq::B, blo, bhi),
                    (false, false) => {}
                },
                Task::Replace { alo, ahi, blo, bhi } => {
                    let Some((best_i, best_j, synced)) = self.find_sync_pair(alo, ahi, blo, bhi)
                    else {
                        self.plain_replace(alo, ahi, blo, bhi);
                        continue;
                    };

                    tasks.push(Task::Helper {
                        alo: best_i + 1,
                        ahi,
                        blo: best_j + 1,
                        bhi,
                    });
                    tasks.push(Task::Lines(synced));
                    tasks.push(Task::Helper {
                        alo,
                        ahi: best_i,
                        blo,
                        bhi: best_j,
                    });
                }
            }
        }
    }

    /// Picks the most similar pair of lines, returning its indices and the
    /// lines to emit for it; `None` when nothing is close enough.
    fn find_sync_pair(
        &self,
        alo: usize,
        ahi: usize,
        blo: usize,
        bhi: usize,
    ) -> Option<(usize, usize, Vec<String>)> {
        let a_chars: Vec<Vec<char>> = self.a[alo..ahi]
            .iter()
            .map(|l| l.chars().collect())
            .collect();
        let b_chars: Vec<Vec<char>> = self.b[blo..bhi]
            .iter()
            .map(|l| l.chars().collect())
            .collect();

        let mut best_ratio = BEST_RATIO_FLOOR;
        let mut best = None;
        let mut identical = None;

        for (j, bj) in b_chars.iter().enumerate() {
            let mut cruncher = SequenceMatcher::with_junk(self.char_predicate(), &[], bj, true);
            for (i, ai) in a_chars.iter().enumerate() {
                if self.a[alo + i] == self.b[blo + j] {
                    if identical.is_none() {
                        identical = Some((alo + i, blo + j));
                    }
                    continue;
                }

                cruncher.set_seq1(ai);
                // Cheapest upper bounds first, each one prunes the next.
                if cruncher.real_quick_ratio() > best_ratio
                    && cruncher.quick_ratio() > best_ratio
                    && cruncher.ratio() > best_ratio
                {
                    best_ratio = cruncher.ratio();
                    best = Some((alo + i, blo + j));
                }
            }
        }

        if best_ratio >= SYNC_CUTOFF
            && let Some((best_i, best_j)) = best
        {
            debug_log!("syncing a[{best_i}] with b[{best_j}] at ratio {best_ratio:.3}");
            let synced = self.hinted_pair(
                self.a[best_i],
                self.b[best_j],
                &a_chars[best_i - alo],
                &b_chars[best_j - blo],
            );
            return Some((best_i, best_j, synced));
        }

        let (eq_i, eq_j) = identical?;
        debug_log!("syncing identical lines a[{eq_i}] and b[{eq_j}]");
        Some((eq_i, eq_j, vec![format!("  {}", self.a[eq_i])]))
    }

    fn plain_replace(&mut self, alo: usize, ahi: usize, blo: usize, bhi: usize) {
        // The shorter block goes first; on a tie deletions lead.
        if bhi - blo < ahi - alo {
            self.dump("+", Seq::B, blo, bhi);
            self.dump("-", Seq::A, alo, ahi);
        } else {
            self.dump("-", Seq::A, alo, ahi);
            self.dump("+", Seq::B, blo, bhi);
        }
    }

    fn char_predicate<'c>(&self) -> Option<JunkPredicate<'c, char>> {
        self.charjunk
            .map(|junk| Box::new(junk) as JunkPredicate<'c, char>)
    }

    fn hinted_pair(
        &self,
        aline: &str,
        bline: &str,
        achars: &[char],
        bchars: &[char],
    ) -> Vec<String> {
        let cruncher = SequenceMatcher::with_junk(self.char_predicate(), achars, bchars, true);

        let mut atags = String::new();
        let mut btags = String::new();
        for op in cruncher.get_opcodes() {
            let (la, lb) = (op.a_len(), op.b_len());
            match op.tag {
                Tag::Replace => {
                    atags.extend(std::iter::repeat_n('^', la));
                    btags.extend(std::iter::repeat_n('^', lb));
                }
                Tag::Delete => atags.extend(std::iter::repeat_n('-', la)),
                Tag::Insert => btags.extend(std::iter::repeat_n('+', lb)),
                Tag::Equal => {
                    atags.extend(std::iter::repeat_n(' ', la));
                    btags.extend(std::iter::repeat_n(' ', lb));
                }
            }
        }

        hint_lines(aline, bline, &atags, &btags)
    }
}

#[derive(Debug, Clone, Copy)]
enum Seq {
    A,
    B,
}

/// Formats a synced pair of differing lines with their `?` guides.
fn hint_lines(aline: &str, bline: &str, atags: &str, btags: &str) -> Vec<String> {
    let atags = keep_original_whitespace(aline, atags);
    let btags = keep_original_whitespace(bline, btags);
    let (atags, btags) = (atags.trim_end(), btags.trim_end());

    let mut lines = vec![format!("- {aline}")];
    if !atags.is_empty() {
        lines.push(format!("? {atags}\n"));
    }
    lines.push(format!("+ {bline}"));
    if !btags.is_empty() {
        lines.push(format!("? {btags}\n"));
    }
    lines
}

/// Replaces blank tags with the whitespace they sit under, so tabs in the
/// line keep the guide aligned.
fn keep_original_whitespace(line: &str, tags: &str) -> String {
    line.chars()
        .zip(tags.chars())
        .map(|(ch, tag)| {
            if tag == ' ' && ch.is_whitespace() {
                ch
            } else {
                tag
            }
        })
        .collect()
}

impl Iterator for Compare<'_> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(line) = self.pending.pop_front() {
                return Some(line);
            }

            let op = self.opcodes.next()?;
            self.render_opcode(op);
        }
    }
}
