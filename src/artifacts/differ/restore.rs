use crate::artifacts::differ::differ::{Compare, Differ};
use crate::artifacts::junk::{LineJunk, is_character_junk};

/// Which input of a delta to recover
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    One,
    Two,
}

impl Side {
    fn tag(self) -> &'static str {
        match self {
            Side::One => "- ",
            Side::Two => "+ ",
        }
    }
}

/// `Differ` delta of two line sequences, ignoring blanks and tabs when
/// matching characters within lines.
pub fn ndiff<'a, S>(a: &'a [S], b: &'a [S], linejunk: Option<LineJunk>) -> Compare<'a>
where
    S: AsRef<str>,
{
    Differ::with_junk(linejunk, Some(is_character_junk)).compare(a, b)
}

/// Recovers one of the two sequences that produced a delta.
///
/// Lines common to both and lines tagged for the requested side are kept
/// with their two character prefix removed; guide lines are dropped.
pub fn restore<S>(delta: &[S], which: Side) -> impl Iterator<Item = &str>
where
    S: AsRef<str>,
{
    let tag = which.tag();
    delta.iter().filter_map(move |line| {
        let line = line.as_ref();
        let prefix = line.get(..2)?;
        (prefix == "  " || prefix == tag).then(|| &line[2..])
    })
}
