//! Junk predicates
//!
//! A junk element is ignored while searching for matching blocks but may still
//! extend a match found around it. Callers pass their own predicate to the
//! matcher; the two below are the built-in heuristics for lines and characters.

use regex::Regex;
use std::sync::LazyLock;

/// Optional whitespace, at most one `#`, optional whitespace.
const LINE_JUNK_PATTERN: &str = r"^\s*(?:#\s*)?$";

// Matching is linear in the line length.
static LINE_JUNK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(LINE_JUNK_PATTERN).expect("line junk pattern is a valid literal"));

/// Caller supplied classifier over sequence elements
pub type JunkPredicate<'j, T> = Box<dyn Fn(&T) -> bool + 'j>;

/// Line classifier used by `Differ` and `HtmlDiff`
pub type LineJunk = fn(&str) -> bool;

/// Character classifier used for intraline matching
pub type CharJunk = fn(&char) -> bool;

/// Returns true for blank lines and lines holding a lone `#`.
pub fn is_line_junk(line: &str) -> bool {
    LINE_JUNK_REGEX.is_match(line)
}

/// Returns true for a space or a tab.
pub fn is_character_junk(ch: &char) -> bool {
    matches!(ch, ' ' | '\t')
}
