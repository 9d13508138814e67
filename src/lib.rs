//! Sequence matching and diff rendering
//!
//! The crate is organized in two layers:
//!
//! - `artifacts`: the matching engine, the text, ndiff and HTML renderers
//! - `areas` and `commands`: the command line front end comparing two files
//!
//! The most common entry points are re-exported at the crate root.

/// Debug logging that is compiled in only with the `debug_matcher` feature flag
///
/// # Usage
/// ```rust,ignore
/// debug_log!("found {} matching blocks", blocks.len());
/// ```
macro_rules! debug_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "debug_matcher")]
        {
            eprintln!($($arg)*);
        }
    };
}

pub mod areas;
pub mod artifacts;
pub mod commands;

pub use artifacts::core::error::{Category, DiffError};
pub use artifacts::differ::differ::{Compare, Differ};
pub use artifacts::differ::restore::{Side, ndiff, restore};
pub use artifacts::html::html_diff::{HtmlDiff, TableOptions};
pub use artifacts::junk::{is_character_junk, is_line_junk};
pub use artifacts::matcher::close_matches::get_close_matches;
pub use artifacts::matcher::grouped_opcodes::GroupedOpcodes;
pub use artifacts::matcher::match_block::Match;
pub use artifacts::matcher::opcode::{Opcode, Tag};
pub use artifacts::matcher::sequence_matcher::SequenceMatcher;
pub use artifacts::text::content::Content;
pub use artifacts::text::diff_options::DiffOptions;
pub use artifacts::text::diff_text::{DiffFormat, DiffText, context_diff, unified_diff};
pub use artifacts::text::request::{ByteDiff, DiffRequest, diff_bytes};
