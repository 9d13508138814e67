//! Line oriented text diffs
//!
//! `diff_text` renders unified and context diffs from grouped opcodes,
//! `diff_options` holds the header settings both formats share, and
//! `request` checks run time text/bytes arguments before handing them to the
//! renderers. `content` defines that text/bytes value and the lossless byte
//! mapping used for byte diffs.

pub mod content;
pub mod diff_options;
pub mod diff_text;
pub mod request;
