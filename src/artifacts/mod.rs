//! Matching engine and diff renderers
//!
//! This module contains the library side of the crate:
//!
//! - `core`: Shared utilities (errors, pager wrapper)
//! - `junk`: Junk predicates for lines and characters
//! - `matcher`: The sequence matcher, opcodes, grouping and close matches
//! - `text`: Unified and context diff text, with the byte adapter
//! - `differ`: Line differ with intraline hints (ndiff) and delta restore
//! - `html`: Side-by-side HTML table and document rendering

pub mod core;
pub mod differ;
pub mod html;
pub mod junk;
pub mod matcher;
pub mod text;
