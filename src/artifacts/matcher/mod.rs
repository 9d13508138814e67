//! Sequence matching
//!
//! - `sequence_matcher`: longest match search, matching blocks, opcodes, ratios
//! - `match_block`: the `Match` triple
//! - `opcode`: edit operations derived from matching blocks
//! - `grouped_opcodes`: opcodes grouped into hunks with context
//! - `close_matches`: best fuzzy matches of a word among candidates

pub mod close_matches;
pub mod grouped_opcodes;
pub mod match_block;
pub mod opcode;
pub mod sequence_matcher;
