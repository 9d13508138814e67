//! Line differ with intraline hints
//!
//! `Differ` aligns two line sequences with the sequence matcher and, inside
//! every replaced block, pairs up the most similar lines so that the
//! differences between them can be marked with `?` guide lines. `restore`
//! reads either input back out of such a delta.

#[allow(clippy::module_inception)]
pub mod differ;
pub mod restore;
