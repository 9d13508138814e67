//! Side by side HTML diffs
//!
//! `HtmlDiff` turns an ndiff of two files into an XHTML table (or a complete
//! document) with intraline highlights and change navigation links.
//!
//! Rendering happens in stages: tabs are expanded, `line_pairs` aligns the
//! delta into rows and optionally keeps only the context around changes, long
//! lines are wrapped, and finally every row is escaped and laid out with the
//! markup from `templates`. `charset` resolves the declared document encoding.

mod charset;
pub mod html_diff;
mod line_pairs;
mod templates;
