//! Core utilities and shared types
//!
//! This module contains the error type of the library and the pager adapter
//! used by the command line front end.

pub mod error;

use derive_new::new;
use minus::Pager;
use std::io::{self, Write};

/// Wrapper that implements `Write` for the minus pager
///
/// Diff output is not guaranteed to be UTF-8 (byte diffs pass foreign
/// encodings through untouched), while the pager only accepts `&str`. Invalid
/// sequences are shown with replacement characters on screen; the bytes
/// written to a plain stdout are never altered.
///
/// ## Usage
///
/// ```ignore
/// let pager = Pager::new();
/// let mut writer = PagerWriter::new(pager.clone());
/// writeln!(writer, "--- a.txt")?;
/// minus::page_all(pager)?;
/// ```
#[derive(new)]
pub struct PagerWriter {
    pager: Pager,
}

impl Write for PagerWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let s = String::from_utf8_lossy(buf);
        self.pager.push_str(s).map_err(io::Error::other)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
