//! Inputs of the command line front end
//!
//! - `source_file`: a file read from disk with its modification time
//! - `comparison`: the pair of files being compared and the output sink

pub mod comparison;
pub mod source_file;
