#![allow(dead_code)]

use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::prelude::{FileWriteBin, FileWriteStr, PathChild};
use fake::Fake;
use fake::faker::lorem::en::Words;
use rstest::fixture;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct FileSpec {
    pub name: String,
    pub content: Vec<u8>,
}

impl FileSpec {
    pub fn new(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        FileSpec {
            name: name.into(),
            content: content.into(),
        }
    }
}

#[fixture]
pub fn workspace_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// `count` lines of lorem words, each line unique and newline terminated.
#[fixture]
pub fn lorem_lines(#[default(12)] count: usize) -> Vec<String> {
    (0..count)
        .map(|index| {
            let words: Vec<String> = Words(3..6).fake();
            format!("{index}: {}\n", words.join(" "))
        })
        .collect()
}

pub fn write_file(dir: &TempDir, file_spec: FileSpec) -> PathBuf {
    let file = dir.child(&file_spec.name);
    match std::str::from_utf8(&file_spec.content) {
        Ok(text) => file.write_str(text),
        Err(_) => file.write_binary(&file_spec.content),
    }
    .expect("Failed to write file");

    file.path().to_path_buf()
}

pub fn run_seqdiff_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("seqdiff").expect("Failed to find seqdiff binary");
    cmd.current_dir(dir).env("NO_PAGER", "1").args(args);
    cmd
}
