//! Common test utilities and fixtures for gotags integration tests
//!
//! This module provides:
//! - `TestRepo` builder for laying out Go sources in a temporary directory
//! - Helpers for splitting tag lines into their fields

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary directory of Go source files
pub struct TestRepo {
    dir: TempDir,
}

impl TestRepo {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    /// Write `contents` to `relative`, creating parent directories.
    pub fn with_file(self, relative: &str, contents: &str) -> Self {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dirs");
        }
        fs::write(&path, contents).expect("write source file");
        self
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    /// Path of `relative` as the string passed to the indexer
    pub fn file(&self, relative: &str) -> String {
        self.path(relative).display().to_string()
    }
}

/// Tag line split into name, file, pattern, kind and extension fields
#[derive(Debug)]
pub struct ParsedLine<'a> {
    pub name: &'a str,
    pub file: &'a str,
    pub pattern: &'a str,
    pub kind: &'a str,
    pub fields: Vec<&'a str>,
}

impl<'a> ParsedLine<'a> {
    pub fn field(&self, key: &str) -> Option<&'a str> {
        self.fields.iter().find_map(|f| {
            f.strip_prefix(key)
                .and_then(|rest| rest.strip_prefix(':'))
        })
    }
}

pub fn parse_line(line: &str) -> ParsedLine<'_> {
    let (head, rest) = line
        .split_once(";\"\t")
        .unwrap_or_else(|| panic!("not a tag line: {:?}", line));
    let mut head_parts = head.splitn(3, '\t');
    let name = head_parts.next().expect("name");
    let file = head_parts.next().expect("file");
    let pattern = head_parts.next().expect("pattern");

    let mut rest_parts = rest.split('\t');
    let kind = rest_parts.next().expect("kind");
    ParsedLine {
        name,
        file,
        pattern,
        kind,
        fields: rest_parts.collect(),
    }
}
