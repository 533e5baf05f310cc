//! Input file gathering
//!
//! Source names come from the command line, from a `-L` list file (or
//! stdin), and, with recursion enabled, from walking directories for
//! `.go` files.

use std::fs;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::error::{GoTagsError, Result};

/// Read source names from `list`, one per line; `-` reads stdin.
pub fn read_file_list(list: &str) -> Result<Vec<String>> {
    let map_err = |e: io::Error| GoTagsError::FileList {
        message: format!("{}: {}", list, e),
    };

    if list == "-" {
        let stdin = io::stdin();
        return read_names(stdin.lock()).map_err(map_err);
    }

    let file = fs::File::open(list).map_err(map_err)?;
    read_names(BufReader::new(file)).map_err(map_err)
}

fn read_names(reader: impl BufRead) -> io::Result<Vec<String>> {
    let mut names = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if !line.is_empty() {
            names.push(line);
        }
    }
    Ok(names)
}

/// Expand the input names into source files.
///
/// With `recurse`, directories are replaced by the `.go` files beneath
/// them. Other names are passed through untouched, in order.
pub fn expand_inputs(names: &[String], recurse: bool) -> Vec<String> {
    let mut files = Vec::new();
    for name in names {
        let path = Path::new(name);
        if recurse && path.is_dir() {
            collect_go_files(path, &mut files);
        } else {
            files.push(name.clone());
        }
    }
    files
}

/// Recursively collect `.go` files below `dir`, sorted within each directory.
pub fn collect_go_files(dir: &Path, files: &mut Vec<String>) {
    let mut entries: Vec<_> = match fs::read_dir(dir) {
        Ok(entries) => entries.flatten().map(|e| e.path()).collect(),
        Err(_) => return,
    };
    entries.sort();

    for path in entries {
        if path.is_dir() {
            if !should_skip_dir(&path) {
                collect_go_files(&path, files);
            }
        } else if path.is_file() && path.extension().and_then(|e| e.to_str()) == Some("go") {
            files.push(path.display().to_string());
        }
    }
}

/// Directories the Go tool itself ignores: hidden, `_`-prefixed and `testdata`.
pub fn should_skip_dir(path: &Path) -> bool {
    match path.file_name().and_then(|n| n.to_str()) {
        Some(name) => name.starts_with('.') || name.starts_with('_') || name == "testdata",
        None => false,
    }
}
