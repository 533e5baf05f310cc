//! Tag collection across input files
//!
//! Files are parsed and visited in parallel with Rayon; results are merged
//! back in input order so the output is the same as a sequential run. The
//! collector then serializes the tags, optionally sorts them, and puts the
//! `!_TAG_` meta-lines in front.

use rayon::prelude::*;
use tracing::debug;

use crate::config::{ProgramInfo, TagOptions};
use crate::error::{GoTagsError, Result};
use crate::extract::{extract, extract_with_package};
use crate::syntax::{parse_file, parse_source, SourceFile};
use crate::tag::Tag;

/// Number of `!_TAG_` meta-lines at the start of every tag file
pub const META_LINE_COUNT: usize = 6;

/// Tags and per-file failures gathered from a set of files
#[derive(Debug, Default)]
pub struct IndexGenerationResult {
    /// Tags in file order, then declaration order within each file
    pub tags: Vec<Tag>,
    /// Per-file errors in file order
    pub errors: Vec<GoTagsError>,
    pub files_indexed: usize,
}

fn tags_for(file: &SourceFile, name: &str, package_tags: bool) -> Vec<Tag> {
    if package_tags {
        extract_with_package(file, name)
    } else {
        extract(file, name)
    }
}

/// Parse and extract one file from disk.
pub fn index_file(path: &str, package_tags: bool) -> Result<Vec<Tag>> {
    let file = parse_file(path)?;
    Ok(tags_for(&file, path, package_tags))
}

/// Parse and extract in-memory source text recorded under `name`.
pub fn index_source(name: &str, source: &str, package_tags: bool) -> Result<Vec<Tag>> {
    let file = parse_source(name, source)?;
    Ok(tags_for(&file, name, package_tags))
}

/// Index files in parallel, keeping input order in the merged result.
///
/// A file that fails to read or parse contributes no tags; its error is
/// recorded and the remaining files are still indexed.
pub fn analyze_files_parallel(files: &[String], package_tags: bool) -> IndexGenerationResult {
    let per_file: Vec<Result<Vec<Tag>>> = files
        .par_iter()
        .map(|path| index_file(path, package_tags))
        .collect();

    let mut result = IndexGenerationResult::default();
    for (path, outcome) in files.iter().zip(per_file) {
        merge_outcome(&mut result, path, outcome);
    }
    result
}

fn merge_outcome(result: &mut IndexGenerationResult, name: &str, outcome: Result<Vec<Tag>>) {
    match outcome {
        Ok(tags) => {
            debug!(file = name, tags = tags.len(), "indexed file");
            result.files_indexed += 1;
            result.tags.extend(tags);
        }
        Err(e) => {
            debug!(file = name, error = %e, "skipping file");
            result.errors.push(e);
        }
    }
}

/// Sort serialized tag lines bytewise; equal lines keep their relative order.
pub fn sort_tag_lines(lines: &mut [String]) {
    lines.sort();
}

/// Formatted output of one run
#[derive(Debug)]
pub struct TagOutput {
    /// Meta-lines followed by tag lines
    pub lines: Vec<String>,
    pub errors: Vec<GoTagsError>,
    silent: bool,
}

impl TagOutput {
    /// The tag lines without the leading meta-lines
    pub fn tag_lines(&self) -> &[String] {
        &self.lines[META_LINE_COUNT.min(self.lines.len())..]
    }

    /// User-facing diagnostics; empty in silent mode.
    ///
    /// Read and parse failures are reported as parse errors of their file.
    pub fn diagnostics(&self) -> Vec<String> {
        if self.silent {
            return Vec::new();
        }
        self.errors
            .iter()
            .map(|e| {
                if e.is_per_file() {
                    format!("parse error: {}", e)
                } else {
                    e.to_string()
                }
            })
            .collect()
    }
}

/// Collects tags from input files and renders the tag file
#[derive(Debug, Clone)]
pub struct TagCollector {
    options: TagOptions,
    program: ProgramInfo,
}

impl TagCollector {
    pub fn new(options: TagOptions, program: ProgramInfo) -> Self {
        Self { options, program }
    }

    /// Index `files` and render the complete tag file.
    pub fn run(&self, files: &[String]) -> TagOutput {
        let result = analyze_files_parallel(files, self.options.package_tags);
        debug!(
            files = files.len(),
            indexed = result.files_indexed,
            failed = result.errors.len(),
            tags = result.tags.len(),
            "collected tags"
        );
        self.render(result)
    }

    /// Index one in-memory source and render the complete tag file.
    pub fn run_source(&self, name: &str, source: &str) -> TagOutput {
        let mut result = IndexGenerationResult::default();
        merge_outcome(
            &mut result,
            name,
            index_source(name, source, self.options.package_tags),
        );
        self.render(result)
    }

    /// Serialize, optionally sort, and prefix with the meta-lines.
    pub fn render(&self, result: IndexGenerationResult) -> TagOutput {
        let mut tag_lines: Vec<String> = result.tags.iter().map(Tag::serialize).collect();
        if self.options.sort {
            sort_tag_lines(&mut tag_lines);
        }

        let mut lines = self.meta_lines();
        lines.extend(tag_lines);

        TagOutput {
            lines,
            errors: result.errors,
            silent: self.options.silent,
        }
    }

    /// The six `!_TAG_` header lines, in their fixed order.
    pub fn meta_lines(&self) -> Vec<String> {
        let sorted = if self.options.sort { 1 } else { 0 };
        let info = &self.program;
        let author_email = if info.author_email.is_empty() {
            String::new()
        } else {
            format!("/{}/", info.author_email)
        };
        vec![
            "!_TAG_FILE_FORMAT\t2\t".to_string(),
            format!("!_TAG_FILE_SORTED\t{}\t/0=unsorted, 1=sorted/", sorted),
            format!("!_TAG_PROGRAM_AUTHOR\t{}\t{}", info.author_name, author_email),
            format!("!_TAG_PROGRAM_NAME\t{}\t", info.name),
            format!("!_TAG_PROGRAM_URL\t{}\t", info.url),
            format!("!_TAG_PROGRAM_VERSION\t{}\t", info.version),
        ]
    }
}
