//! File collection and tag generation
//!
//! This module turns a list of input names into a finished tag file:
//!
//! - **File gathering**: command-line names, `-L` lists and `-R` recursion
//! - **Parallel indexing**: Rayon per-file parsing with an order-preserving merge
//! - **Error handling**: a file that fails to parse is reported and skipped
//!
//! # Example
//!
//! ```ignore
//! use gotags::indexing::TagCollector;
//! use gotags::{ProgramInfo, TagOptions};
//!
//! let collector = TagCollector::new(TagOptions::default(), ProgramInfo::default());
//! let output = collector.run(&["main.go".to_string()]);
//! for line in &output.lines {
//!     println!("{}", line);
//! }
//! ```

mod files;
mod generation;

pub use files::{collect_go_files, expand_inputs, read_file_list, should_skip_dir};
pub use generation::{
    analyze_files_parallel, index_file, index_source, sort_tag_lines, IndexGenerationResult,
    TagCollector, TagOutput, META_LINE_COUNT,
};
