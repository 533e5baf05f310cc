//! gotags: ctags-compatible tag files for Go
//!
//! This library indexes Go source files and produces a sorted tag file that
//! editors use to jump to definitions. It uses tree-sitter for parsing and
//! emits one tag per package-level declaration, plus struct fields and
//! interface methods.
//!
//! # Example
//!
//! ```ignore
//! use gotags::{extract, parse_source};
//!
//! let source = "package calc\n\nfunc Add(a, b int) int { return a + b }\n";
//! let file = parse_source("calc.go", source)?;
//!
//! for tag in extract(&file, "calc.go") {
//!     println!("{}", tag);
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod indexing;
pub mod logging;
pub mod syntax;
pub mod tag;

// Re-export commonly used types
pub use cli::Cli;
pub use config::{ProgramInfo, TagOptions};
pub use error::{GoTagsError, Result};
pub use extract::{extract, extract_with_package};
pub use indexing::{TagCollector, TagOutput};
pub use syntax::{parse_file, parse_source, Decl, SourceFile};
pub use tag::{Access, Scope, Tag, TagKind};
