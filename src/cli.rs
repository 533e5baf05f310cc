//! CLI argument definitions using clap

use clap::{ArgAction, Parser};

use crate::config::TagOptions;

/// ctags-compatible tag generator for Go sources
#[derive(Parser, Debug)]
#[command(name = "gotags")]
#[command(about = "Generate a ctags-compatible tag file for Go source files")]
#[command(override_usage = "gotags [options] file(s)")]
#[command(disable_version_flag = true)]
pub struct Cli {
    /// Go source files (directories with -R)
    #[arg(value_name = "FILE")]
    pub files: Vec<String>,

    /// Print version
    #[arg(short = 'v', long = "version")]
    pub print_version: bool,

    /// Source file names are read from the specified file ("-" for stdin)
    #[arg(short = 'L', value_name = "LIST")]
    pub input_list: Option<String>,

    /// Sort tags
    #[arg(long, default_value_t = true, action = ArgAction::Set, value_name = "BOOL")]
    pub sort: bool,

    /// Do not produce any output on error
    #[arg(long, env = "GOTAGS_SILENT")]
    pub silent: bool,

    /// Print syntax tree of the first file (debugging)
    #[arg(long)]
    pub tree: bool,

    /// Read source from stdin
    #[arg(long)]
    pub stdin: bool,

    /// Recurse into directories given on the command line
    #[arg(short = 'R')]
    pub recurse: bool,

    /// Write output to the specified file ("-" for stdout)
    #[arg(short = 'f', value_name = "FILE", default_value = "-")]
    pub output: String,

    /// Emit a tag for each file's package clause
    #[arg(long)]
    pub package: bool,

    /// Log progress to stderr
    #[arg(long)]
    pub verbose: bool,
}

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Collector options selected by these arguments
    pub fn tag_options(&self) -> TagOptions {
        TagOptions {
            sort: self.sort,
            silent: self.silent,
            package_tags: self.package,
        }
    }
}
