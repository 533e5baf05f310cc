//! Run configuration and program identification

/// Program identification written into the `!_TAG_PROGRAM_*` meta-lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramInfo {
    pub name: String,
    pub version: String,
    pub author_name: String,
    pub author_email: String,
    pub url: String,
}

impl ProgramInfo {
    /// Split a Cargo-style `Name <email>` author string.
    fn split_author(author: &str) -> (String, String) {
        match author.split_once('<') {
            Some((name, rest)) => (
                name.trim().to_string(),
                rest.trim_end_matches('>').trim().to_string(),
            ),
            None => (author.trim().to_string(), String::new()),
        }
    }
}

impl Default for ProgramInfo {
    /// Identification taken from this package's Cargo metadata
    fn default() -> Self {
        let first_author = env!("CARGO_PKG_AUTHORS").split(':').next().unwrap_or("");
        let (author_name, author_email) = Self::split_author(first_author);
        Self {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            author_name,
            author_email,
            url: env!("CARGO_PKG_REPOSITORY").to_string(),
        }
    }
}

/// Options consulted by the collector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagOptions {
    /// Sort tag lines by their full text
    pub sort: bool,
    /// Suppress per-file parse diagnostics
    pub silent: bool,
    /// Emit a tag for each file's package clause
    pub package_tags: bool,
}

impl Default for TagOptions {
    fn default() -> Self {
        Self {
            sort: true,
            silent: false,
            package_tags: false,
        }
    }
}
