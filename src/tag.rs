//! Tag records and their ctags line format
//!
//! A [`Tag`] serializes to one tab-separated line:
//!
//! ```text
//! name<TAB>file<TAB>/^source line$/;"<TAB>kind<TAB>line:N<TAB>field:value...
//! ```
//!
//! Extension fields always follow the same order: `line`, `access`, the
//! parent scope (`struct:` or `interface:`), `receiver`, `signature`.

use std::fmt;

use crate::syntax::Receiver;

/// Declaration category of a tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    Package,
    Import,
    Constant,
    Variable,
    Function,
    Method,
    Struct,
    Interface,
    /// Aliases and types defined over non-composite types
    Type,
    Field,
    InterfaceMethod,
}

impl TagKind {
    /// Single-letter kind written in the tag line
    pub fn letter(&self) -> char {
        match self {
            Self::Package => 'p',
            Self::Import => 'i',
            Self::Constant => 'c',
            Self::Variable => 'v',
            Self::Function => 'f',
            Self::Method => 'm',
            Self::Struct => 's',
            Self::Interface => 'n',
            Self::Type => 't',
            Self::Field => 'w',
            Self::InterfaceMethod => 'a',
        }
    }

    /// Whether tags of this kind carry an `access:` field
    fn has_access(&self) -> bool {
        !matches!(self, Self::Package | Self::Import)
    }
}

/// Exported/unexported visibility, derived from identifier casing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Private,
}

impl Access {
    /// An identifier is exported iff its first character is an uppercase letter.
    pub fn of(name: &str) -> Self {
        match name.chars().next() {
            Some(c) if c.is_uppercase() => Self::Public,
            _ => Self::Private,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
        }
    }
}

/// Enclosing type of a field or interface method
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    Struct(String),
    Interface(String),
}

impl Scope {
    pub fn parent(&self) -> &str {
        match self {
            Self::Struct(name) | Self::Interface(name) => name,
        }
    }
}

/// One reference to one declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub file: String,
    pub line: usize,
    /// Text of the defining source line, turned into the search pattern
    pub source_line: String,
    pub kind: TagKind,
    pub scope: Option<Scope>,
    pub receiver: Option<Receiver>,
    pub signature: Option<String>,
}

impl Tag {
    /// Build a tag with no scope, receiver or signature.
    pub fn new(
        name: impl Into<String>,
        file: impl Into<String>,
        line: usize,
        source_line: impl Into<String>,
        kind: TagKind,
    ) -> Self {
        let tag = Self {
            name: name.into(),
            file: file.into(),
            line,
            source_line: source_line.into(),
            kind,
            scope: None,
            receiver: None,
            signature: None,
        };
        debug_assert!(!tag.name.is_empty(), "tag name must not be empty");
        debug_assert!(tag.line > 0, "tag line is 1-based");
        tag
    }

    pub fn with_scope(mut self, scope: Scope) -> Self {
        debug_assert!(
            matches!(self.kind, TagKind::Field | TagKind::InterfaceMethod),
            "only members carry a parent scope"
        );
        debug_assert!(!scope.parent().is_empty(), "member parent must not be empty");
        self.scope = Some(scope);
        self
    }

    pub fn with_receiver(mut self, receiver: Receiver) -> Self {
        debug_assert_eq!(self.kind, TagKind::Method, "only methods have receivers");
        debug_assert!(!receiver.type_name.is_empty(), "receiver must not be empty");
        self.receiver = Some(receiver);
        self
    }

    pub fn with_signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = Some(signature.into());
        self
    }

    pub fn access(&self) -> Access {
        Access::of(&self.name)
    }

    /// Line-anchored search pattern, e.g. `/^func Add(a, b int) int {$/`
    pub fn search_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.source_line.len() + 4);
        pattern.push_str("/^");
        for c in self.source_line.trim_end_matches('\r').chars() {
            match c {
                '\\' => pattern.push_str("\\\\"),
                '/' => pattern.push_str("\\/"),
                '\n' | '\r' => pattern.push(' '),
                _ => pattern.push(c),
            }
        }
        pattern.push_str("$/");
        pattern
    }

    /// Serialize into one tag-file line.
    pub fn serialize(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{};\"\t{}\tline:{}",
            self.name,
            self.file,
            self.search_pattern(),
            self.kind.letter(),
            self.line
        )?;

        if self.kind.has_access() {
            write!(f, "\taccess:{}", self.access().as_str())?;
        }

        match &self.scope {
            Some(Scope::Struct(parent)) => write!(f, "\tstruct:{}", parent)?,
            Some(Scope::Interface(parent)) => write!(f, "\tinterface:{}", parent)?,
            None => {}
        }

        if let Some(receiver) = &self.receiver {
            let star = if receiver.pointer { "*" } else { "" };
            write!(f, "\treceiver:{}{}", star, receiver.type_name)?;
        }

        if let Some(signature) = &self.signature {
            write!(f, "\tsignature:{}", signature)?;
        }

        Ok(())
    }
}
