//! Declaration tree for one Go source file
//!
//! The parser lowers tree-sitter's concrete syntax tree into this small,
//! closed model so that the tag extractor can match on declaration shapes
//! exhaustively. Only package-scope declarations and the members of
//! composite types are represented; function bodies are never lowered.

mod parser;

pub use parser::{parse_file, parse_source, GoParser};

/// An identifier together with the 1-based line of its token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub name: String,
    pub line: usize,
}

impl Ident {
    pub fn new(name: impl Into<String>, line: usize) -> Self {
        Self {
            name: name.into(),
            line,
        }
    }

    /// `_` introduces no binding and never produces a tag.
    pub fn is_blank(&self) -> bool {
        self.name == "_"
    }
}

/// One parsed source file
#[derive(Debug, Clone, Default)]
pub struct SourceFile {
    /// Package clause name, if present
    pub package: Option<Ident>,
    /// Top-level declarations in source order
    pub decls: Vec<Decl>,
    /// Raw source lines, used to build search patterns
    pub lines: Vec<String>,
}

impl SourceFile {
    /// Text of the given 1-based line without its line terminator.
    pub fn line_text(&self, line: usize) -> &str {
        line.checked_sub(1)
            .and_then(|idx| self.lines.get(idx))
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// A top-level declaration
#[derive(Debug, Clone)]
pub enum Decl {
    /// `func Name(...)` or `func (r T) Name(...)`
    Func(FuncDecl),
    /// `type Name ...`, possibly grouped
    Type(Vec<TypeSpec>),
    /// `const ...`, possibly grouped
    Const(Vec<ValueSpec>),
    /// `var ...`, possibly grouped
    Var(Vec<ValueSpec>),
    /// `import ...`, possibly grouped
    Import(Vec<ImportSpec>),
    /// A top-level node with no known declaration shape
    Unsupported { kind: String, line: usize },
}

#[derive(Debug, Clone)]
pub struct FuncDecl {
    pub name: Ident,
    pub receiver: Option<Receiver>,
    pub signature: Signature,
}

/// Method receiver: the base type name plus whether it is taken by pointer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receiver {
    pub type_name: String,
    pub pointer: bool,
}

/// Callable signature reduced to type text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signature {
    /// Type parameter list as written, e.g. `[T any]`
    pub type_params: Option<String>,
    /// One entry per declared parameter, variadics keep their `...`
    pub params: Vec<String>,
    pub results: Results,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Results {
    #[default]
    None,
    /// A single unparenthesised result type
    Single(String),
    /// A parenthesised result list, one entry per declared result
    List(Vec<String>),
}

impl Signature {
    /// Compact rendering: `[T any](int, ...string) (int, error)`
    pub fn render(&self) -> String {
        let mut out = String::new();
        if let Some(tp) = &self.type_params {
            out.push_str(tp);
        }
        out.push('(');
        out.push_str(&self.params.join(", "));
        out.push(')');
        match &self.results {
            Results::None => {}
            Results::Single(ty) => {
                out.push(' ');
                out.push_str(ty);
            }
            Results::List(types) => {
                out.push_str(" (");
                out.push_str(&types.join(", "));
                out.push(')');
            }
        }
        out
    }
}

#[derive(Debug, Clone)]
pub struct TypeSpec {
    pub name: Ident,
    pub shape: TypeShape,
}

/// Underlying shape of a declared type
#[derive(Debug, Clone)]
pub enum TypeShape {
    Struct(Vec<Field>),
    Interface(Vec<Ident>),
    /// Aliases and types defined over anything that is not a struct or interface
    Other,
}

/// A struct field; embedded fields are named after the embedded type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: Ident,
}

/// Names introduced by one `const` or `var` spec
#[derive(Debug, Clone)]
pub struct ValueSpec {
    pub names: Vec<Ident>,
}

#[derive(Debug, Clone)]
pub struct ImportSpec {
    pub path: String,
    pub alias: Option<String>,
    pub line: usize,
}
