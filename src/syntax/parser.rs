//! tree-sitter backed parser for Go sources
//!
//! Parses source text with the tree-sitter Go grammar and lowers the
//! package-level part of the concrete syntax tree into [`SourceFile`].
//! A tree that contains any ERROR or MISSING node, or that does not open
//! with a package clause, is rejected as a whole.

use std::fs;

use tree_sitter::{Language, Node, Parser, Tree};

use super::{
    Decl, Field, FuncDecl, Ident, ImportSpec, Receiver, Results, Signature, SourceFile, TypeShape,
    TypeSpec, ValueSpec,
};
use crate::error::{GoTagsError, Result};

/// A reusable tree-sitter parser configured for Go
pub struct GoParser {
    parser: Parser,
}

impl GoParser {
    pub fn new() -> Result<Self> {
        let language: Language = tree_sitter_go::LANGUAGE.into();
        let mut parser = Parser::new();
        parser
            .set_language(&language)
            .map_err(|e| GoTagsError::Grammar {
                message: format!("{:?}", e),
            })?;
        Ok(Self { parser })
    }

    /// Parse `source` into a tree-sitter tree, keeping any error nodes.
    pub fn syntax_tree(&mut self, path: &str, source: &str) -> Result<Tree> {
        self.parser
            .parse(source, None)
            .ok_or_else(|| GoTagsError::Parse {
                path: path.to_string(),
                line: 1,
                column: 1,
                message: "parser produced no tree".to_string(),
            })
    }

    /// Parse `source` into a tree-sitter tree, failing on syntax errors.
    pub fn parse_tree(&mut self, path: &str, source: &str) -> Result<Tree> {
        let tree = self.syntax_tree(path, source)?;

        if let Some(node) = first_error(&tree.root_node()) {
            let pos = node.start_position();
            let message = if node.is_missing() {
                format!("expected {}", node.kind())
            } else {
                "syntax error".to_string()
            };
            return Err(GoTagsError::Parse {
                path: path.to_string(),
                line: pos.row + 1,
                column: pos.column + 1,
                message,
            });
        }

        if let Some((line, column, found)) = missing_package_clause(&tree.root_node()) {
            return Err(GoTagsError::Parse {
                path: path.to_string(),
                line,
                column,
                message: format!("expected 'package', found '{}'", found),
            });
        }

        Ok(tree)
    }

    /// Parse and lower `source` into the declaration tree.
    pub fn parse(&mut self, path: &str, source: &str) -> Result<SourceFile> {
        let tree = self.parse_tree(path, source)?;
        Ok(lower_source_file(&tree.root_node(), source))
    }
}

/// Parse in-memory Go source text
pub fn parse_source(path: &str, source: &str) -> Result<SourceFile> {
    GoParser::new()?.parse(path, source)
}

/// Read and parse a Go source file
pub fn parse_file(path: &str) -> Result<SourceFile> {
    let source = fs::read_to_string(path).map_err(|source| GoTagsError::Read {
        path: path.to_string(),
        source,
    })?;
    parse_source(path, &source)
}

/// Depth-first search for the first ERROR or MISSING node
fn first_error<'t>(node: &Node<'t>) -> Option<Node<'t>> {
    if !node.has_error() {
        return None;
    }
    if node.is_error() || node.is_missing() {
        return Some(*node);
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(found) = first_error(&child) {
            return Some(found);
        }
    }
    Some(*node)
}

/// Position and leading token of the first node when the file does not open
/// with a package clause. An empty file reports `EOF` at 1:1.
fn missing_package_clause(root: &Node) -> Option<(usize, usize, String)> {
    let mut cursor = root.walk();
    let first = root
        .named_children(&mut cursor)
        .find(|n| n.kind() != "comment");
    match first {
        Some(node) if node.kind() == "package_clause" => None,
        Some(node) => {
            let pos = node.start_position();
            let found = node.child(0).map_or(node.kind(), |token| token.kind());
            Some((pos.row + 1, pos.column + 1, found.to_string()))
        }
        None => Some((1, 1, "EOF".to_string())),
    }
}

// ============================================================================
// Lowering
// ============================================================================

fn lower_source_file(root: &Node, source: &str) -> SourceFile {
    let mut file = SourceFile {
        lines: source.lines().map(str::to_string).collect(),
        ..Default::default()
    };

    let mut cursor = root.walk();
    for child in root.named_children(&mut cursor) {
        match child.kind() {
            "package_clause" => {
                file.package = first_named_of_kind(&child, "package_identifier")
                    .and_then(|n| ident(&n, source));
            }
            "comment" => {}
            _ => file.decls.push(lower_decl(&child, source)),
        }
    }

    file
}

fn lower_decl(node: &Node, source: &str) -> Decl {
    let lowered = match node.kind() {
        "function_declaration" | "method_declaration" => lower_func(node, source).map(Decl::Func),
        "type_declaration" => Some(Decl::Type(
            specs(node, &["type_spec", "type_alias"])
                .iter()
                .filter_map(|spec| lower_type_spec(spec, source))
                .collect(),
        )),
        "const_declaration" => Some(Decl::Const(
            specs(node, &["const_spec"])
                .iter()
                .map(|spec| lower_value_spec(spec, source))
                .collect(),
        )),
        "var_declaration" => Some(Decl::Var(
            specs(node, &["var_spec"])
                .iter()
                .map(|spec| lower_value_spec(spec, source))
                .collect(),
        )),
        "import_declaration" => Some(Decl::Import(
            specs(node, &["import_spec"])
                .iter()
                .filter_map(|spec| lower_import_spec(spec, source))
                .collect(),
        )),
        _ => None,
    };

    lowered.unwrap_or_else(|| Decl::Unsupported {
        kind: node.kind().to_string(),
        line: line_of(node),
    })
}

/// Specs of a declaration, looking through grouped `( ... )` list nodes
fn specs<'t>(node: &Node<'t>, kinds: &[&str]) -> Vec<Node<'t>> {
    let mut out = Vec::new();
    collect_specs(node, kinds, &mut out);
    out
}

fn collect_specs<'t>(node: &Node<'t>, kinds: &[&str], out: &mut Vec<Node<'t>>) {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if kinds.contains(&child.kind()) {
            out.push(child);
        } else if child.kind().ends_with("_spec_list") {
            collect_specs(&child, kinds, out);
        }
    }
}

fn lower_func(node: &Node, source: &str) -> Option<FuncDecl> {
    let name = ident(&node.child_by_field_name("name")?, source)?;

    let receiver = match node.child_by_field_name("receiver") {
        Some(list) => Some(lower_receiver(&list, source)?),
        None if node.kind() == "method_declaration" => return None,
        None => None,
    };

    let signature = Signature {
        type_params: node
            .child_by_field_name("type_parameters")
            .map(|tp| compact(text(&tp, source))),
        params: node
            .child_by_field_name("parameters")
            .map(|params| param_types(&params, source))
            .unwrap_or_default(),
        results: lower_results(node.child_by_field_name("result"), source),
    };

    Some(FuncDecl {
        name,
        receiver,
        signature,
    })
}

fn lower_receiver(list: &Node, source: &str) -> Option<Receiver> {
    let param = first_named_of_kind(list, "parameter_declaration")?;
    receiver_type(&param.child_by_field_name("type")?, source)
}

/// Resolve `T`, `*T`, `T[K]` and `*T[K]` to the receiver's base type name
fn receiver_type(node: &Node, source: &str) -> Option<Receiver> {
    match node.kind() {
        "type_identifier" => Some(Receiver {
            type_name: text(node, source).to_string(),
            pointer: false,
        }),
        "pointer_type" => {
            let inner = receiver_type(&node.named_child(0)?, source)?;
            Some(Receiver {
                pointer: true,
                ..inner
            })
        }
        "generic_type" => receiver_type(&node.child_by_field_name("type")?, source),
        "parenthesized_type" => receiver_type(&node.named_child(0)?, source),
        _ => None,
    }
}

/// Parameter types in order, repeated once per declared name
fn param_types(list: &Node, source: &str) -> Vec<String> {
    let mut types = Vec::new();
    let mut cursor = list.walk();
    for param in list.named_children(&mut cursor) {
        let Some(ty) = param.child_by_field_name("type") else {
            continue;
        };
        let ty = compact(text(&ty, source));
        match param.kind() {
            "parameter_declaration" => {
                let mut names_cursor = param.walk();
                let names = param
                    .children_by_field_name("name", &mut names_cursor)
                    .filter(|n| n.kind() == "identifier")
                    .count();
                for _ in 0..names.max(1) {
                    types.push(ty.clone());
                }
            }
            "variadic_parameter_declaration" => types.push(format!("...{}", ty)),
            _ => {}
        }
    }
    types
}

fn lower_results(result: Option<Node>, source: &str) -> Results {
    match result {
        None => Results::None,
        Some(list) if list.kind() == "parameter_list" => Results::List(param_types(&list, source)),
        Some(ty) => Results::Single(compact(text(&ty, source))),
    }
}

fn lower_type_spec(spec: &Node, source: &str) -> Option<TypeSpec> {
    let name = ident(&spec.child_by_field_name("name")?, source)?;
    let shape = match (spec.kind(), spec.child_by_field_name("type")) {
        ("type_spec", Some(ty)) => lower_shape(&ty, source),
        _ => TypeShape::Other,
    };
    Some(TypeSpec { name, shape })
}

fn lower_shape(ty: &Node, source: &str) -> TypeShape {
    match ty.kind() {
        "struct_type" => TypeShape::Struct(
            first_named_of_kind(ty, "field_declaration_list")
                .map(|list| struct_fields(&list, source))
                .unwrap_or_default(),
        ),
        "interface_type" => TypeShape::Interface(interface_methods(ty, source)),
        _ => TypeShape::Other,
    }
}

fn struct_fields(list: &Node, source: &str) -> Vec<Field> {
    let mut fields = Vec::new();
    let mut cursor = list.walk();
    for decl in list.named_children(&mut cursor) {
        if decl.kind() != "field_declaration" {
            continue;
        }

        let mut names_cursor = decl.walk();
        let names: Vec<Ident> = decl
            .children_by_field_name("name", &mut names_cursor)
            .filter(|n| n.kind() == "field_identifier")
            .filter_map(|n| ident(&n, source))
            .collect();

        if names.is_empty() {
            let embedded = decl
                .child_by_field_name("type")
                .and_then(|ty| embedded_name(&ty, source));
            if let Some(name) = embedded {
                fields.push(Field {
                    name: Ident::new(name, line_of(&decl)),
                });
            }
        } else {
            fields.extend(names.into_iter().map(|name| Field { name }));
        }
    }
    fields
}

/// Field name of an embedded type: `T`, `*T`, `pkg.T` and `T[K]` all yield `T`
fn embedded_name(ty: &Node, source: &str) -> Option<String> {
    match ty.kind() {
        "type_identifier" => Some(text(ty, source).to_string()),
        "qualified_type" => embedded_name(&ty.child_by_field_name("name")?, source),
        "generic_type" => embedded_name(&ty.child_by_field_name("type")?, source),
        "pointer_type" => embedded_name(&ty.named_child(0)?, source),
        _ => None,
    }
}

fn interface_methods(iface: &Node, source: &str) -> Vec<Ident> {
    let mut methods = Vec::new();
    let mut cursor = iface.walk();
    for member in iface.named_children(&mut cursor) {
        if matches!(member.kind(), "method_elem" | "method_spec") {
            if let Some(name) = member
                .child_by_field_name("name")
                .and_then(|n| ident(&n, source))
            {
                methods.push(name);
            }
        }
    }
    methods
}

fn lower_value_spec(spec: &Node, source: &str) -> ValueSpec {
    let mut cursor = spec.walk();
    let names = spec
        .children_by_field_name("name", &mut cursor)
        .filter(|n| n.kind() == "identifier")
        .filter_map(|n| ident(&n, source))
        .collect();
    ValueSpec { names }
}

fn lower_import_spec(spec: &Node, source: &str) -> Option<ImportSpec> {
    let path = spec.child_by_field_name("path")?;
    Some(ImportSpec {
        path: text(&path, source).trim_matches(|c| c == '"' || c == '`').to_string(),
        alias: spec
            .child_by_field_name("name")
            .map(|n| text(&n, source).to_string()),
        line: line_of(spec),
    })
}

// ============================================================================
// Utility functions
// ============================================================================

fn text<'s>(node: &Node, source: &'s str) -> &'s str {
    node.utf8_text(source.as_bytes()).unwrap_or("")
}

fn line_of(node: &Node) -> usize {
    node.start_position().row + 1
}

fn ident(node: &Node, source: &str) -> Option<Ident> {
    let name = text(node, source);
    if name.is_empty() {
        None
    } else {
        Some(Ident::new(name, line_of(node)))
    }
}

fn first_named_of_kind<'t>(node: &Node<'t>, kind: &str) -> Option<Node<'t>> {
    let mut cursor = node.walk();
    let found = node.named_children(&mut cursor).find(|c| c.kind() == kind);
    found
}

/// Collapse runs of whitespace so multi-line type text fits on one tag line
fn compact(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
