//! Declaration visitor
//!
//! Walks a lowered [`SourceFile`] and produces the tags for every package-level
//! declaration plus the members of struct and interface types. Function bodies
//! are never visited, so local declarations produce no tags.

use tracing::trace;

use crate::syntax::{Decl, FuncDecl, Ident, SourceFile, TypeShape, TypeSpec, ValueSpec};
use crate::tag::{Scope, Tag, TagKind};

/// Extract tags from one file's declaration tree.
///
/// `filename` is written into each tag verbatim.
pub fn extract(file: &SourceFile, filename: &str) -> Vec<Tag> {
    Extractor::new(file, filename, false).run()
}

/// Like [`extract`], also emitting a tag for the package clause.
pub fn extract_with_package(file: &SourceFile, filename: &str) -> Vec<Tag> {
    Extractor::new(file, filename, true).run()
}

struct Extractor<'a> {
    file: &'a SourceFile,
    filename: &'a str,
    package_tags: bool,
    tags: Vec<Tag>,
}

impl<'a> Extractor<'a> {
    fn new(file: &'a SourceFile, filename: &'a str, package_tags: bool) -> Self {
        Self {
            file,
            filename,
            package_tags,
            tags: Vec::new(),
        }
    }

    fn run(mut self) -> Vec<Tag> {
        let file = self.file;
        if self.package_tags {
            if let Some(package) = &file.package {
                let tag = self.tag(package, TagKind::Package);
                self.tags.push(tag);
            }
        }

        for decl in &file.decls {
            self.visit(decl);
        }

        self.tags
    }

    fn visit(&mut self, decl: &Decl) {
        match decl {
            Decl::Func(func) => self.visit_func(func),
            Decl::Type(specs) => {
                for spec in specs {
                    self.visit_type(spec);
                }
            }
            Decl::Const(specs) => self.visit_values(specs, TagKind::Constant),
            Decl::Var(specs) => self.visit_values(specs, TagKind::Variable),
            // Imports are informational only.
            Decl::Import(specs) => {
                for spec in specs {
                    trace!(
                        file = self.filename,
                        path = %spec.path,
                        alias = ?spec.alias,
                        line = spec.line,
                        "import produces no tag"
                    );
                }
            }
            Decl::Unsupported { kind, line } => {
                trace!(file = self.filename, kind = %kind, line, "skipping unsupported declaration");
            }
        }
    }

    fn visit_func(&mut self, func: &FuncDecl) {
        if func.name.is_blank() {
            return;
        }

        let signature = func.signature.render();
        let tag = match &func.receiver {
            Some(receiver) => self
                .tag(&func.name, TagKind::Method)
                .with_receiver(receiver.clone()),
            None => self.tag(&func.name, TagKind::Function),
        };
        self.tags.push(tag.with_signature(signature));
    }

    fn visit_type(&mut self, spec: &TypeSpec) {
        if spec.name.is_blank() {
            return;
        }

        let parent = spec.name.name.as_str();
        match &spec.shape {
            TypeShape::Struct(fields) => {
                let tag = self.tag(&spec.name, TagKind::Struct);
                self.tags.push(tag);
                for field in fields.iter().filter(|f| !f.name.is_blank()) {
                    let tag = self
                        .tag(&field.name, TagKind::Field)
                        .with_scope(Scope::Struct(parent.to_string()));
                    self.tags.push(tag);
                }
            }
            TypeShape::Interface(methods) => {
                let tag = self.tag(&spec.name, TagKind::Interface);
                self.tags.push(tag);
                for method in methods.iter().filter(|m| !m.is_blank()) {
                    let tag = self
                        .tag(method, TagKind::InterfaceMethod)
                        .with_scope(Scope::Interface(parent.to_string()));
                    self.tags.push(tag);
                }
            }
            TypeShape::Other => {
                let tag = self.tag(&spec.name, TagKind::Type);
                self.tags.push(tag);
            }
        }
    }

    fn visit_values(&mut self, specs: &[ValueSpec], kind: TagKind) {
        for name in specs.iter().flat_map(|spec| &spec.names) {
            if name.is_blank() {
                continue;
            }
            let tag = self.tag(name, kind);
            self.tags.push(tag);
        }
    }

    fn tag(&self, ident: &Ident, kind: TagKind) -> Tag {
        Tag::new(
            ident.name.as_str(),
            self.filename,
            ident.line,
            self.file.line_text(ident.line),
            kind,
        )
    }
}
