//! # Lowering
//!
//! Converts the rust-analyzer syntax tree of a file into the [`SourceTree`] model.

use super::comments::leading_comment;
use crate::error::{AppError, AppResult};
use crate::tree::{Decl, Field, SourceTree, StructType, TypeExpr, TypeGroup, TypeSpec};
use ra_ap_edition::Edition;
use ra_ap_syntax::ast::{self, HasGenericArgs, HasModuleItem, HasName};
use ra_ap_syntax::{AstNode, SourceFile};
use std::collections::HashMap;
use tracing::debug;

/// Knobs for turning Rust source into a [`SourceTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoweringOptions {
    /// Replace a field type naming a struct declared at the top level of the
    /// same file with that struct's fields, one level deep.
    pub inline_local_structs: bool,
}

impl Default for LoweringOptions {
    fn default() -> Self {
        LoweringOptions {
            inline_local_structs: true,
        }
    }
}

/// Top-level structs by name, used for inlining.
type Locals = HashMap<String, ast::Struct>;

/// Parses Rust source into a [`SourceTree`] with default options.
///
/// # Examples
/// ```
/// use cdd_inspect_core::parser::parse_source;
/// use cdd_inspect_core::tree::Decl;
///
/// let tree = parse_source("/// summary: x\nstruct Ping {}\nfn main() {}").unwrap();
/// assert!(matches!(&tree.decls[0], Decl::Types(g) if g.comment.as_deref() == Some("summary: x")));
/// assert!(matches!(&tree.decls[1], Decl::Other(kind) if kind == "fn"));
/// ```
pub fn parse_source(code: &str) -> AppResult<SourceTree> {
    parse_source_with(code, &LoweringOptions::default())
}

/// Parses Rust source into a [`SourceTree`].
///
/// Fails with [`AppError::Syntax`] on the first syntax error.
pub fn parse_source_with(code: &str, options: &LoweringOptions) -> AppResult<SourceTree> {
    let parse = SourceFile::parse(code, Edition::Edition2021);
    if let Some(err) = parse.errors().first() {
        return Err(AppError::Syntax(format!("{} at {:?}", err, err.range())));
    }
    let file = parse.tree();

    let mut locals = Locals::new();
    if options.inline_local_structs {
        for item in file.items() {
            if let ast::Item::Struct(s) = item {
                if let Some(name) = s.name() {
                    locals.entry(name.text().to_string()).or_insert(s);
                }
            }
        }
    }

    let decls: Vec<Decl> = file.items().map(|item| lower_item(item, &locals)).collect();
    debug!(
        decls = decls.len(),
        structs = locals.len(),
        "lowered source file"
    );

    Ok(SourceTree { decls })
}

fn lower_item(item: ast::Item, locals: &Locals) -> Decl {
    match item {
        ast::Item::Struct(s) => match s.name() {
            Some(name) => Decl::Types(TypeGroup {
                comment: leading_comment(s.syntax()),
                specs: vec![TypeSpec {
                    name: name.text().to_string(),
                    ty: TypeExpr::Struct(lower_struct(&s, Some(locals))),
                }],
            }),
            None => Decl::Other("struct".into()),
        },
        ast::Item::TypeAlias(alias) => match (alias.name(), alias.ty()) {
            (Some(name), Some(ty)) => Decl::Types(TypeGroup {
                comment: leading_comment(alias.syntax()),
                specs: vec![TypeSpec {
                    name: name.text().to_string(),
                    ty: lower_type(&ty, None),
                }],
            }),
            _ => Decl::Other("type_alias".into()),
        },
        other => Decl::Other(format!("{:?}", other.syntax().kind()).to_lowercase()),
    }
}

/// Lowers the fields of a struct. Tuple fields become unnamed fields.
fn lower_struct(s: &ast::Struct, locals: Option<&Locals>) -> StructType {
    let mut fields = Vec::new();

    match s.field_list() {
        Some(ast::FieldList::RecordFieldList(list)) => {
            for field in list.fields() {
                let Some(ty) = field.ty() else {
                    continue;
                };
                fields.push(Field {
                    names: field.name().map(|n| n.text().to_string()).into_iter().collect(),
                    comment: leading_comment(field.syntax()),
                    ty: lower_type(&ty, locals),
                });
            }
        }
        Some(ast::FieldList::TupleFieldList(list)) => {
            for field in list.fields() {
                let Some(ty) = field.ty() else {
                    continue;
                };
                fields.push(Field {
                    names: Vec::new(),
                    comment: leading_comment(field.syntax()),
                    ty: lower_type(&ty, locals),
                });
            }
        }
        None => {}
    }

    StructType { fields }
}

/// Reduces a type to the shapes of [`TypeExpr`].
///
/// `locals` is `None` once inside an inlined struct, which bounds inlining to one level.
fn lower_type(ty: &ast::Type, locals: Option<&Locals>) -> TypeExpr {
    let text = || ty.syntax().text().to_string();

    match ty {
        ast::Type::RefType(r) => pointer(r.ty(), locals, text),
        ast::Type::PtrType(p) => pointer(p.ty(), locals, text),
        ast::Type::PathType(path_type) => {
            let Some(path) = path_type.path() else {
                return TypeExpr::Other(text());
            };
            let qualified = path.qualifier().is_some();
            let Some(segment) = path.segment() else {
                return TypeExpr::Other(text());
            };
            let Some(name_ref) = segment.name_ref() else {
                return TypeExpr::Other(text());
            };
            let name = name_ref.text().to_string();

            if name == "Box" {
                let inner = segment
                    .generic_arg_list()
                    .and_then(|args| args.generic_args().next())
                    .and_then(|arg| match arg {
                        ast::GenericArg::TypeArg(type_arg) => type_arg.ty(),
                        _ => None,
                    });
                return pointer(inner, locals, text);
            }

            match locals.and_then(|l| l.get(&name)) {
                Some(local) if !qualified && segment.generic_arg_list().is_none() => {
                    TypeExpr::Struct(lower_struct(local, None))
                }
                _ => TypeExpr::Named(text()),
            }
        }
        _ => TypeExpr::Other(text()),
    }
}

fn pointer(
    inner: Option<ast::Type>,
    locals: Option<&Locals>,
    text: impl Fn() -> String,
) -> TypeExpr {
    match inner {
        Some(inner) => TypeExpr::Pointer(Box::new(lower_type(&inner, locals))),
        None => TypeExpr::Other(text()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::TypeShape;

    fn only_struct(tree: &SourceTree, name: &str) -> StructType {
        tree.decls
            .iter()
            .find_map(|d| match d {
                Decl::Types(g) if g.specs[0].name == name => match &g.specs[0].ty {
                    TypeExpr::Struct(s) => Some(s.clone()),
                    _ => None,
                },
                _ => None,
            })
            .expect("struct missing")
    }

    #[test]
    fn test_struct_and_other_items() {
        let tree = parse_source(
            r#"
            use std::fmt;

            /// summary: ping
            pub struct Ping { pub Body: String }

            type Alias = Ping;

            fn handler() {}
            "#,
        )
        .unwrap();

        assert_eq!(tree.decls.len(), 4);
        assert_eq!(tree.decls[0], Decl::Other("use".into()));
        match &tree.decls[1] {
            Decl::Types(g) => {
                assert_eq!(g.comment.as_deref(), Some("summary: ping"));
                assert_eq!(g.specs[0].name, "Ping");
            }
            other => panic!("unexpected {:?}", other),
        }
        match &tree.decls[2] {
            Decl::Types(g) => assert_eq!(g.specs[0].ty, TypeExpr::Named("Ping".into())),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(tree.decls[3], Decl::Other("fn".into()));
    }

    #[test]
    fn test_field_comments_and_names() {
        let tree = parse_source(
            r#"
            struct Req {
                /// in: path
                Path: String,
                Query: u32,
            }
            "#,
        )
        .unwrap();
        let s = only_struct(&tree, "Req");
        assert_eq!(s.fields[0].name(), Some("Path"));
        assert_eq!(s.fields[0].comment.as_deref(), Some("in: path"));
        assert_eq!(s.fields[1].comment, None);
    }

    #[test]
    fn test_tuple_fields_are_unnamed() {
        let tree = parse_source("struct Wrapper(/// a: b\n String);").unwrap();
        let s = only_struct(&tree, "Wrapper");
        assert_eq!(s.fields.len(), 1);
        assert_eq!(s.fields[0].name(), None);
    }

    #[test]
    fn test_pointer_shapes() {
        let tree = parse_source(
            r#"
            struct Req<'a> {
                A: &'a Pet,
                B: Box<Pet>,
                C: *const u8,
                D: Vec<Pet>,
                E: (u8, u8),
            }
            "#,
        )
        .unwrap();
        let s = only_struct(&tree, "Req");
        let named = |n: &str| TypeExpr::Pointer(Box::new(TypeExpr::Named(n.into())));
        assert_eq!(s.fields[0].ty, named("Pet"));
        assert_eq!(s.fields[1].ty, named("Pet"));
        assert_eq!(s.fields[2].ty, named("u8"));
        assert_eq!(s.fields[3].ty, TypeExpr::Named("Vec<Pet>".into()));
        assert!(matches!(s.fields[4].ty, TypeExpr::Other(_)));
    }

    #[test]
    fn test_local_structs_are_inlined_one_level() {
        let code = r#"
            struct GetPetRequest {
                Path: PetPath,
                Response: Box<Pet>,
            }
            struct PetPath {
                /// desc: pet id
                Id: String,
                Owner: Owner,
            }
            struct Pet { Name: String }
            struct Owner { Name: String }
        "#;
        let tree = parse_source(code).unwrap();
        let s = only_struct(&tree, "GetPetRequest");

        let path = s.fields[0].ty.classify().structure().expect("inlined");
        assert_eq!(path.fields[0].comment.as_deref(), Some("desc: pet id"));
        assert_eq!(path.fields[1].ty, TypeExpr::Named("Owner".into()));
        assert!(matches!(s.fields[1].ty.classify(), TypeShape::PointerToStructure(_)));

        let plain = parse_source_with(
            code,
            &LoweringOptions {
                inline_local_structs: false,
            },
        )
        .unwrap();
        let s = only_struct(&plain, "GetPetRequest");
        assert_eq!(s.fields[0].ty, TypeExpr::Named("PetPath".into()));
    }

    #[test]
    fn test_qualified_paths_are_not_inlined() {
        let tree = parse_source(
            r#"
            struct GetPetRequest {
                Path: other::PetPath,
                Body: PetPath,
            }
            struct PetPath { Id: String }
            "#,
        )
        .unwrap();
        let s = only_struct(&tree, "GetPetRequest");
        assert_eq!(s.fields[0].ty, TypeExpr::Named("other::PetPath".into()));
        assert!(matches!(s.fields[1].ty.classify(), TypeShape::Structure(_)));
    }

    #[test]
    fn test_syntax_error() {
        let err = parse_source("struct Broken {").unwrap_err();
        assert!(matches!(err, AppError::Syntax(_)));
    }
}
