//! # Tree Model
//!
//! Read-only view over a parsed source file: the declarations, structures and
//! fields the scanner walks. Built by [`crate::parser`] from Rust source, or by
//! hand by any other producer.

/// A parsed source file: its top-level declarations in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceTree {
    /// Top-level declarations.
    pub decls: Vec<Decl>,
}

/// A top-level declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decl {
    /// A group of type specifications sharing one leading comment block.
    Types(TypeGroup),
    /// Anything else (functions, imports, constants...). The label is informational.
    Other(String),
}

/// A type-declaration group (e.g. a `struct` item, or a Go `type ( ... )` block).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeGroup {
    /// Raw text of the leading comment block, markers already stripped.
    pub comment: Option<String>,
    /// The type specifications declared by the group.
    pub specs: Vec<TypeSpec>,
}

/// A named type specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSpec {
    /// Declared type name.
    pub name: String,
    /// The underlying type.
    pub ty: TypeExpr,
}

/// A type expression, reduced to the shapes the inspector cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// An inline structure.
    Struct(StructType),
    /// One level of indirection (`*T`, `&T`, `Box<T>`).
    Pointer(Box<TypeExpr>),
    /// A reference to a named type that was not inlined.
    Named(String),
    /// Any other type, kept as raw text.
    Other(String),
}

/// An ordered list of fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructType {
    /// Fields in declaration order.
    pub fields: Vec<Field>,
}

/// A structure field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Declared names. Empty for embedded or positional fields.
    pub names: Vec<String>,
    /// Raw text of the leading comment block.
    pub comment: Option<String>,
    /// Field type.
    pub ty: TypeExpr,
}

/// Classification of a [`TypeExpr`] used by both the scanner and the inspector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeShape<'a> {
    /// The type is an inline structure.
    Structure(&'a StructType),
    /// The type is a single pointer to an inline structure.
    PointerToStructure(&'a StructType),
    /// Anything else.
    Other,
}

impl<'a> TypeShape<'a> {
    /// The structure behind the shape, whether direct or behind one pointer.
    pub fn structure(self) -> Option<&'a StructType> {
        match self {
            TypeShape::Structure(s) | TypeShape::PointerToStructure(s) => Some(s),
            TypeShape::Other => None,
        }
    }
}

impl TypeExpr {
    /// Classifies the type. Only one level of pointer indirection is unwrapped.
    pub fn classify(&self) -> TypeShape<'_> {
        match self {
            TypeExpr::Struct(s) => TypeShape::Structure(s),
            TypeExpr::Pointer(inner) => match inner.as_ref() {
                TypeExpr::Struct(s) => TypeShape::PointerToStructure(s),
                _ => TypeShape::Other,
            },
            TypeExpr::Named(_) | TypeExpr::Other(_) => TypeShape::Other,
        }
    }
}

impl TypeGroup {
    /// The leading comment, if present and not blank.
    pub fn leading_comment(&self) -> Option<&str> {
        non_blank(self.comment.as_deref())
    }
}

impl Field {
    /// Creates a named field.
    pub fn named(name: impl Into<String>, ty: TypeExpr) -> Self {
        Field {
            names: vec![name.into()],
            comment: None,
            ty,
        }
    }

    /// Creates an embedded (unnamed) field.
    pub fn embedded(ty: TypeExpr) -> Self {
        Field {
            names: Vec::new(),
            comment: None,
            ty,
        }
    }

    /// Attaches a leading comment block.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// The first declared name; `None` for embedded fields.
    pub fn name(&self) -> Option<&str> {
        self.names.first().map(String::as_str)
    }

    /// The leading comment, if present and not blank.
    pub fn leading_comment(&self) -> Option<&str> {
        non_blank(self.comment.as_deref())
    }
}

fn non_blank(comment: Option<&str>) -> Option<&str> {
    comment.filter(|c| !c.trim().is_empty())
}
