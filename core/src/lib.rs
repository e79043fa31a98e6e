#![deny(missing_docs)]

//! # CDD Inspect Core
//!
//! Extracts annotation records from request/response structure declarations.

/// Shared error types.
pub mod error;

/// Parsed-tree model.
pub mod tree;

/// Rust source frontend.
pub mod parser;

/// Comment-block annotation parsing.
pub mod annotation;

/// Declaration scanning and structure inspection.
pub mod inspect;

pub use annotation::{Annotation, CommentParser, YamlCommentParser};
pub use error::{AppError, AppResult};
pub use inspect::{
    scan, RecordLevel, Records, ReportRecord, ScanReport, Scanner, SectionSet, DEFAULT_SECTIONS,
    OPERATION_SECTION,
};
pub use parser::{parse_source, parse_source_with, LoweringOptions};
pub use tree::{Decl, Field, SourceTree, StructType, TypeExpr, TypeGroup, TypeShape, TypeSpec};
