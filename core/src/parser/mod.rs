//! # Parser Module
//!
//! Handles parsing of Rust source code using the rust-analyzer syntax library.
//! Produces the [`crate::tree`] model the scanner walks: structs, fields,
//! leading comment blocks and simplified type shapes.

mod comments;
pub mod lowering;

pub use lowering::{parse_source, parse_source_with, LoweringOptions};
