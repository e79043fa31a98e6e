#![deny(missing_docs)]

//! # CLI Errors
//!
//! Error types for the CLI crate.

use cdd_inspect_core::AppError;
use derive_more::{Display, From};

/// Main error enum for CLI operations.
#[derive(Debug, Display, From)]
pub enum CliError {
    /// IO Error wrapper.
    #[display("IO Error: {}", _0)]
    Io(std::io::Error),

    /// Failure reported by the inspection core.
    #[display("{}", _0)]
    Core(AppError),

    /// Records could not be serialized in the requested format.
    #[from(ignore)]
    #[display("Render Error: {}", _0)]
    Render(String),

    /// General failure message.
    #[display("Operation failed: {}", _0)]
    General(String),
}

/// Manual implementation of the standard Error trait.
///
/// We implement this manually (instead of `derive(Error)`) because the `General(String)`
/// variant contains a `String`, which does not implement `std::error::Error`, causing
/// auto-derived `source()` implementations to fail compilation.
impl std::error::Error for CliError {}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Render(e.to_string())
    }
}

impl From<serde_yaml::Error> for CliError {
    fn from(e: serde_yaml::Error) -> Self {
        CliError::Render(e.to_string())
    }
}

/// Result type alias.
pub type CliResult<T> = Result<T, CliError>;
