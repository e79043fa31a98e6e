//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// We use `derive_more` for boilerplate.
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// The source text could not be parsed as Rust.
    #[from(ignore)]
    #[display("Syntax Error: {_0}")]
    Syntax(String),

    /// A comment block is not a well-formed annotation.
    #[from(ignore)]
    #[display("Annotation Error: {_0}")]
    Annotation(String),

    /// An error tagged with the record location (`Operation.Section.Field`) it came from.
    #[from(ignore)]
    #[display("{location}: {source}")]
    Located {
        /// Dotted location of the element being processed.
        location: String,
        /// The underlying failure.
        source: Box<AppError>,
    },

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

impl AppError {
    /// Wraps the error with the location of the element that produced it.
    pub fn located(self, location: impl Into<String>) -> Self {
        AppError::Located {
            location: location.into(),
            source: Box::new(self),
        }
    }

    /// Strips any location wrappers and returns the innermost error.
    pub fn root(&self) -> &AppError {
        match self {
            AppError::Located { source, .. } => source.root(),
            other => other,
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Io(e) => Some(e),
            AppError::Located { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;
