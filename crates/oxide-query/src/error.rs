//! Error types for statement building and compilation.

use thiserror::Error;

/// Errors raised while a statement tree is built or compiled.
///
/// Every variant is raised before any SQL text leaves the compiler, so a
/// malformed statement never reaches an executor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// A comparison operator outside the allow-list.
    #[error("The operator \"{0}\" is not permitted")]
    Operator(String),

    /// Raw template placeholders that do not line up with the bindings.
    #[error("invalid raw template: {0}")]
    Template(String),

    /// An undefined value under a strict grammar, or a badly shaped bound value.
    #[error("invalid value: {0}")]
    Value(String),

    /// A node used in a position that requires a different payload kind.
    #[error("invalid statement structure: {0}")]
    Structure(String),
}

/// Result type alias for builder and compiler operations.
pub type Result<T> = std::result::Result<T, QueryError>;
