//! Core shared errors (renderer-agnostic).

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// A numeric array did not have the component count the target type needs.
    #[error("{type_name} expects {expected} components, got {found}")]
    InvalidArity {
        type_name: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("Generic error: {0}")]
    Generic(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
