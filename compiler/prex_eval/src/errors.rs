//! Errors from building nodes by canonical name.
//!
//! Evaluation itself cannot fail; this is the one fallible surface.

use thiserror::Error;

/// Reasons a registry build was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// No operator or form is registered under this name.
    #[error("unknown operator `{name}`")]
    UnknownOperator { name: String },

    /// An argument of the wrong shape for this position.
    #[error("`{operator}` does not accept {argument} here")]
    UnexpectedArgument {
        operator: &'static str,
        argument: &'static str,
    },

    /// Wrong number of positional arguments.
    #[error("`{operator}` expects {expected} positional argument(s), found {found}")]
    Arity {
        operator: &'static str,
        expected: usize,
        found: usize,
    },

    /// A required keyword argument was not supplied.
    #[error("`{operator}` requires `{keyword} = ...`")]
    MissingKeyword {
        operator: &'static str,
        keyword: &'static str,
    },
}

impl RegistryError {
    pub(crate) fn unexpected(operator: &'static str, argument: &'static str) -> Self {
        RegistryError::UnexpectedArgument { operator, argument }
    }

    pub(crate) fn arity(operator: &'static str, expected: usize, found: usize) -> Self {
        RegistryError::Arity {
            operator,
            expected,
            found,
        }
    }
}
