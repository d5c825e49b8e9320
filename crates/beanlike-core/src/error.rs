//! Error types for BeanLike
//!
//! Every check returns `Result<T, Violation>`. A violation is either a shape
//! problem found while the tester is built or a behaviour problem found while
//! a check runs; both carry a readable message and, when a call into the
//! target type failed, the failure that caused it.

use std::fmt;

/// The single failure kind raised by every check.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct Violation {
    message: String,
    #[source]
    cause: Option<InvocationError>,
}

impl Violation {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            cause: None,
        }
    }

    /// Violation raised because a constructor, accessor or mutator failed
    pub fn caused_by(message: impl Into<String>, cause: InvocationError) -> Self {
        Self {
            message: message.into(),
            cause: Some(cause),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn cause(&self) -> Option<&InvocationError> {
        self.cause.as_ref()
    }
}

/// How a dynamic call into the target type failed
#[derive(Debug, thiserror::Error)]
pub enum InvocationError {
    /// A positional argument could not be converted to the parameter type
    #[error("argument {position} expects {expected}, found {found}")]
    Argument {
        position: usize,
        expected: String,
        found: String,
    },

    /// The number of arguments does not match the signature
    #[error("expected {expected} argument(s), found {found}")]
    Arity { expected: usize, found: usize },

    /// The call itself reported an error
    #[error("{0}")]
    Failed(Box<dyn std::error::Error + Send + Sync>),

    /// The call panicked
    #[error("panicked: {0}")]
    Panicked(String),
}

impl InvocationError {
    pub fn failed(error: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        InvocationError::Failed(error.into())
    }
}

/// Helper for messages listing names or signatures: `[a, b, c]`
pub(crate) struct Listing<'a, I>(pub &'a I);

impl<'a, I, T> fmt::Display for Listing<'a, I>
where
    &'a I: IntoIterator<Item = T>,
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, item) in self.0.into_iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", item)?;
        }
        write!(f, "]")
    }
}

/// Result type alias for BeanLike checks
pub type Result<T> = std::result::Result<T, Violation>;
