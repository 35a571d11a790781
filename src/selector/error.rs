use crate::action::{ActionDescriptor, NotFoundReason};
use http::Method;
use std::fmt;
use std::sync::Arc;

/// Why an action could not be selected.
///
/// `NotFound` and `MethodNotAllowed` are ordinary outcomes of client traffic.
/// `Ambiguous` means the controller declares handlers selection can never tell
/// apart and is reported as a server-side configuration error.
/// `InvalidArgument` is API misuse by the caller and never comes from the wire.
#[derive(Debug, Clone)]
pub enum SelectionError {
    /// No handler with the requested name, or none whose parameters fit
    NotFound(NotFoundReason),
    /// Handlers exist for the name or controller, none accept the method
    MethodNotAllowed(Method),
    /// Several handlers satisfy every filter with equal specificity
    Ambiguous {
        /// Controller the conflicting handlers belong to
        controller: Arc<str>,
        /// Every conflicting handler, in declaration order
        candidates: Vec<Arc<ActionDescriptor>>,
    },
    /// A required input was missing or inconsistent
    InvalidArgument(&'static str),
}

impl SelectionError {
    /// HTTP status the dispatch layer should answer with.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            SelectionError::NotFound(_) => 404,
            SelectionError::MethodNotAllowed(_) => 405,
            SelectionError::Ambiguous { .. } | SelectionError::InvalidArgument(_) => 500,
        }
    }

    /// True for outcomes caused by the request rather than by the server.
    #[must_use]
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            SelectionError::NotFound(_) | SelectionError::MethodNotAllowed(_)
        )
    }

    /// Signatures of the conflicting handlers; empty for other kinds.
    #[must_use]
    pub fn conflicting_signatures(&self) -> Vec<&str> {
        match self {
            SelectionError::Ambiguous { candidates, .. } => {
                candidates.iter().map(|d| d.signature()).collect()
            }
            _ => Vec::new(),
        }
    }
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionError::NotFound(reason) => write!(f, "{reason}"),
            SelectionError::MethodNotAllowed(method) => {
                write!(f, "the requested resource does not support HTTP method '{method}'")
            }
            SelectionError::Ambiguous {
                controller,
                candidates,
            } => {
                write!(f, "multiple actions on {controller} match the request:")?;
                for candidate in candidates {
                    write!(f, "\n  {}", candidate.signature())?;
                }
                Ok(())
            }
            SelectionError::InvalidArgument(what) => write!(f, "invalid argument: {what}"),
        }
    }
}

impl std::error::Error for SelectionError {}
