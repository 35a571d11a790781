//! Action resolution - hot path for per-request handler selection.
//!
//! # JSF Compliance (Rule 206)
//!
//! Candidates are borrowed from the inventory into a `SmallVec`, so selection
//! over ≤8 handlers does not touch the heap. Only the `Ambiguous` outcome
//! collects into a `Vec`, and that outcome is a configuration defect.

#![deny(clippy::inefficient_to_string)]
#![deny(clippy::format_push_string)]
#![deny(clippy::unnecessary_to_owned)]

use super::descriptor::ActionDescriptor;
use super::inventory::{names_eq, ActionInventory, Candidates};
use super::request::ActionRequest;
use crate::selector::SelectionError;
use http::Method;
use std::fmt;
use std::sync::Arc;

/// Why no handler was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotFoundReason {
    /// The route named an action the controller does not declare
    UnknownAction {
        controller: Arc<str>,
        action: Box<str>,
    },
    /// Handlers matched name and verb, none fit the supplied parameters
    NoMatchingParameters { controller: Arc<str> },
}

impl fmt::Display for NotFoundReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotFoundReason::UnknownAction { controller, action } => {
                write!(f, "no action named '{action}' on {controller}")
            }
            NotFoundReason::NoMatchingParameters { controller } => {
                write!(f, "no action on {controller} matches the request")
            }
        }
    }
}

/// Outcome of resolving one request against one inventory.
#[derive(Debug, Clone)]
pub enum Resolution {
    Resolved(Arc<ActionDescriptor>),
    NotFound(NotFoundReason),
    MethodNotAllowed(Method),
    /// Conflicting handlers in declaration order
    Ambiguous(Vec<Arc<ActionDescriptor>>),
}

impl Resolution {
    /// The matched descriptor, if any.
    #[must_use]
    pub fn resolved(&self) -> Option<&Arc<ActionDescriptor>> {
        match self {
            Resolution::Resolved(d) => Some(d),
            _ => None,
        }
    }

    /// Convert into the dispatch-facing `Result`.
    pub fn into_result(self, controller: &str) -> Result<Arc<ActionDescriptor>, SelectionError> {
        match self {
            Resolution::Resolved(d) => Ok(d),
            Resolution::NotFound(reason) => Err(SelectionError::NotFound(reason)),
            Resolution::MethodNotAllowed(m) => Err(SelectionError::MethodNotAllowed(m)),
            Resolution::Ambiguous(candidates) => Err(SelectionError::Ambiguous {
                controller: Arc::from(controller),
                candidates,
            }),
        }
    }
}

/// Resolve a request against an inventory.
///
/// Stages run in a fixed order: name, then verb, then parameter shape. A known
/// action name with the wrong verb therefore reports `MethodNotAllowed`, and
/// parameter matching only ever sees verb-compatible handlers.
#[must_use]
pub fn resolve(request: &ActionRequest, inventory: &ActionInventory) -> Resolution {
    let method = request.method();

    // Stage 1: name
    let candidates: Candidates<'_> = match request.action() {
        Some(action) => {
            let named = inventory.by_name(action);
            if named.is_empty() {
                return Resolution::NotFound(NotFoundReason::UnknownAction {
                    controller: Arc::clone(inventory.controller_arc()),
                    action: action.into(),
                });
            }
            named.iter().filter(|d| d.supports(method)).collect()
        }
        None => inventory.candidates_for_verb(method),
    };

    // Stage 2: verb
    if candidates.is_empty() {
        return Resolution::MethodNotAllowed(method.clone());
    }

    // Stage 3: parameter shape
    let available = request.available_parameter_names();
    let survivors = filter_by_parameters(candidates, &available);

    // Stage 4: classify
    match survivors.len() {
        0 => Resolution::NotFound(NotFoundReason::NoMatchingParameters {
            controller: Arc::clone(inventory.controller_arc()),
        }),
        1 => Resolution::Resolved(Arc::clone(survivors[0])),
        _ => Resolution::Ambiguous(survivors.into_iter().map(Arc::clone).collect()),
    }
}

/// Keep handlers whose required names are all available; prefer the most specific.
///
/// With no available names only parameterless handlers survive. Otherwise a
/// handler survives when its required set is a subset of the available names,
/// and among several survivors only those requiring the most names are kept.
pub(crate) fn filter_by_parameters<'a>(
    candidates: Candidates<'a>,
    available: &[&str],
) -> Candidates<'a> {
    if available.is_empty() {
        return candidates
            .into_iter()
            .filter(|d| d.required_parameters().is_empty())
            .collect();
    }

    let mut matched: Candidates<'a> = candidates
        .into_iter()
        .filter(|d| {
            d.required_parameters()
                .iter()
                .all(|required| available.iter().any(|a| names_eq(a, required)))
        })
        .collect();

    if matched.len() > 1 {
        let most_specific = matched
            .iter()
            .map(|d| d.required_parameters().len())
            .max()
            .unwrap_or(0);
        matched.retain(|d| d.required_parameters().len() == most_specific);
    }
    matched
}
