//! # Selector Module
//!
//! Entry point the dispatch layer calls once routing has produced route values.
//!
//! [`ActionSelector`] ties the per-controller [`InventoryCache`](crate::action::InventoryCache)
//! to [`resolve`](crate::action::resolve), logs every outcome through `tracing`, and
//! converts the result into a [`SelectionError`] the transport can render:
//!
//! | Error | Status | Meaning |
//! |---|---|---|
//! | `NotFound` | 404 | unknown action name or no handler fits the parameters |
//! | `MethodNotAllowed` | 405 | handlers exist, none accept the method |
//! | `Ambiguous` | 500 | controller declares indistinguishable handlers |
//! | `InvalidArgument` | 500 | caller passed inconsistent input |

mod core;
mod error;

pub use core::ActionSelector;
pub use error::SelectionError;
