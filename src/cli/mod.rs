//! # CLI Module
//!
//! Command-line access to action selection, mostly for checking controller
//! manifests before deploying them.
//!
//! ## Commands
//!
//! ### `inspect`
//!
//! Print each controller's action names and the handlers behind them:
//!
//! ```bash
//! brrtrouter-actions inspect --manifest controllers.yaml
//! brrtrouter-actions inspect --manifest controllers.yaml --controller Widgets --format json
//! ```
//!
//! ### `select`
//!
//! Resolve a request the way the dispatcher would and print the chosen handler,
//! or the status and reason when nothing (or too much) matches:
//!
//! ```bash
//! brrtrouter-actions select --manifest controllers.yaml --controller Widgets \
//!     --method GET --route id=7
//! # Widgets::Get(id: i64)
//!
//! brrtrouter-actions select --manifest controllers.yaml --controller Widgets --method DELETE
//! # 405 the requested resource does not support HTTP method 'DELETE'
//! ```
//!
//! `select` exits with status 1 when no single action was selected.

mod commands;

pub use commands::{execute, run_cli, Cli, Commands, OutputFormat};
