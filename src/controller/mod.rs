//! # Controller Module
//!
//! Controller metadata consumed by action selection.
//!
//! A controller is described by a [`ControllerMetadata`] implementation: a stable
//! [`ControllerId`](crate::ids::ControllerId), the controller name, and the list of
//! [`HandlerMeta`] it exposes. How that list is produced is up to the caller:
//!
//! - **Static registration** - build a [`ControllerSpec`] in code
//! - **Manifest** - load YAML, JSON, or TOML with [`load_manifest`]
//! - **Codegen** - implement [`ControllerMetadata`] on a generated type
//!
//! ## Example
//!
//! ```rust
//! use brrtrouter_actions::controller::{ControllerSpec, HandlerMeta, ParameterMeta};
//! use http::Method;
//!
//! let widgets = ControllerSpec::new("Widgets")
//!     .handler(HandlerMeta::new("Get").method(Method::GET))
//!     .handler(
//!         HandlerMeta::new("Get")
//!             .method(Method::GET)
//!             .param(ParameterMeta::path("id", "i64")),
//!     );
//! ```
//!
//! ## Manifest Format
//!
//! ```yaml
//! controllers:
//!   - name: Widgets
//!     handlers:
//!       - name: Get
//!         methods: [GET]
//!       - name: Get
//!         methods: [GET]
//!         parameters:
//!           - { name: id, type: i64, in: path }
//!       - name: Create
//!         methods: [POST]
//!         parameters:
//!           - { name: widget, type: Widget, in: body, kind: composite }
//! ```

mod load;
mod types;

pub use load::{load_manifest, parse_manifest};
pub use types::*;
