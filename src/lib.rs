//! # BRRTRouter Actions
//!
//! **brrtrouter-actions** picks the one controller action that should handle a
//! request once routing has matched a controller.
//!
//! ## Overview
//!
//! Name-based dispatch breaks down when a controller exposes several handlers
//! with the same name or verb, for example `Get()` and `Get(id)`. This crate
//! disambiguates them by the URI parameters each handler requires: a request
//! carrying `id` reaches `Get(id)`, a bare request reaches `Get()`.
//!
//! ## Architecture
//!
//! - **[`controller`]** - controller metadata: handlers, methods, parameters, manifests
//! - **[`action`]** - descriptors, per-controller inventories, the inventory cache,
//!   the resolution algorithm, and the exported name mapping
//! - **[`selector`]** - [`ActionSelector`], the facade the dispatch layer calls
//! - **[`runtime_config`]** - environment based tuning
//! - **[`logging`]** - `tracing` subscriber setup
//! - **[`cli`]** - `brrtrouter-actions` command line (inspect manifests, try selections)
//!
//! ### Selection Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Dispatch as Dispatcher
//!     participant Selector as ActionSelector
//!     participant Cache as InventoryCache
//!     participant Resolver as action::resolve
//!
//!     Dispatch->>Selector: select(controller, request)
//!     Selector->>Cache: get_or_build(controller)
//!     alt First request for this controller
//!         Cache->>Cache: ActionInventory::build
//!         Cache->>Cache: install (compare-and-swap)
//!     end
//!     Cache-->>Selector: Arc<ActionInventory>
//!     Selector->>Resolver: resolve(request, inventory)
//!     Resolver->>Resolver: name → verb → parameter shape
//!     Resolver-->>Selector: Resolution
//!     alt Resolved
//!         Selector-->>Dispatch: Ok(ActionDescriptor)
//!     else NotFound / MethodNotAllowed
//!         Selector-->>Dispatch: Err (404 / 405)
//!     else Ambiguous
//!         Selector-->>Dispatch: Err (500, lists conflicting handlers)
//!     end
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use brrtrouter_actions::{
//!     ActionRequest, ActionSelector, ControllerSpec, HandlerMeta, ParameterMeta, SelectionError,
//! };
//! use http::Method;
//!
//! let widgets = ControllerSpec::new("Widgets")
//!     .handler(HandlerMeta::new("Get").method(Method::GET))
//!     .handler(
//!         HandlerMeta::new("Get")
//!             .method(Method::GET)
//!             .param(ParameterMeta::path("id", "i64")),
//!     );
//!
//! let selector = ActionSelector::new();
//!
//! let by_id = ActionRequest::builder()
//!     .method(Method::GET)
//!     .controller("Widgets")
//!     .route_value("id", "7")
//!     .build()?;
//! assert_eq!(selector.select(&widgets, &by_id)?.signature(), "Widgets::Get(id: i64)");
//!
//! let post = ActionRequest::builder()
//!     .method(Method::POST)
//!     .controller("Widgets")
//!     .build()?;
//! let err = selector.select(&widgets, &post).unwrap_err();
//! assert_eq!(err.status_code(), 405);
//! # Ok::<(), SelectionError>(())
//! ```
//!
//! ## Concurrency
//!
//! Selection is synchronous and never blocks on I/O. Inventories are immutable
//! once built; the only shared mutable state is the inventory cache, which
//! builds each controller's inventory once even under concurrent first use.

pub mod action;
pub mod cli;
pub mod controller;
pub mod ids;
pub mod logging;
pub mod runtime_config;
pub mod selector;

pub use action::{
    export_mapping, resolve, ActionDescriptor, ActionInventory, ActionMapping, ActionRequest,
    InventoryCache, InventoryStore, Resolution,
};
pub use controller::{
    load_manifest, ControllerMetadata, ControllerSpec, HandlerMeta, HandlerOrigin,
    ParameterKind, ParameterLocation, ParameterMeta,
};
pub use ids::ControllerId;
pub use selector::{ActionSelector, SelectionError};
