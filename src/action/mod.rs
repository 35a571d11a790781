//! # Action Module
//!
//! Selection of one controller action for an incoming request.
//!
//! ## Overview
//!
//! A controller may expose several handlers that share a name or an HTTP verb,
//! told apart only by the URI parameters they require. This module turns a
//! controller's handler list into an [`ActionInventory`] once, caches it per
//! controller identity, and resolves each request against it.
//!
//! ## Architecture
//!
//! - **[`ActionDescriptor`]** - name, supported methods, required URI parameter names
//! - **[`ActionInventory`]** - all descriptors plus a case-insensitive name index and
//!   precomputed GET/PUT/POST buckets
//! - **[`InventoryCache`]** - build-once cache, single slot plus identity store
//! - **[`resolve`]** - name → verb → parameter-shape filter
//! - **[`export_mapping`]** - read-only `name → handlers` view
//!
//! ## Resolution
//!
//! ```mermaid
//! flowchart TD
//!     R[ActionRequest] --> A{action route value?}
//!     A -- yes --> N[by_name lookup]
//!     N -- empty --> NF1[NotFound: unknown action]
//!     N --> V1[keep handlers supporting method]
//!     A -- no --> V2[verb bucket or scan]
//!     V1 --> E{any candidates?}
//!     V2 --> E
//!     E -- no --> MNA[MethodNotAllowed]
//!     E -- yes --> P[parameter subset + most specific]
//!     P -- 0 --> NF2[NotFound: no match]
//!     P -- 1 --> OK[Resolved]
//!     P -- many --> AMB[Ambiguous]
//! ```
//!
//! ## Example
//!
//! ```rust
//! use brrtrouter_actions::action::{resolve, ActionInventory, ActionRequest, Resolution};
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
//! let inventory = ActionInventory::build(&widgets);
//!
//! let request = ActionRequest::builder()
//!     .method(Method::GET)
//!     .controller("Widgets")
//!     .route_value("id", "7")
//!     .build()
//!     .unwrap();
//!
//! match resolve(&request, &inventory) {
//!     Resolution::Resolved(action) => assert_eq!(action.signature(), "Widgets::Get(id: i64)"),
//!     other => panic!("unexpected {other:?}"),
//! }
//! ```

mod cache;
mod descriptor;
mod inventory;
mod mapping;
mod request;
mod resolver;

pub(crate) use inventory::names_eq;

pub use cache::{ControllerRegistry, InventoryCache, InventoryStore};
pub use descriptor::{ActionDescriptor, HandlerIdentity, RequiredNames, MAX_INLINE_REQUIRED};
pub use inventory::{ActionInventory, Candidates, COMMON_VERBS, MAX_INLINE_CANDIDATES};
pub use mapping::{export_mapping, ActionMapping};
pub use request::{
    ActionRequest, ActionRequestBuilder, QueryNames, RouteValues, ACTION_KEY, CONTROLLER_KEY,
    MAX_INLINE_PARAMS,
};
pub use resolver::{resolve, NotFoundReason, Resolution};
