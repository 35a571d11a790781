//! Selector core module - hot path for per-request action selection.

use super::error::SelectionError;
use crate::action::{
    export_mapping, names_eq, resolve, ActionDescriptor, ActionInventory, ActionMapping,
    ActionRequest, InventoryCache, InventoryStore, Resolution,
};
use crate::controller::ControllerMetadata;
use crate::runtime_config::RuntimeConfig;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Selects controller actions for requests.
///
/// Owns the [`InventoryCache`], so one selector shared by every request thread
/// builds each controller's inventory once. Cheap to share behind an `Arc`.
///
/// # Example
///
/// ```rust
/// use brrtrouter_actions::action::ActionRequest;
/// use brrtrouter_actions::controller::{ControllerSpec, HandlerMeta};
/// use brrtrouter_actions::selector::ActionSelector;
/// use http::Method;
///
/// let controller = ControllerSpec::new("Widgets").handler(HandlerMeta::new("Get"));
/// let selector = ActionSelector::new();
/// let request = ActionRequest::builder()
///     .method(Method::GET)
///     .controller("Widgets")
///     .build()?;
///
/// let action = selector.select(&controller, &request)?;
/// assert_eq!(action.name(), "Get");
/// # Ok::<(), brrtrouter_actions::selector::SelectionError>(())
/// ```
pub struct ActionSelector {
    cache: InventoryCache,
    config: RuntimeConfig,
}

impl Default for ActionSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionSelector {
    /// Selector configured from the environment with a private identity store.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RuntimeConfig::from_env())
    }

    #[must_use]
    pub fn with_config(config: RuntimeConfig) -> Self {
        Self {
            cache: InventoryCache::new(),
            config,
        }
    }

    /// Selector whose slot misses go to a caller-owned identity store.
    #[must_use]
    pub fn with_store(store: Arc<dyn InventoryStore>, config: RuntimeConfig) -> Self {
        Self {
            cache: InventoryCache::with_store(store),
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Inventory for `controller`, built on first use.
    #[must_use]
    pub fn inventory(&self, controller: &dyn ControllerMetadata) -> Arc<ActionInventory> {
        self.cache.get_or_build(controller)
    }

    /// Read-only `name → handlers` view for documentation or alternate dispatch.
    #[must_use]
    pub fn mapping(&self, controller: &dyn ControllerMetadata) -> ActionMapping {
        export_mapping(&self.inventory(controller))
    }

    /// Build inventories ahead of traffic. Returns how many were built or found.
    ///
    /// Does nothing when `BRRTR_PREWARM_INVENTORY` is off.
    pub fn prewarm(&self, controllers: &[&dyn ControllerMetadata]) -> usize {
        if !self.config.prewarm_inventory {
            debug!(controllers = controllers.len(), "Inventory prewarm disabled");
            return 0;
        }
        for controller in controllers {
            let _inventory = self.inventory(*controller);
        }
        info!(controllers = controllers.len(), "Action inventories prewarmed");
        controllers.len()
    }

    /// Resolve without converting the outcome into an error.
    #[must_use]
    pub fn resolve(
        &self,
        controller: &dyn ControllerMetadata,
        request: &ActionRequest,
    ) -> Resolution {
        debug!(
            controller = %controller.name(),
            method = %request.method(),
            action = ?request.action(),
            "Action selection attempt"
        );

        // Inventory builds are logged by the builder and excluded from selection timing.
        let inventory = self.inventory(controller);
        let start = Instant::now();
        let resolution = resolve(request, &inventory);
        let elapsed = start.elapsed();

        if elapsed > self.config.slow_select_threshold {
            warn!(
                controller = %controller.name(),
                method = %request.method(),
                duration_us = elapsed.as_micros(),
                "Slow action selection detected"
            );
        }

        match &resolution {
            Resolution::Resolved(action) => debug!(
                controller = %controller.name(),
                method = %request.method(),
                action = %action.signature(),
                duration_us = elapsed.as_micros(),
                "Action selected"
            ),
            Resolution::NotFound(reason) => info!(
                controller = %controller.name(),
                method = %request.method(),
                reason = %reason,
                "No action matched"
            ),
            Resolution::MethodNotAllowed(method) => info!(
                controller = %controller.name(),
                method = %method,
                "Method not allowed"
            ),
            Resolution::Ambiguous(candidates) => {
                let signatures: Vec<&str> = candidates.iter().map(|d| d.signature()).collect();
                error!(
                    controller = %controller.name(),
                    method = %request.method(),
                    candidates = ?signatures,
                    "Ambiguous action match, controller declares indistinguishable handlers"
                );
            }
        }

        resolution
    }

    /// Select exactly one action or explain why not.
    ///
    /// # Errors
    ///
    /// - [`SelectionError::InvalidArgument`] when the controller has no name or the
    ///   request's `controller` route value names a different controller
    /// - [`SelectionError::NotFound`], [`SelectionError::MethodNotAllowed`],
    ///   [`SelectionError::Ambiguous`] as classified by resolution
    pub fn select(
        &self,
        controller: &dyn ControllerMetadata,
        request: &ActionRequest,
    ) -> Result<Arc<ActionDescriptor>, SelectionError> {
        if controller.name().is_empty() {
            return Err(SelectionError::InvalidArgument("controller name is required"));
        }
        if let Some(routed) = request.controller() {
            if !names_eq(routed, controller.name()) {
                return Err(SelectionError::InvalidArgument(
                    "request was routed to a different controller",
                ));
            }
        }
        self.resolve(controller, request).into_result(controller.name())
    }
}
