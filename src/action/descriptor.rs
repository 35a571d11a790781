use super::inventory::names_eq;
use crate::controller::HandlerMeta;
use http::Method;
use smallvec::SmallVec;
use std::sync::Arc;

/// Maximum number of required parameter names stored inline.
/// Handlers rarely require more than a handful of URI values.
pub const MAX_INLINE_REQUIRED: usize = 4;

/// Required parameter names, stack-allocated for the common case.
///
/// Names use `Arc<str>` because they are fixed at inventory build time and
/// only ever shared afterwards.
pub type RequiredNames = SmallVec<[Arc<str>; MAX_INLINE_REQUIRED]>;

/// Human-readable handler identity (`Controller::Name(param: Type)`).
pub type HandlerIdentity = Arc<str>;

/// Immutable selection metadata for one candidate handler.
///
/// Built once per controller identity by the inventory builder and shared by
/// `Arc` afterwards; two descriptors in one inventory are never the same
/// allocation, so `Arc::ptr_eq` is the identity test.
#[derive(Debug)]
pub struct ActionDescriptor {
    name: Arc<str>,
    controller: Arc<str>,
    supported_methods: SmallVec<[Method; 4]>,
    required_parameters: RequiredNames,
    signature: HandlerIdentity,
    handler: HandlerMeta,
}

impl ActionDescriptor {
    pub(crate) fn from_handler(controller: &Arc<str>, handler: &HandlerMeta) -> Self {
        Self {
            name: Arc::from(handler.name.as_str()),
            controller: Arc::clone(controller),
            supported_methods: handler.effective_methods(),
            required_parameters: required_parameter_names(handler),
            signature: Arc::from(handler.signature(controller)),
            handler: handler.clone(),
        }
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn controller(&self) -> &str {
        &self.controller
    }

    #[inline]
    #[must_use]
    pub fn supported_methods(&self) -> &[Method] {
        &self.supported_methods
    }

    #[inline]
    #[must_use]
    pub fn supports(&self, method: &Method) -> bool {
        self.supported_methods.iter().any(|m| m == method)
    }

    /// Names the request URI must carry, in first-declared order and spelling.
    #[inline]
    #[must_use]
    pub fn required_parameters(&self) -> &[Arc<str>] {
        &self.required_parameters
    }

    #[inline]
    #[must_use]
    pub fn signature(&self) -> &str {
        &self.signature
    }

    #[inline]
    #[must_use]
    pub fn identity(&self) -> HandlerIdentity {
        Arc::clone(&self.signature)
    }

    /// The handler metadata this descriptor was built from, for the binding stage.
    #[inline]
    #[must_use]
    pub fn handler(&self) -> &HandlerMeta {
        &self.handler
    }
}

/// Union of the handler's required simple URI parameters and its extra URI
/// parameters, compared case-insensitively. The first spelling seen is kept.
fn required_parameter_names(handler: &HandlerMeta) -> RequiredNames {
    let mut names = RequiredNames::new();
    let bound = handler
        .parameters
        .iter()
        .filter(|p| p.is_required_from_uri())
        .map(|p| p.binding_name());
    let extra = handler.extra_uri_parameters.iter().map(String::as_str);

    for name in bound.chain(extra) {
        if name.is_empty() {
            continue;
        }
        if !names.iter().any(|n| names_eq(n, name)) {
            names.push(Arc::from(name));
        }
    }
    names
}
