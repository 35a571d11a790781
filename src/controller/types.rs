use crate::ids::ControllerId;
use http::Method;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Where a handler parameter is bound from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Cookie,
    Body,
}

impl ParameterLocation {
    /// Path and query parameters are both carried by the request URI.
    #[inline]
    #[must_use]
    pub fn is_uri(self) -> bool {
        matches!(self, ParameterLocation::Path | ParameterLocation::Query)
    }
}

impl std::fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParameterLocation::Path => write!(f, "Path"),
            ParameterLocation::Query => write!(f, "Query"),
            ParameterLocation::Header => write!(f, "Header"),
            ParameterLocation::Cookie => write!(f, "Cookie"),
            ParameterLocation::Body => write!(f, "Body"),
        }
    }
}

/// Shape of a parameter's underlying type.
///
/// `Simple` values parse from a single string token (numbers, strings, ids, dates);
/// `Composite` values are structured objects that need a body or model binder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterKind {
    #[default]
    Simple,
    Composite,
}

/// How a handler ended up on the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandlerOrigin {
    /// Declared by the controller itself
    #[default]
    Declared,
    /// Compiler or code-generator synthesized member (accessors, glue)
    Synthesized,
    /// Inherited from the base controller abstraction
    Framework,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterMeta {
    pub name: String,
    pub type_name: String,
    pub required: bool,
    pub kind: ParameterKind,
    pub location: ParameterLocation,
    /// Explicit binding name, overrides `name` when matching request values
    pub prefix: Option<String>,
}

impl ParameterMeta {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        type_name: impl Into<String>,
        location: ParameterLocation,
    ) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            required: true,
            kind: ParameterKind::Simple,
            location,
            prefix: None,
        }
    }

    #[must_use]
    pub fn path(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self::new(name, type_name, ParameterLocation::Path)
    }

    #[must_use]
    pub fn query(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self::new(name, type_name, ParameterLocation::Query)
    }

    /// A composite parameter bound from the request body.
    #[must_use]
    pub fn body(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self::new(name, type_name, ParameterLocation::Body).composite()
    }

    #[must_use]
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    #[must_use]
    pub fn composite(mut self) -> Self {
        self.kind = ParameterKind::Composite;
        self
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Name the request must supply for this parameter to bind.
    #[inline]
    #[must_use]
    pub fn binding_name(&self) -> &str {
        self.prefix.as_deref().unwrap_or(&self.name)
    }

    /// True when selection must see this parameter among the route or query values.
    #[inline]
    #[must_use]
    pub fn is_required_from_uri(&self) -> bool {
        self.required && self.kind == ParameterKind::Simple && self.location.is_uri()
    }
}

/// Verb prefixes recognised when a handler declares no methods.
const VERB_PREFIXES: [(&str, Method); 7] = [
    ("get", Method::GET),
    ("post", Method::POST),
    ("put", Method::PUT),
    ("delete", Method::DELETE),
    ("head", Method::HEAD),
    ("options", Method::OPTIONS),
    ("patch", Method::PATCH),
];

/// Metadata for one handler method a controller exposes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerMeta {
    pub name: String,
    /// Declared methods; empty means "infer from the name"
    pub methods: Vec<Method>,
    pub parameters: Vec<ParameterMeta>,
    /// Names that must be present in the URI even though no parameter binds them
    pub extra_uri_parameters: Vec<String>,
    pub origin: HandlerOrigin,
}

impl HandlerMeta {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: Vec::new(),
            parameters: Vec::new(),
            extra_uri_parameters: Vec::new(),
            origin: HandlerOrigin::Declared,
        }
    }

    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        if !self.methods.contains(&method) {
            self.methods.push(method);
        }
        self
    }

    #[must_use]
    pub fn param(mut self, parameter: ParameterMeta) -> Self {
        self.parameters.push(parameter);
        self
    }

    #[must_use]
    pub fn extra_uri_parameter(mut self, name: impl Into<String>) -> Self {
        self.extra_uri_parameters.push(name.into());
        self
    }

    #[must_use]
    pub fn origin(mut self, origin: HandlerOrigin) -> Self {
        self.origin = origin;
        self
    }

    /// Only controller-declared handlers are actions.
    #[inline]
    #[must_use]
    pub fn is_action_candidate(&self) -> bool {
        self.origin == HandlerOrigin::Declared
    }

    /// Methods the handler accepts, never empty.
    ///
    /// Declared methods win. Otherwise the method is inferred from a verb prefix
    /// on the handler name (`GetWidget` → GET), falling back to POST.
    #[must_use]
    pub fn effective_methods(&self) -> SmallVec<[Method; 4]> {
        if !self.methods.is_empty() {
            return self.methods.iter().cloned().collect();
        }
        let inferred = VERB_PREFIXES
            .iter()
            .find(|(prefix, _)| {
                self.name.len() >= prefix.len()
                    && self.name.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
            })
            .map(|(_, method)| method.clone())
            .unwrap_or(Method::POST);
        smallvec::smallvec![inferred]
    }

    /// Render `Controller::Name(param: Type, ...)` for diagnostics.
    #[must_use]
    pub fn signature(&self, controller: &str) -> String {
        let params: Vec<String> = self
            .parameters
            .iter()
            .map(|p| format!("{}: {}", p.name, p.type_name))
            .collect();
        format!("{}::{}({})", controller, self.name, params.join(", "))
    }
}

/// Controller metadata collaborator.
///
/// Implementors describe one controller identity and the handlers it exposes,
/// however that list was produced (static registration, codegen, manifest).
pub trait ControllerMetadata: Send + Sync {
    /// Stable identity used as the inventory cache key
    fn id(&self) -> ControllerId;
    /// Controller name as it appears in route values
    fn name(&self) -> &str;
    /// Handlers in declaration order
    fn handlers(&self) -> &[HandlerMeta];
}

/// Concrete, statically registered controller description.
///
/// The identity is tied to one handler list: a clone shares it, and any change
/// to the handlers mints a fresh one, so cached inventories never go stale.
#[derive(Debug, Clone)]
pub struct ControllerSpec {
    id: ControllerId,
    name: String,
    handlers: Vec<HandlerMeta>,
}

impl ControllerSpec {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ControllerId::new(),
            name: name.into(),
            handlers: Vec::new(),
        }
    }

    #[must_use]
    pub fn handler(mut self, handler: HandlerMeta) -> Self {
        self.handlers.push(handler);
        self.id = ControllerId::new();
        self
    }

    #[must_use]
    pub fn with_handlers(mut self, handlers: Vec<HandlerMeta>) -> Self {
        self.handlers = handlers;
        self.id = ControllerId::new();
        self
    }
}

impl ControllerMetadata for ControllerSpec {
    fn id(&self) -> ControllerId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn handlers(&self) -> &[HandlerMeta] {
        &self.handlers
    }
}
