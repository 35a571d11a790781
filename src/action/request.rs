use super::inventory::names_eq;
use crate::selector::SelectionError;
use http::Method;
use smallvec::SmallVec;
use std::borrow::Cow;
use std::sync::Arc;

/// Reserved route value naming the controller.
pub const CONTROLLER_KEY: &str = "controller";
/// Reserved route value naming the action.
pub const ACTION_KEY: &str = "action";

/// Maximum number of route values / query names before heap allocation.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Stack-allocated route value storage, same shape as the router's path params.
pub type RouteValues = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// Query parameter names; values are the binder's business, not selection's.
pub type QueryNames = SmallVec<[Box<str>; MAX_INLINE_PARAMS]>;

/// What selection needs to know about one request.
#[derive(Debug, Clone)]
pub struct ActionRequest {
    method: Method,
    route_values: RouteValues,
    query_names: QueryNames,
}

impl ActionRequest {
    #[must_use]
    pub fn builder() -> ActionRequestBuilder {
        ActionRequestBuilder::default()
    }

    #[inline]
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    #[inline]
    #[must_use]
    pub fn route_values(&self) -> &[(Arc<str>, String)] {
        &self.route_values
    }

    #[inline]
    #[must_use]
    pub fn query_names(&self) -> &[Box<str>] {
        &self.query_names
    }

    /// Route value by key, case-insensitive, last write wins.
    #[inline]
    #[must_use]
    pub fn route_value(&self, key: &str) -> Option<&str> {
        self.route_values
            .iter()
            .rfind(|(k, _)| names_eq(k, key))
            .map(|(_, v)| v.as_str())
    }

    #[inline]
    #[must_use]
    pub fn controller(&self) -> Option<&str> {
        self.route_value(CONTROLLER_KEY).filter(|v| !v.is_empty())
    }

    /// Action name from the route, if the route template supplied a non-empty one.
    #[inline]
    #[must_use]
    pub fn action(&self) -> Option<&str> {
        self.route_value(ACTION_KEY).filter(|v| !v.is_empty())
    }

    /// Route keys and query names selection may match required parameters against.
    ///
    /// The controller key never counts; the action key is dropped only when it
    /// carried an action name. Duplicates collapse case-insensitively.
    #[must_use]
    pub fn available_parameter_names(&self) -> SmallVec<[&str; 16]> {
        let skip_action = self.action().is_some();
        let route_keys = self
            .route_values
            .iter()
            .map(|(k, _)| k.as_ref())
            .filter(|k| !names_eq(k, CONTROLLER_KEY) && !(skip_action && names_eq(k, ACTION_KEY)));
        let query = self.query_names.iter().map(|q| q.as_ref());

        let mut names: SmallVec<[&str; 16]> = SmallVec::new();
        for name in route_keys.chain(query) {
            if !names.iter().any(|n| names_eq(n, name)) {
                names.push(name);
            }
        }
        names
    }
}

/// Builder for [`ActionRequest`].
///
/// The method is required; `build` fails fast with
/// [`SelectionError::InvalidArgument`] when it was never set.
#[derive(Debug, Default, Clone)]
pub struct ActionRequestBuilder {
    method: Option<Method>,
    route_values: RouteValues,
    query_names: QueryNames,
}

impl ActionRequestBuilder {
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    #[must_use]
    pub fn controller(self, name: impl Into<String>) -> Self {
        self.route_value(CONTROLLER_KEY, name)
    }

    #[must_use]
    pub fn action(self, name: impl Into<String>) -> Self {
        self.route_value(ACTION_KEY, name)
    }

    #[must_use]
    pub fn route_value(mut self, key: &str, value: impl Into<String>) -> Self {
        self.route_values.push((Arc::from(key), value.into()));
        self
    }

    /// Copy every route value produced by the routing table.
    #[must_use]
    pub fn route_values<K, V, I>(mut self, values: I) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        for (k, v) in values {
            self.route_values.push((Arc::from(k.as_ref()), v.into()));
        }
        self
    }

    #[must_use]
    pub fn query_param(mut self, name: &str) -> Self {
        if !name.is_empty() {
            self.query_names.push(name.into());
        }
        self
    }

    /// Record the parameter names of a raw query string (`a=1&b=&c=3`).
    ///
    /// A leading `?` is ignored and names are percent-decoded. A bare token
    /// such as `flag` is a value without a name and is not recorded, nor is an
    /// empty name (`=x`).
    #[must_use]
    pub fn query_string(mut self, query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        for pair in query.split('&') {
            let Some((raw, _)) = pair.split_once('=') else {
                continue;
            };
            if raw.is_empty() {
                continue;
            }
            let plus_decoded: Cow<'_, str> = if raw.contains('+') {
                Cow::Owned(raw.replace('+', " "))
            } else {
                Cow::Borrowed(raw)
            };
            let name = match urlencoding::decode(&plus_decoded) {
                Ok(decoded) => decoded.into_owned(),
                Err(_) => plus_decoded.into_owned(),
            };
            if !name.is_empty() {
                self.query_names.push(name.into_boxed_str());
            }
        }
        self
    }

    pub fn build(self) -> Result<ActionRequest, SelectionError> {
        let method = self
            .method
            .ok_or(SelectionError::InvalidArgument("request method is required"))?;
        Ok(ActionRequest {
            method,
            route_values: self.route_values,
            query_names: self.query_names,
        })
    }
}
