//! Route table: route name → ordered controller identifiers.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::http::{Request, Response};

/// Handler type of a restful route.
pub type RestfulAction = Arc<dyn Fn(&Request) -> Response + Send + Sync>;

/// A path-pattern route bound directly to a callable.
#[derive(Clone)]
pub struct RestfulRoute {
    route: String,
    action: RestfulAction,
    allowed_methods: Vec<String>,
}

impl RestfulRoute {
    /// Creates a route. An empty `allowed_methods` allows any method.
    pub fn new(route: impl Into<String>, action: RestfulAction, allowed_methods: Vec<String>) -> Self {
        Self {
            route: route.into(),
            action,
            allowed_methods,
        }
    }

    /// Route pattern.
    pub fn route(&self) -> &str {
        &self.route
    }

    /// Bound handler.
    pub fn action(&self) -> &RestfulAction {
        &self.action
    }

    /// Empty means any method is allowed.
    pub fn allowed_methods(&self) -> &[String] {
        &self.allowed_methods
    }

    /// True if `method` may call this route, ignoring case.
    pub fn allows(&self, method: &str) -> bool {
        self.allowed_methods.is_empty()
            || self
                .allowed_methods
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(method))
    }

    /// Runs the handler.
    pub fn call(&self, request: &Request) -> Response {
        (self.action)(request)
    }
}

impl fmt::Debug for RestfulRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestfulRoute")
            .field("route", &self.route)
            .field("allowed_methods", &self.allowed_methods)
            .finish()
    }
}

/// Registered routes.
///
/// Controller lists are supplied already discovered, in the order the
/// dispatcher should try them.
///
/// # Examples
///
/// ```rust
/// use mika::RouteConfig;
///
/// let mut routes = RouteConfig::new();
/// routes.register("foo", [
///     "App\\Foo\\Controllers\\BarController",
///     "App\\Foo\\Controllers\\DefaultController",
/// ]);
/// routes.register("empty", Vec::<String>::new());
///
/// assert_eq!(routes.route("foo").map(|c| c.len()), Some(2));
/// assert!(!routes.has_route("empty"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouteConfig {
    routes: HashMap<String, Vec<String>>,
    restful: Vec<RestfulRoute>,
}

impl RouteConfig {
    /// Empty route table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `route` to `controllers`. An empty list leaves the table
    /// unchanged; a non-empty one replaces any earlier binding.
    pub fn register<I, S>(&mut self, route: impl Into<String>, controllers: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let controllers: Vec<String> = controllers.into_iter().map(Into::into).collect();
        if !controllers.is_empty() {
            self.routes.insert(route.into(), controllers);
        }
        self
    }

    /// Stores a restful route. An empty `allowed_methods` allows any method.
    pub fn register_restful<F, I, S>(&mut self, route: impl Into<String>, action: F, allowed_methods: I) -> &mut Self
    where
        F: Fn(&Request) -> Response + Send + Sync + 'static,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.restful.push(RestfulRoute::new(
            route,
            Arc::new(action),
            allowed_methods.into_iter().map(Into::into).collect(),
        ));
        self
    }

    /// All routes, keyed by name.
    pub fn routes(&self) -> &HashMap<String, Vec<String>> {
        &self.routes
    }

    /// Controller identifiers registered for `name`.
    pub fn route(&self, name: &str) -> Option<&[String]> {
        self.routes.get(name).map(Vec::as_slice)
    }

    /// True if `name` has controllers.
    pub fn has_route(&self, name: &str) -> bool {
        self.routes.contains_key(name)
    }

    /// Stored restful routes, in registration order.
    pub fn restful_routes(&self) -> &[RestfulRoute] {
        &self.restful
    }
}
