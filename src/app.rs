//! Per-request bootstrap.

use std::borrow::Cow;
use std::sync::Arc;

use tracing::{debug, info_span};

use crate::catalog::TypeCatalog;
use crate::config::Settings;
use crate::container::Container;
use crate::error::RouteResult;
use crate::http::{Request, Response};
use crate::key::key_of_type;
use crate::observer::{Observers, TracingObserver};
use crate::registration::ServiceRegistry;
use crate::route::{Route, RouteConfig};

/// Everything assembled at startup, shared by all requests.
///
/// [`handle`](Application::handle) builds a fresh [`Container`] over the
/// shared registry, registers the request in it under
/// `key_of_type::<Request>()` and dispatches.
///
/// # Examples
///
/// ```
/// use mika::*;
/// use std::sync::Arc;
///
/// struct IndexController { request: Arc<Request> }
///
/// let mut catalog = TypeCatalog::new();
/// catalog.define(
///     TypeDef::<IndexController>::new("App\\Site\\IndexController")
///         .constructor([MethodParameter::of::<Request>("request")], |args| {
///             Ok(IndexController { request: args.service("request")? })
///         })
///         .action("defaultAction", [], |c, _| Ok(Response::new(c.request.method().to_string()))),
/// );
///
/// let mut routes = RouteConfig::new();
/// routes.register("site", ["App\\Site\\IndexController"]);
///
/// let app = Application::new(Arc::new(ServiceRegistry::new()), Arc::new(catalog), Arc::new(routes));
/// let response = app.handle(Request::get("/site/index")).unwrap();
/// assert_eq!(response.body_text(), "GET");
/// ```
#[derive(Clone)]
pub struct Application {
    registry: Arc<ServiceRegistry>,
    catalog: Arc<TypeCatalog>,
    routes: Arc<RouteConfig>,
    observers: Observers,
    settings: Settings,
}

impl Application {
    /// Application with default settings and no observers.
    pub fn new(registry: Arc<ServiceRegistry>, catalog: Arc<TypeCatalog>, routes: Arc<RouteConfig>) -> Self {
        Self {
            registry,
            catalog,
            routes,
            observers: Observers::new(),
            settings: Settings::default(),
        }
    }

    /// Replaces the registered observers.
    pub fn with_observers(mut self, observers: Observers) -> Self {
        self.observers = observers;
        self
    }

    /// Replaces the settings.
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Current settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Observers registered with [`with_observers`](Self::with_observers).
    pub fn observers(&self) -> &Observers {
        &self.observers
    }

    /// Observers a request actually runs through: the registered ones,
    /// followed by a [`TracingObserver`] when `trace_actions` is set.
    pub fn pipeline(&self) -> Cow<'_, Observers> {
        if !self.settings.trace_actions {
            return Cow::Borrowed(&self.observers);
        }
        let mut observers = self.observers.clone();
        observers.add(Arc::new(TracingObserver::new()));
        Cow::Owned(observers)
    }

    /// The route table.
    pub fn routes(&self) -> &RouteConfig {
        &self.routes
    }

    /// The shared service registry.
    pub fn registry(&self) -> &ServiceRegistry {
        &self.registry
    }

    /// The type catalog.
    pub fn catalog(&self) -> &TypeCatalog {
        &self.catalog
    }

    /// Dispatches one request. Errors propagate unchanged.
    pub fn handle(&self, request: Request) -> RouteResult<Response> {
        let span = info_span!("request", method = request.method(), path = request.path());
        let _entered = span.enter();

        let request = Arc::new(request);
        let mut container = Container::new(self.registry.clone(), self.catalog.clone());
        container.register_shared(key_of_type::<Request>(), request.clone());

        let observers = self.pipeline();
        let route = Route::with_naming(
            &self.routes,
            &request,
            &container,
            &observers,
            self.settings.routing.clone(),
        );
        let result = route.dispatch();
        match &result {
            Ok(response) => debug!(status = response.status(), "Request handled"),
            Err(error) => debug!(status = error.status_code(), %error, "Request failed"),
        }
        result
    }
}

impl std::fmt::Debug for Application {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Application")
            .field("registry", &self.registry)
            .field("catalog", &self.catalog.len())
            .field("routes", &self.routes.routes().len())
            .field("observers", &self.observers)
            .field("settings", &self.settings)
            .finish()
    }
}
