//! Convention-based request dispatch.
//!
//! A path `/main/secondary/action` selects the route `main`, the first
//! controller of that route whose simple name (minus `Controller`) equals
//! `secondary` with its first letter uppercased, and that controller's
//! `{action}Action` method.

use tracing::{debug, trace};

use crate::error::{RouteError, RouteResult};
use crate::http::{Request, Response};
use crate::key::{simple_name, strip_proper_suffix, upper_first};
use crate::observer::Observers;
use crate::traits::ResolverCore;
use crate::value::AnyArc;

mod config;
pub mod events;
mod parser;

pub use config::{RestfulAction, RestfulRoute, RouteConfig};
pub use events::{ActionCall, AfterCallActionEvent, BeforeCallActionEvent};
pub use parser::{RouteNaming, RoutePath};

/// A controller instance together with the identifier it was built from.
#[derive(Clone)]
pub struct ResolvedController {
    pub type_id: String,
    pub instance: AnyArc,
}

impl std::fmt::Debug for ResolvedController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedController")
            .field("type_id", &self.type_id)
            .finish_non_exhaustive()
    }
}

/// Dispatcher for one request.
///
/// Parsing happens on construction. [`dispatch`](Route::dispatch) then
/// resolves the controller, binds the action arguments from the query
/// string, runs the before/after observer phases around the call and
/// returns the response carried by the after-event.
///
/// # Examples
///
/// ```
/// use mika::*;
/// use std::sync::Arc;
///
/// #[derive(Default)]
/// struct BarController;
///
/// let mut catalog = TypeCatalog::new();
/// catalog.define(
///     TypeDef::<BarController>::new("App\\Foo\\BarController")
///         .default_constructor()
///         .action("bazAction", [], |_, _| Ok(Response::new("baz"))),
/// );
///
/// let mut routes = RouteConfig::new();
/// routes.register("foo", ["App\\Foo\\BarController"]);
///
/// let container = Container::new(Arc::new(ServiceRegistry::new()), Arc::new(catalog));
/// let observers = Observers::new();
/// let request = Request::get("/foo/bar/baz");
///
/// let route = Route::new(&routes, &request, &container, &observers);
/// assert_eq!(route.current(), "/foo/bar/baz");
/// assert_eq!(route.dispatch().unwrap().body_text(), "baz");
/// ```
pub struct Route<'a> {
    routes: &'a RouteConfig,
    request: &'a Request,
    resolver: &'a dyn ResolverCore,
    observers: &'a Observers,
    naming: RouteNaming,
    path: RoutePath,
}

impl<'a> Route<'a> {
    /// Dispatcher using the default naming conventions.
    pub fn new(
        routes: &'a RouteConfig,
        request: &'a Request,
        resolver: &'a dyn ResolverCore,
        observers: &'a Observers,
    ) -> Self {
        Self::with_naming(routes, request, resolver, observers, RouteNaming::default())
    }

    /// Dispatcher using custom segment and suffix conventions.
    pub fn with_naming(
        routes: &'a RouteConfig,
        request: &'a Request,
        resolver: &'a dyn ResolverCore,
        observers: &'a Observers,
        naming: RouteNaming,
    ) -> Self {
        let path = RoutePath::parse_with(request.path(), &naming.default_segment);
        trace!(path = request.path(), current = %path.current(), "Parsed request path");
        Self {
            routes,
            request,
            resolver,
            observers,
            naming,
            path,
        }
    }

    /// Parsed request path.
    pub fn path(&self) -> &RoutePath {
        &self.path
    }

    /// Canonical `/main/secondary/action` form of the path.
    pub fn current(&self) -> String {
        self.path.current()
    }

    /// Route name segment.
    pub fn main(&self) -> &str {
        self.path.main()
    }

    /// Controller segment.
    pub fn secondary(&self) -> &str {
        self.path.secondary()
    }

    /// Action segment.
    pub fn action(&self) -> &str {
        self.path.action()
    }

    /// Method name the action segment maps to.
    pub fn action_method(&self) -> String {
        self.naming.action_method(self.path.action())
    }

    /// The route table being dispatched against.
    pub fn routes(&self) -> &RouteConfig {
        self.routes
    }

    /// True if `controller` structurally matches the secondary segment.
    pub fn matches(&self, controller: &str) -> bool {
        let name = strip_proper_suffix(simple_name(controller), &self.naming.controller_suffix);
        name == upper_first(self.path.secondary())
    }

    /// Identifier of the first controller matching the secondary segment.
    pub fn controller_type(&self) -> RouteResult<&'a str> {
        let main = self.path.main();
        let controllers = self
            .routes
            .route(main)
            .ok_or_else(|| RouteError::NotFound(format!("Route {} is not registered", main)))?;

        controllers
            .iter()
            .map(String::as_str)
            .find(|controller| self.matches(controller))
            .ok_or_else(|| RouteError::NotFound(format!("Controller for {} is not found", self.current())))
    }

    /// Finds and constructs the controller for this request.
    pub fn resolve_controller(&self) -> RouteResult<ResolvedController> {
        let type_id = self.controller_type()?;
        debug!(route = self.path.main(), controller = type_id, "Controller matched");
        let instance = self.resolver.create_object(type_id)?;
        Ok(ResolvedController {
            type_id: type_id.to_string(),
            instance,
        })
    }

    /// Resolves, invokes and post-processes the action for this request.
    pub fn dispatch(&self) -> RouteResult<Response> {
        let controller = self.resolve_controller()?;
        let method = self.action_method();

        let depends = self.resolver.create_method_depends(
            &controller.type_id,
            &method,
            self.request.query_params(),
        )?;

        let call = events::ActionCall::new(controller.type_id.as_str(), method.as_str(), depends.clone());
        self.observers.publish_before(BeforeCallActionEvent::new(call.clone()));

        let response = self
            .resolver
            .call_action(&controller.type_id, &method, &controller.instance, &depends)?;

        let event = self.observers.publish_after(AfterCallActionEvent::new(call, response));
        debug!(
            controller = %controller.type_id,
            action = %method,
            status = event.response().status(),
            "Action dispatched"
        );
        Ok(event.into_response())
    }
}

impl std::fmt::Debug for Route<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Route")
            .field("path", &self.path)
            .field("naming", &self.naming)
            .finish_non_exhaustive()
    }
}
