//! # mika
//!
//! A minimal web-application scaffold: a descriptor-driven service
//! container and a convention-based request dispatcher.
//!
//! ## Features
//!
//! - **Descriptor-driven construction**: types declare their constructor and
//!   method parameters in a [`TypeCatalog`]; the [`Container`] resolves
//!   service-typed parameters recursively and takes scalars from the caller
//! - **Interface bindings**: map abstract identifiers onto concrete types,
//!   or onto pre-built shared instances
//! - **Circular dependency detection**: reported with the full path
//! - **Convention routing**: `/main/secondary/action` selects a controller by
//!   name among those registered for `main`, and calls `{action}Action`
//! - **Before/after hooks**: observers can inspect calls and rewrite responses
//!
//! ## Quick Start
//!
//! ```rust
//! use mika::*;
//! use std::sync::Arc;
//!
//! struct Greeter;
//!
//! impl Greeter {
//!     fn greet(&self, name: &str) -> String {
//!         format!("Hello, {}", name)
//!     }
//! }
//!
//! struct HelloController {
//!     greeter: Arc<Greeter>,
//! }
//!
//! let mut catalog = TypeCatalog::new();
//! catalog.define(TypeDef::<Greeter>::new("App\\Greeter").constructor([], |_| Ok(Greeter)));
//! catalog.define(
//!     TypeDef::<HelloController>::new("App\\Web\\HelloController")
//!         .constructor([MethodParameter::service("greeter", "App\\GreeterInterface")], |args| {
//!             Ok(HelloController { greeter: args.service("greeter")? })
//!         })
//!         .action("nameAction", [MethodParameter::string("name")], |c, args| {
//!             Ok(Response::new(c.greeter.greet(args.str("name")?)))
//!         }),
//! );
//!
//! let mut registry = ServiceRegistry::new();
//! registry.register("App\\GreeterInterface", Some("App\\Greeter"));
//!
//! let mut routes = RouteConfig::new();
//! routes.register("web", ["App\\Web\\HelloController"]);
//!
//! let app = Application::new(Arc::new(registry), Arc::new(catalog), Arc::new(routes));
//! let response = app.handle(Request::get("/web/hello/name?name=Mika")).unwrap();
//! assert_eq!(response.body_text(), "Hello, Mika");
//! ```
//!
//! ## Errors
//!
//! Container failures are [`DiError`]; dispatch wraps them in
//! [`RouteError`] next to its own `NotFound`. Nothing is retried or
//! swallowed along the way.
//!
//! ```rust
//! use mika::*;
//! use std::sync::Arc;
//!
//! let app = Application::new(
//!     Arc::new(ServiceRegistry::new()),
//!     Arc::new(TypeCatalog::new()),
//!     Arc::new(RouteConfig::new()),
//! );
//! let error = app.handle(Request::get("/missing")).unwrap_err();
//! assert_eq!(error.to_string(), "Route missing is not registered");
//! assert_eq!(error.status_code(), 404);
//! ```

pub mod app;
pub mod catalog;
pub mod coerce;
pub mod config;
pub mod container;
pub mod descriptors;
pub mod error;
pub mod http;
pub mod key;
pub mod logging;
pub mod observer;
pub mod registration;
pub mod route;
pub mod traits;
pub mod value;

pub use app::Application;
pub use catalog::{TypeCatalog, TypeDef, TypeEntry};
pub use config::Settings;
pub use container::Container;
pub use descriptors::{MethodDescriptor, MethodParameter, ParamType, ScalarKind, CONSTRUCTOR};
pub use error::{ConfigError, DiError, DiResult, RouteError, RouteResult};
pub use http::{Request, Response};
pub use key::{key_of_type, simple_name};
pub use logging::{LogConfig, LogFormat};
pub use observer::{ActionObserver, Observers, TracingObserver};
pub use registration::ServiceRegistry;
pub use route::events;
pub use route::{RestfulRoute, Route, RouteConfig, RouteNaming, RoutePath};
pub use traits::{Resolver, ResolverCore};
pub use value::{AnyArc, Arguments, Value};
