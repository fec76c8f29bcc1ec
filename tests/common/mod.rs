//! Fixtures shared by the integration tests.
//!
//! Two routes: `foo` with a `BarController` and a `DefaultController`,
//! and `bar` with a `BarController` that needs a stream factory and the
//! current request.

#![allow(dead_code)]

use mika::*;
use std::sync::Arc;

pub const STREAM_FACTORY_INTERFACE: &str = "Psr\\Http\\Message\\StreamFactoryInterface";
pub const STREAM_FACTORY: &str = "App\\Http\\StreamFactory";

pub const FOO_BAR_CONTROLLER: &str = "App\\Foo\\Controllers\\BarController";
pub const FOO_DEFAULT_CONTROLLER: &str = "App\\Foo\\Controllers\\DefaultController";
pub const BAR_BAR_CONTROLLER: &str = "App\\Bar\\Controllers\\BarController";

#[derive(Debug, Default)]
pub struct StreamFactory;

#[derive(Debug, Default)]
pub struct FooBarController;

#[derive(Debug, Default)]
pub struct DefaultController;

#[derive(Debug)]
pub struct BarController {
    pub streams: Arc<StreamFactory>,
}

pub fn catalog() -> TypeCatalog {
    let mut catalog = TypeCatalog::new();

    catalog.define(TypeDef::<StreamFactory>::new(STREAM_FACTORY).default_constructor());

    catalog.define(
        TypeDef::<FooBarController>::new(FOO_BAR_CONTROLLER)
            .default_constructor()
            .action("bazAction", [], |_, _| {
                Ok(Response::new("I am an answer from BarController::bazAction"))
            }),
    );

    catalog.define(
        TypeDef::<DefaultController>::new(FOO_DEFAULT_CONTROLLER)
            .default_constructor()
            .action("defaultAction", [], |_, _| {
                Ok(Response::new("I am default method of the DefaultController"))
            })
            .action("checkEventAction", [], |_, _| {
                Ok(Response::new("Text that can not be reached"))
            }),
    );

    catalog.define(
        TypeDef::<BarController>::new(BAR_BAR_CONTROLLER)
            .constructor(
                [MethodParameter::service("streamFactory", STREAM_FACTORY_INTERFACE)],
                |args| {
                    Ok(BarController {
                        streams: args.service("streamFactory")?,
                    })
                },
            )
            .action("defaultAction", [MethodParameter::of::<Request>("request")], |_, args| {
                let request = args.service::<Request>("request")?;
                Ok(Response::new(format!("called method is: {}", request.method())))
            })
            .action(
                "frameworkNameAction",
                [
                    MethodParameter::of::<Request>("request"),
                    MethodParameter::string("name"),
                    MethodParameter::untyped("type"),
                    MethodParameter::int("age"),
                ],
                |_, args| {
                    let request = args.service::<Request>("request")?;
                    Ok(Response::new(format!(
                        "method: {}; name: {}; type: {}; age: {}",
                        request.method(),
                        args.str("name")?,
                        args.str("type")?,
                        args.int("age")?
                    )))
                },
            ),
    );

    catalog
}

pub fn registry() -> ServiceRegistry {
    let mut registry = ServiceRegistry::new();
    registry.register(STREAM_FACTORY_INTERFACE, Some(STREAM_FACTORY));
    registry
}

pub fn routes() -> RouteConfig {
    let mut routes = RouteConfig::new();
    routes.register("foo", [FOO_BAR_CONTROLLER, FOO_DEFAULT_CONTROLLER]);
    routes.register("bar", [BAR_BAR_CONTROLLER]);
    routes
}

/// Rewrites the body of `checkEventAction` responses.
pub fn change_body(mut event: events::AfterCallActionEvent) -> events::AfterCallActionEvent {
    if event.action_name() == "checkEventAction" {
        let response = event.response().with_body("body has changed by listener");
        event.set_response(response);
    }
    event
}

pub fn observers() -> Observers {
    let mut observers = Observers::new();
    observers.on_after(change_body);
    observers
}

pub fn app() -> Application {
    Application::new(Arc::new(registry()), Arc::new(catalog()), Arc::new(routes()))
        .with_observers(observers())
}

/// Container with `request` registered the way `Application` does it.
pub fn container_for(request: &Request) -> Container {
    let mut container = Container::new(Arc::new(registry()), Arc::new(catalog()));
    container.register_object(key_of_type::<Request>(), request.clone());
    container
}
