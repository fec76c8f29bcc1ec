//! The service container.
//!
//! A [`Container`] is created per request from a shared, read-only
//! [`ServiceRegistry`] and the [`TypeCatalog`]. Registrations made on the
//! container itself land in a request-local overlay that is consulted
//! before the shared registry.

use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::catalog::TypeCatalog;
use crate::descriptors::CONSTRUCTOR;
use crate::error::{DiError, DiResult};
use crate::http::Response;
use crate::registration::ServiceRegistry;
use crate::traits::ResolverCore;
use crate::value::{AnyArc, Arguments};

mod resolve;

/// Request-scoped service container.
///
/// Constructed services are never cached: every [`get`] on a bound
/// identifier builds a fresh instance. Only instances registered as
/// objects are shared, and those are returned verbatim every time.
///
/// [`get`]: ResolverCore::get
///
/// # Examples
///
/// ```
/// use mika::{Container, MethodParameter, Resolver, ResolverCore, ServiceRegistry, TypeCatalog, TypeDef};
/// use std::sync::Arc;
///
/// #[derive(Default)]
/// struct Bar;
/// struct Foo { bar: Arc<Bar> }
///
/// let mut catalog = TypeCatalog::new();
/// catalog.define(TypeDef::<Bar>::new("App\\Bar").default_constructor());
/// catalog.define(
///     TypeDef::<Foo>::new("App\\Foo")
///         .constructor([MethodParameter::service("bar", "App\\BarInterface")], |args| {
///             Ok(Foo { bar: args.service("bar")? })
///         }),
/// );
///
/// let mut registry = ServiceRegistry::new();
/// registry.register("App\\BarInterface", Some("App\\Bar"));
/// registry.register("App\\FooInterface", Some("App\\Foo"));
///
/// let container = Container::new(Arc::new(registry), Arc::new(catalog));
/// assert!(container.has("App\\FooInterface"));
/// let foo = container.resolve::<Foo>("App\\FooInterface").unwrap();
/// let _bar: &Bar = &foo.bar;
/// ```
pub struct Container {
    shared: Arc<ServiceRegistry>,
    local: ServiceRegistry,
    catalog: Arc<TypeCatalog>,
    constructing: RefCell<Vec<String>>,
}

impl Container {
    /// Container over the shared registry, with an empty local overlay.
    pub fn new(shared: Arc<ServiceRegistry>, catalog: Arc<TypeCatalog>) -> Self {
        debug!(
            services = shared.len(),
            types = catalog.len(),
            "Creating container"
        );
        Self {
            shared,
            local: ServiceRegistry::new(),
            catalog,
            constructing: RefCell::new(Vec::new()),
        }
    }

    /// Binds `id` to `concrete` (or to itself) for this container only.
    pub fn register(&mut self, id: impl Into<String>, concrete: Option<&str>) -> &mut Self {
        let id = id.into();
        trace!(service = %id, concrete = ?concrete, "Registering binding");
        self.local.register(id, concrete);
        self
    }

    /// Binds `id` to a permanent instance for this container only.
    pub fn register_object<T: Any + Send + Sync>(&mut self, id: impl Into<String>, instance: T) -> &mut Self {
        self.register_shared(id, Arc::new(instance))
    }

    /// Like [`register_object`](Self::register_object) for an instance that is already shared.
    pub fn register_shared(&mut self, id: impl Into<String>, instance: AnyArc) -> &mut Self {
        let id = id.into();
        trace!(service = %id, "Registering object");
        self.local.register_shared(id, instance);
        self
    }

    /// The catalog objects are built from.
    pub fn catalog(&self) -> &TypeCatalog {
        &self.catalog
    }

    fn binding(&self, id: &str) -> Option<&str> {
        self.local.binding(id).or_else(|| self.shared.binding(id))
    }

    fn singleton(&self, id: &str) -> Option<&AnyArc> {
        self.local.object(id).or_else(|| self.shared.object(id))
    }

    fn enter(&self, type_id: &str) -> DiResult<ConstructionGuard<'_>> {
        let mut stack = self.constructing.borrow_mut();
        if stack.iter().any(|t| t == type_id) {
            let mut path = stack.clone();
            path.push(type_id.to_string());
            return Err(DiError::Circular(path));
        }
        stack.push(type_id.to_string());
        Ok(ConstructionGuard {
            stack: &self.constructing,
        })
    }
}

/// Pops the construction stack on every exit path.
struct ConstructionGuard<'a> {
    stack: &'a RefCell<Vec<String>>,
}

impl Drop for ConstructionGuard<'_> {
    fn drop(&mut self) {
        self.stack.borrow_mut().pop();
    }
}

impl ResolverCore for Container {
    fn has(&self, id: &str) -> bool {
        self.binding(id).is_some()
    }

    fn get(&self, id: &str) -> DiResult<AnyArc> {
        let Some(concrete) = self.binding(id) else {
            debug!(service = id, "Service not found in container");
            return Err(DiError::ServiceNotFound(id.to_string()));
        };

        if let Some(instance) = self.singleton(id) {
            trace!(service = id, "Returning registered object");
            return Ok(instance.clone());
        }

        self.create_object(concrete)
    }

    fn create_object(&self, type_id: &str) -> DiResult<AnyArc> {
        let _guard = self.enter(type_id)?;

        let args = self.create_method_depends(type_id, CONSTRUCTOR, &HashMap::new())?;
        let factory = self
            .catalog
            .get(type_id)
            .and_then(|entry| entry.factory())
            .ok_or_else(|| DiError::ClassNotFound(type_id.to_string()))?;

        let instance = factory(&args)?;
        debug!(class = type_id, "Object created");
        Ok(instance)
    }

    fn create_method_depends(
        &self,
        type_id: &str,
        method: &str,
        known: &HashMap<String, String>,
    ) -> DiResult<Arguments> {
        let parameters = self.catalog.parameters(type_id, method)?;
        trace!(
            class = type_id,
            method,
            parameters = parameters.len(),
            "Resolving method dependencies"
        );
        resolve::method_depends(self, parameters, method, known)
    }

    fn call_action(
        &self,
        type_id: &str,
        method: &str,
        target: &AnyArc,
        args: &Arguments,
    ) -> DiResult<Response> {
        let handler = self
            .catalog
            .get(type_id)
            .and_then(|entry| entry.handler(method))
            .ok_or_else(|| DiError::MethodNotFound {
                type_name: type_id.to_string(),
                method: method.to_string(),
            })?;
        handler(target, args)
    }
}

impl std::fmt::Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Container")
            .field("shared", &self.shared)
            .field("local", &self.local)
            .field("types", &self.catalog.len())
            .finish()
    }
}
