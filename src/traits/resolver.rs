//! Resolver traits for service resolution.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{DiError, DiResult};
use crate::value::{AnyArc, Arguments};

/// Object-safe resolution interface.
///
/// This is the contract the dispatcher relies on. [`Container`] is the
/// implementation shipped with the crate; tests and alternative
/// bootstraps can provide their own.
///
/// Most callers want the typed helpers of [`Resolver`] instead.
///
/// [`Container`]: crate::Container
pub trait ResolverCore {
    /// True iff a binding exists for `id`, whether or not constructing it
    /// would succeed.
    fn has(&self, id: &str) -> bool;

    /// Resolves a service identifier.
    ///
    /// A pre-built instance is returned as-is; otherwise the bound
    /// concrete type is constructed through
    /// [`create_object`](Self::create_object).
    fn get(&self, id: &str) -> DiResult<AnyArc>;

    /// Constructs `type_id` after resolving its constructor parameters.
    fn create_object(&self, type_id: &str) -> DiResult<AnyArc>;

    /// Resolves the declared parameters of `method` on `type_id`.
    ///
    /// Service-typed parameters are fetched with [`get`](Self::get);
    /// scalar and untyped parameters are taken from `known` by name.
    fn create_method_depends(
        &self,
        type_id: &str,
        method: &str,
        known: &HashMap<String, String>,
    ) -> DiResult<Arguments>;

    /// Invokes an action handler declared on `type_id`.
    fn call_action(
        &self,
        type_id: &str,
        method: &str,
        target: &AnyArc,
        args: &Arguments,
    ) -> DiResult<crate::http::Response>;
}

/// Typed helpers built on top of [`ResolverCore`].
///
/// # Examples
///
/// ```
/// use mika::{Container, Resolver, ServiceRegistry, TypeCatalog};
/// use std::sync::Arc;
///
/// struct Settings { port: u16 }
///
/// let mut registry = ServiceRegistry::new();
/// registry.register_object("App\\Settings", Settings { port: 8080 });
///
/// let container = Container::new(Arc::new(registry), Arc::new(TypeCatalog::new()));
/// let settings = container.resolve::<Settings>("App\\Settings").unwrap();
/// assert_eq!(settings.port, 8080);
/// ```
pub trait Resolver: ResolverCore {
    /// Resolves `id` and downcasts it to `T`.
    fn resolve<T: Any + Send + Sync>(&self, id: &str) -> DiResult<Arc<T>> {
        downcast(id, self.get(id)?)
    }

    /// Resolves `id` registered as an `Arc<dyn Trait>` instance.
    ///
    /// Trait objects are stored double-wrapped (`Arc<Arc<dyn Trait>>`)
    /// since `Any` needs a sized type.
    fn resolve_trait<T: ?Sized + Send + Sync + 'static>(&self, id: &str) -> DiResult<Arc<T>> {
        let outer = downcast::<Arc<T>>(id, self.get(id)?)?;
        Ok((*outer).clone())
    }

    /// Constructs `type_id` and downcasts the instance to `T`.
    fn create<T: Any + Send + Sync>(&self, type_id: &str) -> DiResult<Arc<T>> {
        downcast(type_id, self.create_object(type_id)?)
    }
}

impl<R: ResolverCore + ?Sized> Resolver for R {}

fn downcast<T: Any + Send + Sync>(id: &str, any: AnyArc) -> DiResult<Arc<T>> {
    any.downcast::<T>().map_err(|_| DiError::TypeMismatch {
        name: id.to_string(),
        expected: std::any::type_name::<T>(),
    })
}
