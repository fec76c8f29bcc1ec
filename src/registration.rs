//! Service registry: declarative bindings and pre-built instances.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use crate::key::key_of_type;
use crate::value::AnyArc;

/// Service bindings collected at bootstrap.
///
/// Holds two maps: service identifier → concrete type identifier, and
/// service identifier → pre-built instance. Registering an instance also
/// binds the identifier to itself, so `has` sees it.
///
/// The registry is plain data. Once handed to [`Container::new`] behind
/// an `Arc` it is only ever read.
///
/// [`Container::new`]: crate::Container::new
///
/// # Examples
///
/// ```rust
/// use mika::ServiceRegistry;
///
/// struct Settings { port: u16 }
///
/// let mut registry = ServiceRegistry::new();
/// registry.register("App\\StreamFactoryInterface", Some("App\\StreamFactory"));
/// registry.register("App\\Baz", None);
/// registry.register_object("App\\Settings", Settings { port: 8080 });
///
/// assert_eq!(registry.binding("App\\StreamFactoryInterface"), Some("App\\StreamFactory"));
/// assert_eq!(registry.binding("App\\Baz"), Some("App\\Baz"));
/// assert!(registry.object("App\\Settings").is_some());
/// ```
#[derive(Clone, Default)]
pub struct ServiceRegistry {
    services: HashMap<String, String>,
    objects: HashMap<String, AnyArc>,
}

impl ServiceRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `id` to `concrete`, or to itself when `concrete` is `None`.
    /// Replaces any earlier binding for `id`.
    pub fn register(&mut self, id: impl Into<String>, concrete: Option<&str>) -> &mut Self {
        let id = id.into();
        let concrete = concrete.map(str::to_string).unwrap_or_else(|| id.clone());
        self.services.insert(id, concrete);
        self
    }

    /// Binds `id` to a pre-built instance returned verbatim by every `get`.
    pub fn register_object<T: Any + Send + Sync>(&mut self, id: impl Into<String>, instance: T) -> &mut Self {
        self.register_shared(id, Arc::new(instance))
    }

    /// Like [`register_object`](Self::register_object) for an instance that
    /// is already shared.
    pub fn register_shared(&mut self, id: impl Into<String>, instance: AnyArc) -> &mut Self {
        let id = id.into();
        self.register(id.clone(), None);
        self.objects.insert(id, instance);
        self
    }

    /// Registers an instance under its own type name.
    pub fn register_instance<T: Any + Send + Sync>(&mut self, instance: T) -> &mut Self {
        self.register_object(key_of_type::<T>(), instance)
    }

    /// Concrete type bound to `id`.
    pub fn binding(&self, id: &str) -> Option<&str> {
        self.services.get(id).map(String::as_str)
    }

    /// Pre-built instance registered under `id`.
    pub fn object(&self, id: &str) -> Option<&AnyArc> {
        self.objects.get(id)
    }

    /// True if `id` has a binding.
    pub fn contains(&self, id: &str) -> bool {
        self.services.contains_key(id)
    }

    /// All bindings, keyed by service identifier.
    pub fn services(&self) -> &HashMap<String, String> {
        &self.services
    }

    /// All pre-built instances, keyed by service identifier.
    pub fn service_objects(&self) -> &HashMap<String, AnyArc> {
        &self.objects
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.services.len()
    }

    /// True if nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

impl std::fmt::Debug for ServiceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceRegistry")
            .field("services", &self.services)
            .field("objects", &self.objects.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_registration_wins() {
        let mut registry = ServiceRegistry::new();
        registry.register("Foo", Some("FooA"));
        registry.register("Foo", Some("FooB"));

        assert_eq!(registry.binding("Foo"), Some("FooB"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_register_instance_is_keyed_by_type() {
        struct Settings {
            port: u16,
        }

        let mut registry = ServiceRegistry::new();
        registry.register_instance(Settings { port: 8080 });

        let id = key_of_type::<Settings>();
        assert!(registry.contains(id));
        assert_eq!(registry.services()[id], id);
        assert_eq!(registry.service_objects().len(), 1);
        let settings = registry.object(id).unwrap().clone().downcast::<Settings>().unwrap();
        assert_eq!(settings.port, 8080);
    }

    #[test]
    fn test_register_object_creates_self_binding() {
        let mut registry = ServiceRegistry::new();
        registry.register("Config", Some("JsonConfig"));
        registry.register_object("Config", 7u8);

        assert_eq!(registry.binding("Config"), Some("Config"));
        assert!(registry.object("Config").is_some());
    }
}
