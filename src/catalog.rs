//! Type catalog: constructible types and their declared signatures.
//!
//! The catalog is the closed, build-time-known set of types the container
//! may instantiate. Each entry carries its constructor descriptor, a
//! factory turning resolved constructor arguments into an instance, the
//! descriptors of its callable methods, and typed handlers for the
//! methods that act as controller actions.

use std::any::Any;
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::descriptors::{MethodDescriptor, MethodParameter, CONSTRUCTOR};
use crate::error::{DiError, DiResult};
use crate::http::Response;
use crate::key::key_of_type;
use crate::value::{AnyArc, Arguments};

pub(crate) type Factory = Arc<dyn Fn(&Arguments) -> DiResult<AnyArc> + Send + Sync>;
pub(crate) type ActionHandler = Arc<dyn Fn(&AnyArc, &Arguments) -> DiResult<Response> + Send + Sync>;

struct MethodEntry {
    descriptor: MethodDescriptor,
    handler: Option<ActionHandler>,
}

/// Type-erased catalog entry.
pub struct TypeEntry {
    id: String,
    rust_type: &'static str,
    constructor: Option<MethodDescriptor>,
    factory: Option<Factory>,
    methods: HashMap<String, MethodEntry>,
}

impl TypeEntry {
    /// Identifier the entry is registered under.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Name of the Rust type backing this entry.
    pub fn rust_type(&self) -> &'static str {
        self.rust_type
    }

    /// False for abstract entries (declared without a constructor).
    pub fn is_instantiable(&self) -> bool {
        self.factory.is_some()
    }

    /// True if `name` is declared. The constructor always counts.
    pub fn has_method(&self, name: &str) -> bool {
        name == CONSTRUCTOR || self.methods.contains_key(name)
    }

    /// Descriptor of a declared method. The constructor is reported only
    /// when one was declared.
    pub fn method(&self, name: &str) -> Option<&MethodDescriptor> {
        if name == CONSTRUCTOR {
            return self.constructor.as_ref();
        }
        self.methods.get(name).map(|m| &m.descriptor)
    }

    /// Names of declared methods, constructor excluded.
    pub fn method_names(&self) -> impl Iterator<Item = &str> {
        self.methods.keys().map(String::as_str)
    }

    pub(crate) fn factory(&self) -> Option<&Factory> {
        self.factory.as_ref()
    }

    pub(crate) fn handler(&self, method: &str) -> Option<&ActionHandler> {
        self.methods.get(method).and_then(|m| m.handler.as_ref())
    }
}

impl std::fmt::Debug for TypeEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeEntry")
            .field("id", &self.id)
            .field("rust_type", &self.rust_type)
            .field("constructor", &self.constructor)
            .field("instantiable", &self.is_instantiable())
            .field("methods", &self.methods.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Builder for one catalog entry backed by the Rust type `T`.
///
/// # Examples
///
/// ```rust
/// use mika::{Arguments, MethodParameter, Response, TypeCatalog, TypeDef};
/// use std::sync::Arc;
///
/// struct Greeter { greeting: String }
///
/// struct HelloController { greeter: Arc<Greeter> }
///
/// impl HelloController {
///     fn name_action(&self, args: &Arguments) -> mika::DiResult<Response> {
///         Ok(Response::new(format!("{}, {}", self.greeter.greeting, args.str("name")?)))
///     }
/// }
///
/// let mut catalog = TypeCatalog::new();
/// catalog.define(
///     TypeDef::<Greeter>::new("App\\Greeter")
///         .constructor([], |_| Ok(Greeter { greeting: "Hello".into() })),
/// );
/// catalog.define(
///     TypeDef::<HelloController>::new("App\\Controllers\\HelloController")
///         .constructor([MethodParameter::service("greeter", "App\\Greeter")], |args| {
///             Ok(HelloController { greeter: args.service("greeter")? })
///         })
///         .action("nameAction", [MethodParameter::string("name")], HelloController::name_action),
/// );
///
/// assert!(catalog.contains("App\\Controllers\\HelloController"));
/// ```
pub struct TypeDef<T> {
    entry: TypeEntry,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Any + Send + Sync> TypeDef<T> {
    /// Entry without constructor or methods, registered under `id`.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            entry: TypeEntry {
                id: id.into(),
                rust_type: key_of_type::<T>(),
                constructor: None,
                factory: None,
                methods: HashMap::new(),
            },
            _marker: PhantomData,
        }
    }

    /// Entry keyed by `T`'s own type name.
    pub fn of() -> Self {
        Self::new(key_of_type::<T>())
    }

    /// Declares the constructor and the factory building `T` from its
    /// resolved parameters.
    pub fn constructor<P, F>(mut self, parameters: P, factory: F) -> Self
    where
        P: IntoIterator<Item = MethodParameter>,
        F: Fn(&Arguments) -> DiResult<T> + Send + Sync + 'static,
    {
        self.entry.constructor = Some(MethodDescriptor::new(CONSTRUCTOR, parameters));
        self.entry.factory = Some(Arc::new(move |args: &Arguments| -> DiResult<AnyArc> {
            Ok(Arc::new(factory(args)?))
        }));
        self
    }

    /// Declares a method signature without making it invocable.
    pub fn method<P>(mut self, name: impl Into<String>, parameters: P) -> Self
    where
        P: IntoIterator<Item = MethodParameter>,
    {
        let descriptor = MethodDescriptor::new(name, parameters);
        self.entry.methods.insert(
            descriptor.name.clone(),
            MethodEntry { descriptor, handler: None },
        );
        self
    }

    /// Declares an action method together with its handler.
    ///
    /// `name` is the full method name as the dispatcher looks it up, e.g.
    /// `"bazAction"` for the `/…/…/baz` path.
    pub fn action<P, F>(mut self, name: impl Into<String>, parameters: P, handler: F) -> Self
    where
        P: IntoIterator<Item = MethodParameter>,
        F: Fn(&T, &Arguments) -> DiResult<Response> + Send + Sync + 'static,
    {
        let descriptor = MethodDescriptor::new(name, parameters);
        let type_id = self.entry.id.clone();
        let handler: ActionHandler = Arc::new(move |target: &AnyArc, args: &Arguments| {
            let controller = target.downcast_ref::<T>().ok_or_else(|| DiError::TypeMismatch {
                name: type_id.clone(),
                expected: std::any::type_name::<T>(),
            })?;
            handler(controller, args)
        });
        self.entry.methods.insert(
            descriptor.name.clone(),
            MethodEntry {
                descriptor,
                handler: Some(handler),
            },
        );
        self
    }
}

impl<T: Any + Send + Sync + Default> TypeDef<T> {
    /// Parameterless constructor using `T::default()`.
    pub fn default_constructor(self) -> Self {
        self.constructor([], |_| Ok(T::default()))
    }
}

/// The set of types the container can introspect and instantiate.
#[derive(Debug, Default)]
pub struct TypeCatalog {
    types: HashMap<String, TypeEntry>,
}

impl TypeCatalog {
    /// Empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a type. A later definition for the same identifier wins.
    pub fn define<T>(&mut self, def: TypeDef<T>) -> &mut Self {
        let entry = def.entry;
        self.types.insert(entry.id.clone(), entry);
        self
    }

    /// Entry registered under `id`.
    pub fn get(&self, id: &str) -> Option<&TypeEntry> {
        self.types.get(id)
    }

    /// True if `id` is defined.
    pub fn contains(&self, id: &str) -> bool {
        self.types.contains_key(id)
    }

    /// Number of defined types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// True if no type is defined.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// All defined identifiers.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    /// Declared parameters of `method` on `type_id`.
    ///
    /// A missing constructor, on a known or unknown type, means zero
    /// parameters. Any other missing method is an error.
    pub fn parameters(&self, type_id: &str, method: &str) -> DiResult<&[MethodParameter]> {
        let declared = self.get(type_id).and_then(|entry| entry.method(method));
        match declared {
            Some(descriptor) => Ok(&descriptor.parameters),
            None if method == CONSTRUCTOR => Ok(&[]),
            None => Err(DiError::MethodNotFound {
                type_name: type_id.to_string(),
                method: method.to_string(),
            }),
        }
    }
}
