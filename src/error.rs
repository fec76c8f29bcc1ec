//! Error types for the container, the dispatcher and configuration loading.

use thiserror::Error;

/// Dependency injection errors
///
/// Raised at the point of detection and propagated unchanged through
/// `create_method_depends` → `create_object` → `get`. Nothing inside the
/// container catches or retries them.
///
/// # Examples
///
/// ```rust
/// use mika::{Container, DiError, ResolverCore, ServiceRegistry, TypeCatalog};
/// use std::sync::Arc;
///
/// let container = Container::new(Arc::new(ServiceRegistry::new()), Arc::new(TypeCatalog::new()));
/// match container.get("Acme\\Mailer") {
///     Err(DiError::ServiceNotFound(id)) => assert_eq!(id, "Acme\\Mailer"),
///     _ => unreachable!(),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiError {
    /// Requested identifier has no binding
    #[error("Service {0} is not found")]
    ServiceNotFound(String),
    /// Bound concrete type is unknown to the catalog or cannot be instantiated
    #[error("Class {0} is not found")]
    ClassNotFound(String),
    /// Target method is not declared on the type
    #[error("Method {type_name}::{method}() does not exist")]
    MethodNotFound {
        type_name: String,
        method: String,
    },
    /// A scalar or untyped parameter had no caller-supplied value
    #[error("Missing argument {parameter} for method {method}")]
    MissingMethodArgument {
        parameter: String,
        method: String,
    },
    /// Constructing a type required constructing itself (includes path)
    #[error("Circular dependency: {}", .0.join(" -> "))]
    Circular(Vec<String>),
    /// A resolved value could not be downcast to the requested type
    #[error("Type mismatch for {name}: expected {expected}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
    },
}

/// Result type for container operations
pub type DiResult<T> = Result<T, DiError>;

/// Errors surfaced by [`Route`](crate::Route) dispatch.
///
/// `NotFound` carries an HTTP 404 connotation; everything coming out of
/// the container is wrapped unchanged in `Di`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("{0}")]
    NotFound(String),
    #[error(transparent)]
    Di(#[from] DiError),
}

impl RouteError {
    /// Status code a transport layer would answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            RouteError::NotFound(_) => 404,
            RouteError::Di(_) => 500,
        }
    }
}

/// Result type for dispatch operations
pub type RouteResult<T> = Result<T, RouteError>;

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid value {value:?} for {key}")]
    InvalidValue { key: String, value: String },
    #[error("Failed to install log subscriber: {0}")]
    Logging(String),
}
