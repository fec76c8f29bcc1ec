//! Parameter descriptors: the static stand-in for signature introspection.
//!
//! Every constructible type and every callable method declares its
//! parameters up front. The container walks these descriptors in
//! declaration order to decide, per parameter, whether the value comes
//! from the registry or from the caller.

/// Method name under which constructor parameters are looked up.
pub const CONSTRUCTOR: &str = "__construct";

/// Scalar kinds that must be supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Int,
    Float,
    Bool,
    String,
}

impl ScalarKind {
    /// Maps a declared type name onto a scalar kind.
    ///
    /// Returns `None` for anything that is not one of `int`, `float`,
    /// `bool` or `string`.
    pub fn from_type_name(name: &str) -> Option<Self> {
        match name {
            "int" => Some(ScalarKind::Int),
            "float" => Some(ScalarKind::Float),
            "bool" => Some(ScalarKind::Bool),
            "string" => Some(ScalarKind::String),
            _ => None,
        }
    }

    /// Type name as written in a signature.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScalarKind::Int => "int",
            ScalarKind::Float => "float",
            ScalarKind::Bool => "bool",
            ScalarKind::String => "string",
        }
    }
}

/// Declared type of a parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParamType {
    /// Resolved through `Container::get` with this identifier
    Service(String),
    /// Supplied by the caller and cast to the kind
    Scalar(ScalarKind),
    /// Supplied by the caller and passed through as-is
    Untyped,
}

impl ParamType {
    /// Classifies a type name the way a signature would declare it.
    ///
    /// ```rust
    /// use mika::{ParamType, ScalarKind};
    ///
    /// assert_eq!(ParamType::from_type_name("int"), ParamType::Scalar(ScalarKind::Int));
    /// assert_eq!(
    ///     ParamType::from_type_name("App\\StreamFactory"),
    ///     ParamType::Service("App\\StreamFactory".to_string())
    /// );
    /// ```
    pub fn from_type_name(name: &str) -> Self {
        match ScalarKind::from_type_name(name) {
            Some(kind) => ParamType::Scalar(kind),
            None => ParamType::Service(name.to_string()),
        }
    }
}

/// A single declared parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodParameter {
    pub name: String,
    pub declared: ParamType,
}

impl MethodParameter {
    /// Parameter resolved from the registry under `service_id`.
    pub fn service(name: impl Into<String>, service_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared: ParamType::Service(service_id.into()),
        }
    }

    /// Parameter resolved from the registry under `T`'s type name.
    pub fn of<T: ?Sized + 'static>(name: impl Into<String>) -> Self {
        Self::service(name, crate::key::key_of_type::<T>())
    }

    /// Caller-supplied parameter cast to `kind`.
    pub fn scalar(name: impl Into<String>, kind: ScalarKind) -> Self {
        Self {
            name: name.into(),
            declared: ParamType::Scalar(kind),
        }
    }

    /// Caller-supplied `int` parameter.
    pub fn int(name: impl Into<String>) -> Self {
        Self::scalar(name, ScalarKind::Int)
    }

    /// Caller-supplied `float` parameter.
    pub fn float(name: impl Into<String>) -> Self {
        Self::scalar(name, ScalarKind::Float)
    }

    /// Caller-supplied `bool` parameter.
    pub fn bool(name: impl Into<String>) -> Self {
        Self::scalar(name, ScalarKind::Bool)
    }

    /// Caller-supplied `string` parameter.
    pub fn string(name: impl Into<String>) -> Self {
        Self::scalar(name, ScalarKind::String)
    }

    /// Parameter without a declared type.
    pub fn untyped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared: ParamType::Untyped,
        }
    }

    /// Identifier to resolve from the registry, if any.
    pub fn service_id(&self) -> Option<&str> {
        match &self.declared {
            ParamType::Service(id) => Some(id),
            _ => None,
        }
    }

    /// True when the value must come from the caller.
    pub fn requires_value(&self) -> bool {
        self.service_id().is_none()
    }
}

/// Declared signature of one method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescriptor {
    pub name: String,
    pub parameters: Vec<MethodParameter>,
}

impl MethodDescriptor {
    /// Signature of `name` with `parameters` in declaration order.
    pub fn new<P>(name: impl Into<String>, parameters: P) -> Self
    where
        P: IntoIterator<Item = MethodParameter>,
    {
        Self {
            name: name.into(),
            parameters: parameters.into_iter().collect(),
        }
    }

    /// True for the constructor signature.
    pub fn is_constructor(&self) -> bool {
        self.name == CONSTRUCTOR
    }
}
