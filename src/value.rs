//! Resolved argument values.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::error::{DiError, DiResult};

/// Type-erased shared instance.
pub type AnyArc = Arc<dyn Any + Send + Sync>;

/// One resolved parameter value.
#[derive(Clone)]
pub enum Value {
    /// Instance resolved from the container
    Service(AnyArc),
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
    /// Caller value handed to an untyped parameter, uncoerced
    Raw(String),
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Service(_) => f.write_str("Service(..)"),
            Value::Int(v) => write!(f, "Int({})", v),
            Value::Float(v) => write!(f, "Float({})", v),
            Value::Bool(v) => write!(f, "Bool({})", v),
            Value::Str(v) => write!(f, "Str({:?})", v),
            Value::Raw(v) => write!(f, "Raw({:?})", v),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Service(a), Value::Service(b)) => Arc::ptr_eq(a, b),
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Raw(a), Value::Raw(b)) => a == b,
            _ => false,
        }
    }
}

/// Resolved parameters of one method, in declaration order.
///
/// Handlers and factories pull their inputs out by parameter name:
///
/// ```rust
/// use mika::{Arguments, Value};
///
/// let mut args = Arguments::new();
/// args.push("age", Value::Int(31));
/// args.push("name", Value::Str("Mika".into()));
///
/// assert_eq!(args.int("age").unwrap(), 31);
/// assert_eq!(args.str("name").unwrap(), "Mika");
/// assert_eq!(args.names().collect::<Vec<_>>(), ["age", "name"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments {
    entries: Vec<(String, Value)>,
}

impl Arguments {
    /// Empty argument list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a value, replacing an earlier one with the same name.
    pub fn push(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Value bound to `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// True if `name` was resolved.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of resolved parameters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True for a parameterless method.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parameter names, in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Name/value pairs, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    fn require(&self, name: &str) -> DiResult<&Value> {
        self.get(name).ok_or_else(|| DiError::MissingMethodArgument {
            parameter: name.to_string(),
            method: "<resolved arguments>".to_string(),
        })
    }

    fn mismatch(name: &str, expected: &'static str) -> DiError {
        DiError::TypeMismatch {
            name: name.to_string(),
            expected,
        }
    }

    /// Downcasts a resolved service parameter.
    pub fn service<T: Any + Send + Sync>(&self, name: &str) -> DiResult<Arc<T>> {
        match self.require(name)? {
            Value::Service(any) => any
                .clone()
                .downcast::<T>()
                .map_err(|_| Self::mismatch(name, std::any::type_name::<T>())),
            _ => Err(Self::mismatch(name, std::any::type_name::<T>())),
        }
    }

    /// Value of an `int` parameter.
    pub fn int(&self, name: &str) -> DiResult<i64> {
        match self.require(name)? {
            Value::Int(v) => Ok(*v),
            _ => Err(Self::mismatch(name, "int")),
        }
    }

    /// Value of a `float` parameter.
    pub fn float(&self, name: &str) -> DiResult<f64> {
        match self.require(name)? {
            Value::Float(v) => Ok(*v),
            _ => Err(Self::mismatch(name, "float")),
        }
    }

    /// Value of a `bool` parameter.
    pub fn bool(&self, name: &str) -> DiResult<bool> {
        match self.require(name)? {
            Value::Bool(v) => Ok(*v),
            _ => Err(Self::mismatch(name, "bool")),
        }
    }

    /// Text of a `string`-typed or untyped parameter.
    pub fn str(&self, name: &str) -> DiResult<&str> {
        match self.require(name)? {
            Value::Str(v) | Value::Raw(v) => Ok(v),
            _ => Err(Self::mismatch(name, "string")),
        }
    }
}

impl<'a> IntoIterator for &'a Arguments {
    type Item = &'a (String, Value);
    type IntoIter = std::slice::Iter<'a, (String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
