//! Values crossing the script/host boundary.

use std::fmt;
use std::sync::Arc;

use crate::host_object::HostObject;

type NativeFn = dyn Fn(&[ScriptValue]) -> ScriptValue + Send + Sync;

/// A callable script value.
///
/// Cloning shares the same function.
#[derive(Clone)]
pub struct ScriptFunction {
    inner: Arc<NativeFn>,
}

impl ScriptFunction {
    /// Wraps a closure.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&[ScriptValue]) -> ScriptValue + Send + Sync + 'static,
    {
        Self { inner: Arc::new(f) }
    }

    /// Invokes the function.
    pub fn call(&self, args: &[ScriptValue]) -> ScriptValue {
        (self.inner)(args)
    }

    /// Whether both handles point to the same function.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for ScriptFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ScriptFunction")
    }
}

/// A script value as seen by host objects.
#[derive(Clone, Default)]
pub enum ScriptValue {
    /// `undefined`.
    #[default]
    Undefined,
    /// `null`.
    Null,
    /// A boolean.
    Bool(bool),
    /// A number.
    Number(f64),
    /// A string.
    String(String),
    /// A function.
    Function(ScriptFunction),
    /// A host object handle.
    Object(Arc<dyn HostObject>),
}

impl ScriptValue {
    /// Whether this is `undefined`.
    #[must_use]
    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    /// The number, if this is one.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The string, if this is one.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// The function, if this is one.
    #[must_use]
    pub fn as_function(&self) -> Option<&ScriptFunction> {
        match self {
            Self::Function(f) => Some(f),
            _ => None,
        }
    }

    /// The host object, if this is one.
    #[must_use]
    pub fn as_object(&self) -> Option<&Arc<dyn HostObject>> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Script-visible type name.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Null | Self::Object(_) => "object",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Function(_) => "function",
        }
    }
}

impl fmt::Debug for ScriptValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => f.write_str("Undefined"),
            Self::Null => f.write_str("Null"),
            Self::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Self::Number(n) => f.debug_tuple("Number").field(n).finish(),
            Self::String(s) => f.debug_tuple("String").field(s).finish(),
            Self::Function(func) => fmt::Debug::fmt(func, f),
            Self::Object(_) => f.write_str("Object(..)"),
        }
    }
}

impl From<f64> for ScriptValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for ScriptValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for ScriptValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for ScriptValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<ScriptFunction> for ScriptValue {
    fn from(value: ScriptFunction) -> Self {
        Self::Function(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_names() {
        assert_eq!(ScriptValue::Undefined.type_name(), "undefined");
        assert_eq!(ScriptValue::from(1.5).type_name(), "number");
        assert_eq!(ScriptValue::from("x").type_name(), "string");
        assert_eq!(ScriptValue::from(true).type_name(), "boolean");
        let f = ScriptFunction::new(|_| ScriptValue::Null);
        assert_eq!(ScriptValue::from(f).type_name(), "function");
    }

    #[test]
    fn test_function_call() {
        let add = ScriptFunction::new(|args| {
            ScriptValue::Number(args.iter().filter_map(ScriptValue::as_number).sum())
        });
        let result = add.call(&[ScriptValue::from(2.0), ScriptValue::from(3.0)]);
        assert_eq!(result.as_number(), Some(5.0));

        let shared = add.clone();
        assert!(shared.ptr_eq(&add));
    }

    #[test]
    fn test_accessors() {
        assert!(ScriptValue::default().is_undefined());
        assert_eq!(ScriptValue::from("href").as_str(), Some("href"));
        assert!(ScriptValue::Null.as_function().is_none());
        assert!(ScriptValue::Null.as_object().is_none());
    }
}
