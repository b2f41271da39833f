//! Global scope of one script execution context.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::value::ScriptValue;

/// The global property table bindings install themselves into.
#[derive(Debug, Default)]
pub struct ScriptContext {
    globals: RwLock<HashMap<String, ScriptValue>>,
}

impl ScriptContext {
    /// Creates an empty global scope.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs or replaces a global. Returns the previous value.
    pub fn set_global(&self, name: &str, value: ScriptValue) -> Option<ScriptValue> {
        self.globals.write().insert(name.to_owned(), value)
    }

    /// Reads a global. Missing names yield [`ScriptValue::Undefined`].
    #[must_use]
    pub fn get_global(&self, name: &str) -> ScriptValue {
        self.globals.read().get(name).cloned().unwrap_or_default()
    }

    /// Removes a global. Returns the removed value.
    pub fn remove_global(&self, name: &str) -> Option<ScriptValue> {
        self.globals.write().remove(name)
    }

    /// Whether a global is installed.
    #[must_use]
    pub fn has_global(&self, name: &str) -> bool {
        self.globals.read().contains_key(name)
    }

    /// Number of installed globals.
    #[must_use]
    pub fn global_count(&self) -> usize {
        self.globals.read().len()
    }
}
