//! The host-object capability.

use std::sync::Arc;

use parking_lot::Mutex;
use uibridge_core::CommandSink;

use crate::error::BindingResult;
use crate::value::ScriptValue;

/// Command sink shared by every binding of one execution context.
///
/// Only the scripting thread locks it, so the mutex is never contended;
/// it exists so several bindings can hold the same producer.
pub type SharedSink = Arc<Mutex<dyn CommandSink + Send>>;

/// An object whose properties are implemented by the host.
///
/// Always called on the scripting thread.
pub trait HostObject: Send + Sync {
    /// Reads a property. Unknown names yield [`ScriptValue::Undefined`].
    fn get(&self, name: &str) -> ScriptValue;

    /// Writes a property.
    ///
    /// # Errors
    ///
    /// Implementations reject assignments to host-owned properties.
    fn set(&self, name: &str, value: ScriptValue) -> BindingResult<()>;

    /// Names of the host-implemented properties, for enumeration.
    fn property_names(&self) -> Vec<&'static str>;
}
