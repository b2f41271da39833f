//! # `window` host object
//!
//! ```text
//! __kom_window__
//!   ├── devicePixelRatio   (host scalar, read-only)
//!   ├── location           (LocationBinding, read-only handle)
//!   ├── onload             (callback slot)
//!   └── <expandos>         (anything script assigns)
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::context::ScriptContext;
use crate::error::{BindingError, BindingResult};
use crate::host_object::{HostObject, SharedSink};
use crate::location::LocationBinding;
use crate::metrics::HostMetrics;
use crate::value::ScriptValue;

/// Global name the window object is installed under.
pub const WINDOW_GLOBAL: &str = "__kom_window__";

const PROPERTIES: [&str; 2] = ["devicePixelRatio", "location"];

/// The script-visible `window`.
pub struct WindowBinding {
    metrics: Arc<HostMetrics>,
    location: Arc<LocationBinding>,
    onload: Mutex<ScriptValue>,
    expandos: Mutex<HashMap<String, ScriptValue>>,
}

impl WindowBinding {
    /// Creates a window whose `location` starts at `href`.
    #[must_use]
    pub fn new(metrics: Arc<HostMetrics>, href: impl Into<String>, sink: SharedSink) -> Arc<Self> {
        Arc::new(Self {
            metrics,
            location: Arc::new(LocationBinding::new(href, sink)),
            onload: Mutex::new(ScriptValue::Undefined),
            expandos: Mutex::new(HashMap::new()),
        })
    }

    /// The nested location object.
    #[must_use]
    pub fn location(&self) -> &Arc<LocationBinding> {
        &self.location
    }

    /// Installs the window as [`WINDOW_GLOBAL`].
    ///
    /// # Errors
    ///
    /// Returns [`BindingError::AlreadyBound`] if the global is taken.
    pub fn bind(self: &Arc<Self>, ctx: &ScriptContext) -> BindingResult<()> {
        if ctx.has_global(WINDOW_GLOBAL) {
            return Err(BindingError::AlreadyBound(WINDOW_GLOBAL.to_owned()));
        }
        let object: Arc<dyn HostObject> = Arc::clone(self) as Arc<dyn HostObject>;
        ctx.set_global(WINDOW_GLOBAL, ScriptValue::Object(object));
        tracing::debug!(global = WINDOW_GLOBAL, "window bound");
        Ok(())
    }

    /// Removes [`WINDOW_GLOBAL`] and releases the `onload` callback and
    /// every expando.
    ///
    /// # Errors
    ///
    /// Returns [`BindingError::NotBound`] if the global is not installed.
    pub fn unbind(&self, ctx: &ScriptContext) -> BindingResult<()> {
        if ctx.remove_global(WINDOW_GLOBAL).is_none() {
            return Err(BindingError::NotBound(WINDOW_GLOBAL.to_owned()));
        }
        *self.onload.lock() = ScriptValue::Undefined;
        self.expandos.lock().clear();
        tracing::debug!(global = WINDOW_GLOBAL, "window unbound");
        Ok(())
    }

    /// Calls the stored `onload` callback.
    ///
    /// Nothing stored is a no-op. A stored value that is not a function is
    /// logged and skipped. Returns the callback's result when it ran.
    pub fn invoke_onload(&self) -> Option<ScriptValue> {
        // Clone out so the callback may reassign `onload` without deadlocking.
        let callback = self.onload.lock().clone();
        match callback {
            ScriptValue::Undefined => None,
            ScriptValue::Function(f) => Some(f.call(&[])),
            other => {
                tracing::warn!(kind = other.type_name(), "onload callback is not a function");
                None
            }
        }
    }

    fn device_pixel_ratio(&self) -> ScriptValue {
        match self.metrics.device_pixel_ratio() {
            Some(ratio) => ScriptValue::Number(ratio),
            None => {
                tracing::error!("devicePixelRatio requested before the host registered it");
                ScriptValue::Undefined
            }
        }
    }
}

impl HostObject for WindowBinding {
    fn get(&self, name: &str) -> ScriptValue {
        match name {
            "devicePixelRatio" => self.device_pixel_ratio(),
            "location" => {
                let location: Arc<dyn HostObject> =
                    Arc::clone(&self.location) as Arc<dyn HostObject>;
                ScriptValue::Object(location)
            }
            "onload" => self.onload.lock().clone(),
            _ => self.expandos.lock().get(name).cloned().unwrap_or_default(),
        }
    }

    fn set(&self, name: &str, value: ScriptValue) -> BindingResult<()> {
        match name {
            "devicePixelRatio" | "location" => Err(BindingError::ReadOnly(name.to_owned())),
            "onload" => {
                *self.onload.lock() = value;
                Ok(())
            }
            _ => {
                self.expandos.lock().insert(name.to_owned(), value);
                Ok(())
            }
        }
    }

    fn property_names(&self) -> Vec<&'static str> {
        PROPERTIES.to_vec()
    }
}
