//! `location` host object.

use parking_lot::Mutex;
use uibridge_core::{CommandKind, CommandPayload, NativeRef};

use crate::error::{BindingError, BindingResult};
use crate::host_object::{HostObject, SharedSink};
use crate::value::ScriptValue;

const PROPERTIES: [&str; 1] = ["href"];

/// Current document location.
///
/// Assigning `href` from script records the new URL and asks the host to
/// navigate by enqueuing a [`CommandKind::Navigate`] record.
pub struct LocationBinding {
    href: Mutex<String>,
    sink: SharedSink,
}

impl LocationBinding {
    /// Creates a location pointing at `href`.
    pub fn new(href: impl Into<String>, sink: SharedSink) -> Self {
        Self {
            href: Mutex::new(href.into()),
            sink,
        }
    }

    /// The current URL.
    #[must_use]
    pub fn href(&self) -> String {
        self.href.lock().clone()
    }

    /// Updates the URL from the host side, e.g. after a redirect. Does not
    /// enqueue anything.
    pub fn sync_href(&self, href: impl Into<String>) {
        *self.href.lock() = href.into();
    }

    fn navigate(&self, href: String) {
        let payload = CommandPayload::from(href.as_str());
        *self.href.lock() = href;
        self.sink.lock().add_command(
            CommandKind::Navigate,
            Some(payload),
            NativeRef::NULL,
            NativeRef::NULL,
            true,
        );
    }
}

impl HostObject for LocationBinding {
    fn get(&self, name: &str) -> ScriptValue {
        match name {
            "href" => ScriptValue::String(self.href()),
            _ => ScriptValue::Undefined,
        }
    }

    fn set(&self, name: &str, value: ScriptValue) -> BindingResult<()> {
        match (name, value) {
            ("href", ScriptValue::String(href)) => {
                self.navigate(href);
                Ok(())
            }
            ("href", other) => Err(BindingError::InvalidValue {
                property: "location.href".to_owned(),
                expected: "string",
                actual: other.type_name(),
            }),
            _ => Ok(()),
        }
    }

    fn property_names(&self) -> Vec<&'static str> {
        PROPERTIES.to_vec()
    }
}
