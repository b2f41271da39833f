//! # UIBRIDGE Bindings
//!
//! Host objects exposed to the script context.
//!
//! Bindings are plain property glue. The only thing they share with the
//! command queue is a [`SharedSink`]: a mutation that must reach the host
//! UI thread is enqueued as a side effect of a property write.
//!
//! ```text
//! script: window.location.href = "..."
//!    └─▶ LocationBinding::set("href")
//!           └─▶ CommandSink::add_command(Navigate, ...)
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod context;
pub mod error;
pub mod host_object;
pub mod location;
pub mod metrics;
pub mod value;
pub mod window;

pub use context::ScriptContext;
pub use error::{BindingError, BindingResult};
pub use host_object::{HostObject, SharedSink};
pub use location::LocationBinding;
pub use metrics::HostMetrics;
pub use value::{ScriptFunction, ScriptValue};
pub use window::{WindowBinding, WINDOW_GLOBAL};
