//! # UIBRIDGE Core
//!
//! The hand-off layer between a scripting engine and a host UI thread.
//!
//! Script execution produces UI mutation commands (create node, set property,
//! remove node, ...) as side effects. The host thread periodically drains
//! them and applies the mutations to its native UI tree.
//!
//! ## Architecture Rules
//!
//! 1. **One producer, one consumer** - enforced by the handle types
//! 2. **No general-purpose lock** - a swap guard protects an O(1) role exchange
//! 3. **Causal order** - records are drained in the order they were issued
//!
//! ## Example
//!
//! ```rust,ignore
//! use uibridge_core::{CommandKind, CommandSink, CommandSource, QueueConfig, UiCommandQueue};
//!
//! let queue = UiCommandQueue::new(&QueueConfig::dedicated());
//! let (mut producer, mut consumer) = queue.into_split()?;
//!
//! // Script thread
//! producer.add_command(CommandKind::CreateNode, Some("div".into()), node, NativeRef::NULL, false);
//!
//! // Host thread
//! let session = consumer.drain();
//! for record in session.iter() {
//!     apply(record);
//! }
//! // Dropping the session clears the front buffer.
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod command;
pub mod config;
pub mod error;
pub mod sync;

pub use command::{
    CommandBuffer, CommandKind, CommandPayload, CommandRecord, NativeRef, RawCommandItem,
};
pub use config::{BackoffConfig, QueueConfig};
pub use error::{QueueError, QueueResult};
pub use sync::{
    Backoff, CommandConsumer, CommandProducer, CommandSink, CommandSource, DrainSession,
    QueueStats, SingleBufferQueue, UiCommandQueue,
};
