//! # UI Mutation Commands
//!
//! ```text
//! Script thread                               Host thread
//!   add_command(kind, payload, refs) ──▶ CommandBuffer ──▶ &[CommandRecord]
//! ```
//!
//! A [`CommandRecord`] is immutable once appended. Its payload is owned by
//! the buffer until the consumer clears it.

mod buffer;
mod raw;
mod record;

pub use buffer::CommandBuffer;
pub use raw::{RawCommandItem, FLAG_HAS_PAYLOAD, FLAG_REQUEST_UPDATE};
pub use record::{CommandKind, CommandPayload, CommandRecord, NativeRef};
