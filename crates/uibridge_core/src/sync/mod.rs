//! # Command Hand-off Between Threads
//!
//! No general-purpose locks. One producer, one consumer.
//!
//! ## The Problem
//!
//! ```text
//! Thread 1 (Script):  APPENDS commands
//! Thread 2 (Host):    DRAINS commands
//!
//! Without synchronization: torn buffers, lost commands
//! With Mutex:              host frame stalls behind script bursts
//! ```
//!
//! ## The Solution: Double Buffering
//!
//! ```text
//! Cycle N:
//!   Script appends to Buffer A (back)
//!   Host drains Buffer B (front)
//!
//! Cycle N+1:
//!   SWAP (O(1) role exchange under the swap guard)
//!   Script appends to Buffer B
//!   Host drains Buffer A
//! ```
//!
//! Without a dedicated host thread the double buffer is pointless, so
//! [`UiCommandQueue`] falls back to [`SingleBufferQueue`], which has no
//! atomics at all.

mod backoff;
mod double_buffer;
mod drain;
mod queue;
mod single_buffer;

pub use backoff::Backoff;
pub use double_buffer::{CommandConsumer, CommandProducer};
pub use drain::DrainSession;
pub use queue::{CommandSink, CommandSource, QueueStats, UiCommandQueue};
pub use single_buffer::SingleBufferQueue;
