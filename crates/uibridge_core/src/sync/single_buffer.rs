//! Single-thread variant: one buffer, no atomics.

use crate::command::{CommandBuffer, CommandRecord};

use super::queue::{CommandSink, CommandSource, QueueStats};

/// Queue for contexts without a dedicated consumer thread.
///
/// Producer and consumer interleave on the same thread, so program order
/// already orders every append before the drain that reads it. There is
/// nothing to swap: [`CommandSource::data`] is idempotent until cleared.
#[derive(Debug, Default)]
pub struct SingleBufferQueue {
    front: CommandBuffer,
    update_requested: bool,
    commands_enqueued: u64,
}

impl SingleBufferQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty queue with room for `capacity` records.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            front: CommandBuffer::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Counters for this queue. Never swaps, never contends.
    #[must_use]
    pub fn stats(&self) -> QueueStats {
        QueueStats {
            swaps: 0,
            commands_enqueued: self.commands_enqueued,
            contended_waits: 0,
        }
    }
}

impl CommandSink for SingleBufferQueue {
    #[inline]
    fn push(&mut self, record: CommandRecord) {
        self.update_requested |= record.request_update();
        self.front.push(record);
        self.commands_enqueued += 1;
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.front.is_empty()
    }
}

impl CommandSource for SingleBufferQueue {
    #[inline]
    fn swap_buffers(&mut self) {}

    #[inline]
    fn front(&self) -> &CommandBuffer {
        &self.front
    }

    #[inline]
    fn front_mut(&mut self) -> &mut CommandBuffer {
        &mut self.front
    }

    fn take_update_request(&mut self) -> bool {
        std::mem::take(&mut self.update_requested)
    }
}
