//! Capability interfaces and the mode-selecting queue.

use std::time::Duration;

use crate::command::{CommandBuffer, CommandKind, CommandPayload, CommandRecord, NativeRef};
use crate::config::QueueConfig;
use crate::error::{QueueError, QueueResult};

use super::double_buffer::{self, CommandConsumer, CommandProducer};
use super::drain::DrainSession;
use super::single_buffer::SingleBufferQueue;

/// Counters exposed for profiling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct QueueStats {
    /// Role exchanges performed.
    pub swaps: u64,
    /// Records accepted from the producer.
    pub commands_enqueued: u64,
    /// Guard acquisitions that had to wait.
    pub contended_waits: u64,
}

/// Producer-side capability: enqueue commands.
pub trait CommandSink {
    /// Appends `record` to the buffer currently accepting writes.
    fn push(&mut self, record: CommandRecord);

    /// Whether the writable buffer holds no pending records.
    ///
    /// Lets the producer decide whether a drain is worth requesting.
    fn is_empty(&self) -> bool;

    /// Builds and appends one record. `payload` ownership moves into the queue.
    fn add_command(
        &mut self,
        kind: CommandKind,
        payload: Option<CommandPayload>,
        target: NativeRef,
        aux: NativeRef,
        request_update: bool,
    ) {
        self.push(CommandRecord::new(kind, payload, target, aux, request_update));
    }
}

/// Consumer-side capability: drain commands.
///
/// Prefer [`CommandSource::drain`]. The three-call protocol
/// ([`data`](CommandSource::data) → [`size`](CommandSource::size) →
/// [`clear`](CommandSource::clear)) is kept for hosts that read the front
/// buffer through raw memory and must be called in that order.
pub trait CommandSource {
    /// Exchanges buffer roles. No-op without a back buffer.
    fn swap_buffers(&mut self);

    /// The current front buffer, without swapping.
    fn front(&self) -> &CommandBuffer;

    /// The current front buffer, mutably, without swapping.
    fn front_mut(&mut self) -> &mut CommandBuffer;

    /// Consumes a pending repaint request, if any.
    fn take_update_request(&mut self) -> bool;

    /// Swaps, then exposes the front buffer as a session that clears it
    /// exactly once.
    fn drain(&mut self) -> DrainSession<'_> {
        self.swap_buffers();
        DrainSession::new(self.front_mut())
    }

    /// First call of a drain cycle: swaps and returns the front records.
    fn data(&mut self) -> &[CommandRecord] {
        self.swap_buffers();
        self.front().data()
    }

    /// Second call: number of records in the front buffer.
    fn size(&self) -> usize {
        self.front().len()
    }

    /// Last call: releases every front record.
    fn clear(&mut self) {
        self.front_mut().clear();
    }

    /// Swaps and returns the front buffer handle.
    fn front_buffer(&mut self) -> &CommandBuffer {
        self.swap_buffers();
        self.front()
    }
}

/// Command queue for one execution context.
///
/// The variant is fixed at construction from
/// [`QueueConfig::dedicated_thread`]:
///
/// - `Single`: producer and consumer interleave on one thread.
/// - `Dual`: both halves of a double buffer, still joined. Call
///   [`UiCommandQueue::into_split`] to move the consumer to the host thread.
pub enum UiCommandQueue {
    /// No dedicated consumer thread.
    Single(SingleBufferQueue),
    /// Dedicated consumer thread.
    Dual(CommandProducer, CommandConsumer),
}

impl UiCommandQueue {
    /// Builds the variant matching `config`.
    #[must_use]
    pub fn new(config: &QueueConfig) -> Self {
        if config.dedicated_thread {
            let (producer, consumer) = double_buffer::channel(config);
            Self::Dual(producer, consumer)
        } else {
            Self::Single(SingleBufferQueue::with_capacity(config.initial_capacity))
        }
    }

    /// Whether this queue double-buffers for a dedicated consumer thread.
    #[must_use]
    pub fn is_dedicated(&self) -> bool {
        matches!(self, Self::Dual(..))
    }

    /// Separates the producer and consumer halves.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::NotDedicated`] for a single-buffer queue, which
    /// has no thread-safe halves.
    pub fn into_split(self) -> QueueResult<(CommandProducer, CommandConsumer)> {
        match self {
            Self::Dual(producer, consumer) => {
                tracing::debug!("command queue split into producer and consumer");
                Ok((producer, consumer))
            }
            Self::Single(_) => Err(QueueError::NotDedicated),
        }
    }

    /// Blocks up to `timeout` for a repaint request.
    ///
    /// A single-buffer queue cannot be signalled while its only thread
    /// waits, so it reports the pending flag immediately.
    pub fn wait_for_update(&mut self, timeout: Duration) -> bool {
        match self {
            Self::Single(queue) => queue.take_update_request(),
            Self::Dual(_, consumer) => consumer.wait_for_update(timeout),
        }
    }

    /// Counters for this queue.
    #[must_use]
    pub fn stats(&self) -> QueueStats {
        match self {
            Self::Single(queue) => queue.stats(),
            Self::Dual(producer, _) => producer.stats(),
        }
    }
}

impl CommandSink for UiCommandQueue {
    fn push(&mut self, record: CommandRecord) {
        match self {
            Self::Single(queue) => queue.push(record),
            Self::Dual(producer, _) => producer.push(record),
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            Self::Single(queue) => CommandSink::is_empty(queue),
            Self::Dual(producer, _) => producer.is_empty(),
        }
    }
}

impl CommandSource for UiCommandQueue {
    fn swap_buffers(&mut self) {
        match self {
            Self::Single(queue) => queue.swap_buffers(),
            Self::Dual(_, consumer) => consumer.swap_buffers(),
        }
    }

    fn front(&self) -> &CommandBuffer {
        match self {
            Self::Single(queue) => queue.front(),
            Self::Dual(_, consumer) => consumer.front(),
        }
    }

    fn front_mut(&mut self) -> &mut CommandBuffer {
        match self {
            Self::Single(queue) => queue.front_mut(),
            Self::Dual(_, consumer) => consumer.front_mut(),
        }
    }

    fn take_update_request(&mut self) -> bool {
        match self {
            Self::Single(queue) => queue.take_update_request(),
            Self::Dual(_, consumer) => consumer.take_update_request(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(addr: usize) -> NativeRef {
        NativeRef::from_addr(addr)
    }

    #[test]
    fn test_mode_selection() {
        assert!(!UiCommandQueue::new(&QueueConfig::default()).is_dedicated());
        assert!(UiCommandQueue::new(&QueueConfig::dedicated()).is_dedicated());
    }

    #[test]
    fn test_split_single_fails() {
        let queue = UiCommandQueue::new(&QueueConfig::default());
        assert!(matches!(queue.into_split(), Err(QueueError::NotDedicated)));
    }

    #[test]
    fn test_split_dual() {
        let queue = UiCommandQueue::new(&QueueConfig::dedicated());
        let (mut producer, mut consumer) = queue.into_split().unwrap();

        producer.add_command(CommandKind::CreateNode, Some("p".into()), node(1), NativeRef::NULL, false);
        let session = consumer.drain();
        assert_eq!(session.len(), 1);
    }

    #[test]
    fn test_round_trip_both_modes() {
        for config in [QueueConfig::default(), QueueConfig::dedicated()] {
            let mut queue = UiCommandQueue::new(&config);
            queue.add_command(CommandKind::CreateNode, Some("A".into()), node(1), NativeRef::NULL, false);
            queue.add_command(CommandKind::SetProperty, Some("B".into()), node(1), NativeRef::NULL, false);
            queue.add_command(CommandKind::RemoveNode, Some("C".into()), node(1), NativeRef::NULL, true);

            let payloads: Vec<String> = queue
                .data()
                .iter()
                .map(|r| r.payload_str().unwrap_or_default().to_string())
                .collect();
            assert_eq!(payloads, ["A", "B", "C"]);
            assert_eq!(queue.size(), 3);
            queue.clear();

            assert_eq!(queue.size(), 0);
            assert!(CommandSink::is_empty(&queue));
            assert!(queue.take_update_request());
            assert_eq!(queue.stats().commands_enqueued, 3);
        }
    }

    #[test]
    fn test_wait_for_update_single() {
        let mut queue = UiCommandQueue::new(&QueueConfig::default());
        assert!(!queue.wait_for_update(Duration::from_millis(1)));
        queue.add_command(CommandKind::SetStyle, None, node(1), NativeRef::NULL, true);
        assert!(queue.wait_for_update(Duration::from_millis(1)));
        assert!(!queue.wait_for_update(Duration::from_millis(1)));
    }

    #[test]
    fn test_front_buffer_accessor() {
        let mut queue = UiCommandQueue::new(&QueueConfig::dedicated());
        queue.add_command(CommandKind::AddEvent, Some("click".into()), node(4), NativeRef::NULL, false);

        let front = queue.front_buffer();
        assert_eq!(front.len(), 1);
        assert_eq!(front.data()[0].kind(), CommandKind::AddEvent);
    }
}
