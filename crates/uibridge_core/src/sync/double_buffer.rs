//! # Double-Buffered Command Queue
//!
//! Lock-free hand-off between the script thread and the host thread.
//!
//! ## Safety Note
//!
//! This module requires unsafe code to give each side `&mut` access to its
//! buffer without a lock. All unsafe blocks are documented.

#![allow(unsafe_code)]
//!
//! ## Architecture
//!
//! ```text
//!                    ┌─────────────────────────────┐
//!                    │        SharedBuffers        │
//!                    │                             │
//!                    │  ┌──────────┐ ┌──────────┐  │
//!                    │  │ Buffer 0 │ │ Buffer 1 │  │
//!                    │  └────┬─────┘ └────┬─────┘  │
//!                    │       │            │        │
//!                    │  ┌────┴────────────┴────┐   │
//!                    │  │ back index + guard   │   │
//!                    │  └──────────────────────┘   │
//!                    └─────────────────────────────┘
//!                              │
//!              ┌───────────────┴───────────────┐
//!              ▼                               ▼
//!      ┌────────────────┐              ┌────────────────┐
//!      │CommandProducer │              │CommandConsumer │
//!      │ (script thread)│              │ (host thread)  │
//!      └────────────────┘              └────────────────┘
//! ```
//!
//! ## Thread Safety
//!
//! - `CommandProducer`: only touches `buffers[back]`, and only while holding
//!   the swap guard.
//! - `CommandConsumer`: only touches `buffers[back ^ 1]`, and is the only
//!   writer of `back`, which it flips while holding the swap guard.
//! - Neither handle is `Clone`, so there is exactly one of each.

use std::cell::UnsafeCell;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, Sender};

use crate::command::{CommandBuffer, CommandRecord};
use crate::config::{BackoffConfig, QueueConfig};

use super::backoff::Backoff;
use super::queue::{CommandSink, CommandSource, QueueStats};

/// State shared by both halves.
struct SharedBuffers {
    /// The two command buffers.
    /// Using `UnsafeCell` because exclusive access is guaranteed by protocol.
    buffers: [UnsafeCell<CommandBuffer>; 2],

    /// Index of the buffer accepting writes (0 or 1).
    /// Front buffer is always `back ^ 1`.
    back: AtomicUsize,

    /// Swap guard. Held by the producer for one append and by the consumer
    /// for one role exchange.
    guard: AtomicBool,

    /// Records waiting in the back buffer.
    pending: AtomicUsize,

    swaps: AtomicU64,
    commands_enqueued: AtomicU64,
    contended_waits: AtomicU64,

    backoff: BackoffConfig,
}

// SAFETY: every access to `buffers` follows the single-producer /
// single-consumer protocol documented on the module; the guard's
// Acquire/Release pair orders appends before the swap that exposes them.
unsafe impl Sync for SharedBuffers {}

impl SharedBuffers {
    /// Acquires the swap guard, backing off while the other side holds it.
    fn lock(&self) -> GuardToken<'_> {
        if self
            .guard
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
        {
            return GuardToken { flag: &self.guard };
        }

        self.contended_waits.fetch_add(1, Ordering::Relaxed);
        let mut backoff = Backoff::new(self.backoff);
        loop {
            while self.guard.load(Ordering::Relaxed) {
                backoff.snooze();
            }
            if self
                .guard
                .compare_exchange_weak(false, true, Ordering::Acquire, Ordering::Relaxed)
                .is_ok()
            {
                return GuardToken { flag: &self.guard };
            }
        }
    }

    fn stats(&self) -> QueueStats {
        QueueStats {
            swaps: self.swaps.load(Ordering::Relaxed),
            commands_enqueued: self.commands_enqueued.load(Ordering::Relaxed),
            contended_waits: self.contended_waits.load(Ordering::Relaxed),
        }
    }
}

/// Releases the swap guard on drop.
struct GuardToken<'a> {
    flag: &'a AtomicBool,
}

impl Drop for GuardToken<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Builds a connected producer/consumer pair.
pub(crate) fn channel(config: &QueueConfig) -> (CommandProducer, CommandConsumer) {
    tracing::debug!(
        capacity = config.initial_capacity,
        "dedicated consumer thread, creating back buffer"
    );

    let shared = Arc::new(SharedBuffers {
        buffers: [
            UnsafeCell::new(CommandBuffer::with_capacity(config.initial_capacity)),
            UnsafeCell::new(CommandBuffer::with_capacity(config.initial_capacity)),
        ],
        back: AtomicUsize::new(1),
        guard: AtomicBool::new(false),
        pending: AtomicUsize::new(0),
        swaps: AtomicU64::new(0),
        commands_enqueued: AtomicU64::new(0),
        contended_waits: AtomicU64::new(0),
        backoff: config.backoff,
    });

    // One slot: repaint requests coalesce until the host takes them.
    let (update_tx, update_rx) = bounded(1);

    (
        CommandProducer {
            shared: Arc::clone(&shared),
            update_tx,
        },
        CommandConsumer { shared, update_rx },
    )
}

/// Script-thread half of a double-buffered queue.
///
/// Appends go to the back buffer. The only wait is for an in-flight swap,
/// which is a single index flip.
pub struct CommandProducer {
    shared: Arc<SharedBuffers>,
    update_tx: Sender<()>,
}

impl CommandProducer {
    /// Records waiting for the next drain.
    #[inline]
    #[must_use]
    pub fn pending(&self) -> usize {
        self.shared.pending.load(Ordering::Acquire)
    }

    /// Counters shared with the consumer.
    #[must_use]
    pub fn stats(&self) -> QueueStats {
        self.shared.stats()
    }
}

impl CommandSink for CommandProducer {
    fn push(&mut self, record: CommandRecord) {
        let request_update = record.request_update();
        {
            let _guard = self.shared.lock();
            let back = self.shared.back.load(Ordering::Relaxed);
            // SAFETY: the guard is held, so the consumer cannot flip `back`
            // and never touches the back buffer itself. `&mut self` rules out
            // a second producer.
            let buffer = unsafe { &mut *self.shared.buffers[back].get() };
            buffer.push(record);
            self.shared.pending.store(buffer.len(), Ordering::Release);
        }
        self.shared.commands_enqueued.fetch_add(1, Ordering::Relaxed);

        if request_update {
            // Full means a request is already pending; disconnected means
            // the host is gone. Both are fine to ignore.
            let _ = self.update_tx.try_send(());
        }
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.pending() == 0
    }
}

/// Host-thread half of a double-buffered queue.
///
/// Every [`CommandSource::data`], [`CommandSource::drain`] and
/// [`CommandSource::front_buffer`] call swaps first, so everything appended
/// before the call is visible once it returns.
pub struct CommandConsumer {
    shared: Arc<SharedBuffers>,
    update_rx: Receiver<()>,
}

impl CommandConsumer {
    /// Records waiting in the back buffer. Does not swap.
    #[inline]
    #[must_use]
    pub fn pending(&self) -> usize {
        self.shared.pending.load(Ordering::Acquire)
    }

    /// Whether the back buffer holds nothing. Does not swap.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending() == 0
    }

    /// Blocks up to `timeout` for a record with `request_update` set.
    ///
    /// Returns `false` on timeout.
    pub fn wait_for_update(&self, timeout: Duration) -> bool {
        self.update_rx.recv_timeout(timeout).is_ok()
    }

    /// Counters shared with the producer.
    #[must_use]
    pub fn stats(&self) -> QueueStats {
        self.shared.stats()
    }

    #[inline]
    fn front_index(&self) -> usize {
        // Only this handle writes `back`.
        self.shared.back.load(Ordering::Relaxed) ^ 1
    }
}

impl CommandSource for CommandConsumer {
    fn swap_buffers(&mut self) {
        let exposed = {
            let _guard = self.shared.lock();
            let old_back = self.shared.back.load(Ordering::Relaxed);
            self.shared.back.store(old_back ^ 1, Ordering::Relaxed);
            // SAFETY: the guard is held, so the producer is not inside
            // `push`; both buffers are momentarily ours.
            let (new_front, new_back) = unsafe {
                (
                    &*self.shared.buffers[old_back].get(),
                    &*self.shared.buffers[old_back ^ 1].get(),
                )
            };
            self.shared.pending.store(new_back.len(), Ordering::Release);
            new_front.len()
        };
        self.shared.swaps.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(exposed, "swapped command buffers");
    }

    fn front(&self) -> &CommandBuffer {
        // SAFETY: the producer only touches `buffers[back]`, and `back` only
        // changes through `&mut self`, so the front buffer is ours for the
        // lifetime of this borrow.
        unsafe { &*self.shared.buffers[self.front_index()].get() }
    }

    fn front_mut(&mut self) -> &mut CommandBuffer {
        // SAFETY: as in `front`, plus `&mut self` excludes other borrows.
        unsafe { &mut *self.shared.buffers[self.front_index()].get() }
    }

    fn take_update_request(&mut self) -> bool {
        self.update_rx.try_recv().is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{CommandKind, NativeRef};

    fn node(addr: usize) -> NativeRef {
        NativeRef::from_addr(addr)
    }

    fn pair() -> (CommandProducer, CommandConsumer) {
        channel(&QueueConfig::dedicated())
    }

    #[test]
    fn test_creation() {
        let (producer, consumer) = pair();
        assert!(producer.is_empty());
        assert!(consumer.is_empty());
        assert_eq!(producer.stats(), QueueStats::default());
    }

    #[test]
    fn test_commands_invisible_until_swap() {
        let (mut producer, mut consumer) = pair();
        producer.add_command(CommandKind::CreateNode, Some("div".into()), node(1), NativeRef::NULL, false);

        // Front buffer is untouched until the consumer swaps.
        assert_eq!(consumer.size(), 0);
        assert_eq!(consumer.pending(), 1);
        assert!(!producer.is_empty());

        assert_eq!(consumer.data().len(), 1);
        assert_eq!(consumer.size(), 1);
        assert!(producer.is_empty());
    }

    #[test]
    fn test_writes_after_swap_go_to_next_cycle() {
        let (mut producer, mut consumer) = pair();
        producer.add_command(CommandKind::CreateNode, Some("first".into()), node(1), NativeRef::NULL, false);

        let session = consumer.drain();
        producer.add_command(CommandKind::CreateNode, Some("second".into()), node(2), NativeRef::NULL, false);
        assert_eq!(session.len(), 1);
        assert_eq!(session[0].payload_str(), Some("first"));
        session.finish();

        let session = consumer.drain();
        assert_eq!(session.len(), 1);
        assert_eq!(session[0].payload_str(), Some("second"));
    }

    #[test]
    fn test_swap_alternates_buffers() {
        let (_producer, mut consumer) = pair();
        let first = consumer.front_index();
        consumer.swap_buffers();
        assert_ne!(consumer.front_index(), first);
        consumer.swap_buffers();
        assert_eq!(consumer.front_index(), first);
        assert_eq!(consumer.stats().swaps, 2);
    }

    #[test]
    fn test_clear_releases_front() {
        let (mut producer, mut consumer) = pair();
        for i in 0..5 {
            producer.add_command(CommandKind::SetStyle, Some(format!("left: {i}px").into()), node(i), NativeRef::NULL, false);
        }

        assert_eq!(consumer.data().len(), 5);
        assert_eq!(consumer.size(), 5);
        consumer.clear();
        assert_eq!(consumer.size(), 0);
        assert!(consumer.is_empty());
    }

    #[test]
    fn test_update_signal_coalesces() {
        let (mut producer, mut consumer) = pair();
        assert!(!consumer.take_update_request());

        producer.add_command(CommandKind::SetStyle, None, node(1), NativeRef::NULL, true);
        producer.add_command(CommandKind::SetStyle, None, node(2), NativeRef::NULL, true);

        assert!(consumer.wait_for_update(Duration::from_millis(10)));
        assert!(!consumer.take_update_request());
        assert!(!consumer.wait_for_update(Duration::from_millis(1)));
    }

    #[test]
    fn test_update_signal_across_threads() {
        let (mut producer, consumer) = pair();
        let handle = std::thread::spawn(move || {
            producer.add_command(CommandKind::Navigate, Some("about:blank".into()), NativeRef::NULL, NativeRef::NULL, true);
            producer
        });

        assert!(consumer.wait_for_update(Duration::from_secs(5)));
        let _producer = handle.join().unwrap();
    }

    #[test]
    fn test_stats_count_enqueues() {
        let (mut producer, mut consumer) = pair();
        for i in 0..3 {
            producer.add_command(CommandKind::RemoveNode, None, node(i), NativeRef::NULL, false);
        }
        consumer.drain().finish();

        let stats = consumer.stats();
        assert_eq!(stats.commands_enqueued, 3);
        assert_eq!(stats.swaps, 1);
        assert_eq!(stats.contended_waits, 0);
    }
}
