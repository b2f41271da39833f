//! # Command Buffer
//!
//! Append-only storage for [`CommandRecord`]s.

use super::record::{CommandKind, CommandPayload, CommandRecord, NativeRef};

/// Growable, ordered sequence of command records.
///
/// Insertion order is issuance order. Appends are amortized O(1) and
/// capacity survives [`CommandBuffer::clear`], so a buffer that is drained
/// every frame stops allocating once it has seen its peak load.
///
/// # Thread Safety
///
/// This buffer is NOT thread-safe. The coordinators in [`crate::sync`] hand
/// each buffer to exactly one side at a time.
#[derive(Debug, Default)]
pub struct CommandBuffer {
    records: Vec<CommandRecord>,
}

impl CommandBuffer {
    /// Creates an empty buffer without allocating.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty buffer with room for `capacity` records.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
        }
    }

    /// Appends a fully formed record.
    #[inline]
    pub fn push(&mut self, record: CommandRecord) {
        self.records.push(record);
    }

    /// Builds and appends a record. `payload` ownership moves into the buffer.
    #[inline]
    pub fn add_command(
        &mut self,
        kind: CommandKind,
        payload: Option<CommandPayload>,
        target: NativeRef,
        aux: NativeRef,
        request_update: bool,
    ) {
        self.push(CommandRecord::new(kind, payload, target, aux, request_update));
    }

    /// Contiguous view of every stored record, valid until the next
    /// mutating call.
    #[inline]
    #[must_use]
    pub fn data(&self) -> &[CommandRecord] {
        &self.records
    }

    /// Iterates records in issuance order.
    pub fn iter(&self) -> std::slice::Iter<'_, CommandRecord> {
        self.records.iter()
    }

    /// Number of stored records.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no records are stored.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Allocated record slots.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.records.capacity()
    }

    /// Drops every record (and its payload) and resets the length to zero.
    ///
    /// Capacity is retained.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}

impl<'a> IntoIterator for &'a CommandBuffer {
    type Item = &'a CommandRecord;
    type IntoIter = std::slice::Iter<'a, CommandRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
