//! One drain cycle as a value.

use std::ops::Deref;

use crate::command::{CommandBuffer, CommandRecord, RawCommandItem};

/// The records exposed by one drain cycle.
///
/// Obtained from [`crate::CommandSource::drain`], which already performed the
/// swap. The session borrows the front buffer exclusively, so nothing can
/// clear it early, and clearing happens exactly once: when the session is
/// finished or dropped.
///
/// ```rust,ignore
/// let session = consumer.drain();
/// for record in session.iter() {
///     host.apply(record);
/// }
/// session.finish();
/// ```
#[must_use = "dropping a drain session discards its records"]
pub struct DrainSession<'a> {
    buffer: &'a mut CommandBuffer,
}

impl<'a> DrainSession<'a> {
    pub(crate) fn new(buffer: &'a mut CommandBuffer) -> Self {
        Self { buffer }
    }

    /// The drained records in issuance order.
    #[inline]
    #[must_use]
    pub fn records(&self) -> &[CommandRecord] {
        self.buffer.data()
    }

    /// Whether any record in this batch asked for a repaint.
    #[must_use]
    pub fn needs_update(&self) -> bool {
        self.records().iter().any(CommandRecord::request_update)
    }

    /// Flattens the batch for an FFI host.
    ///
    /// Payload pointers borrow from this session.
    #[must_use]
    pub fn to_raw(&self) -> Vec<RawCommandItem> {
        self.records().iter().map(RawCommandItem::from).collect()
    }

    /// Ends the cycle, releasing every payload.
    pub fn finish(self) {}
}

impl Deref for DrainSession<'_> {
    type Target = [CommandRecord];

    fn deref(&self) -> &Self::Target {
        self.records()
    }
}

impl Drop for DrainSession<'_> {
    fn drop(&mut self) {
        self.buffer.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{CommandKind, NativeRef};

    #[test]
    fn test_session_clears_on_drop() {
        let mut buffer = CommandBuffer::new();
        buffer.add_command(CommandKind::CreateNode, Some("span".into()), NativeRef::from_addr(1), NativeRef::NULL, false);
        buffer.add_command(CommandKind::SetStyle, Some("color: red".into()), NativeRef::from_addr(1), NativeRef::NULL, true);

        {
            let session = DrainSession::new(&mut buffer);
            assert_eq!(session.len(), 2);
            assert!(session.needs_update());
            assert_eq!(session[0].payload_str(), Some("span"));

            let raw = session.to_raw();
            assert_eq!(raw.len(), 2);
            assert_eq!(raw[1].kind, CommandKind::SetStyle.as_raw());
        }

        assert!(buffer.is_empty());
    }

    #[test]
    fn test_finish_clears() {
        let mut buffer = CommandBuffer::new();
        buffer.add_command(CommandKind::RemoveNode, None, NativeRef::from_addr(3), NativeRef::NULL, false);

        let session = DrainSession::new(&mut buffer);
        assert!(!session.needs_update());
        session.finish();

        assert!(buffer.is_empty());
    }
}
