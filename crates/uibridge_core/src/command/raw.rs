//! Flat `#[repr(C)]` view of a record for hosts that read across an FFI
//! boundary.
//!
//! The layout is process-private. It exists so a host can iterate a drained
//! batch as plain memory; nothing persists or ships it between builds.

use bytemuck::{Pod, Zeroable};

use super::record::CommandRecord;

/// `flags` bit: the host should schedule a repaint.
pub const FLAG_REQUEST_UPDATE: u32 = 1 << 0;
/// `flags` bit: `payload_ptr`/`payload_len` describe a payload.
pub const FLAG_HAS_PAYLOAD: u32 = 1 << 1;

/// One command as 40 bytes of plain data.
///
/// `payload_ptr` borrows from the source record. It is valid only while the
/// drain session that produced the item is alive.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct RawCommandItem {
    /// [`crate::CommandKind`] discriminant.
    pub kind: u32,
    /// `FLAG_*` bits.
    pub flags: u32,
    /// Payload length in bytes.
    pub payload_len: u64,
    /// Address of the first payload byte, or 0.
    pub payload_ptr: u64,
    /// Target native object address.
    pub target: u64,
    /// Auxiliary native object address.
    pub aux: u64,
}

impl From<&CommandRecord> for RawCommandItem {
    fn from(record: &CommandRecord) -> Self {
        let mut flags = 0;
        if record.request_update() {
            flags |= FLAG_REQUEST_UPDATE;
        }
        let (payload_ptr, payload_len) = match record.payload_str() {
            Some(text) => {
                flags |= FLAG_HAS_PAYLOAD;
                (text.as_ptr() as u64, text.len() as u64)
            }
            None => (0, 0),
        };

        Self {
            kind: record.kind().as_raw(),
            flags,
            payload_len,
            payload_ptr,
            target: record.target().addr() as u64,
            aux: record.aux().addr() as u64,
        }
    }
}

impl RawCommandItem {
    /// Whether [`FLAG_REQUEST_UPDATE`] is set.
    #[inline]
    #[must_use]
    pub fn request_update(&self) -> bool {
        self.flags & FLAG_REQUEST_UPDATE != 0
    }

    /// Whether [`FLAG_HAS_PAYLOAD`] is set.
    #[inline]
    #[must_use]
    pub fn has_payload(&self) -> bool {
        self.flags & FLAG_HAS_PAYLOAD != 0
    }

    /// Reinterprets a batch as bytes, e.g. to hand a single pointer to the host.
    #[must_use]
    pub fn as_bytes(items: &[Self]) -> &[u8] {
        bytemuck::cast_slice(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{CommandKind, NativeRef};

    #[test]
    fn test_layout() {
        assert_eq!(std::mem::size_of::<RawCommandItem>(), 40);
        assert_eq!(std::mem::align_of::<RawCommandItem>(), 8);
    }

    #[test]
    fn test_from_record() {
        let record = CommandRecord::new(
            CommandKind::SetAttribute,
            Some("href".into()),
            NativeRef::from_addr(0x1000),
            NativeRef::from_addr(0x2000),
            true,
        );
        let raw = RawCommandItem::from(&record);
        assert_eq!(raw.kind, CommandKind::SetAttribute.as_raw());
        assert!(raw.request_update());
        assert!(raw.has_payload());
        assert_eq!(raw.payload_len, 4);
        assert_eq!(raw.payload_ptr, record.payload_str().unwrap().as_ptr() as u64);
        assert_eq!(raw.target, 0x1000);
        assert_eq!(raw.aux, 0x2000);
    }

    #[test]
    fn test_without_payload() {
        let record = CommandRecord::new(
            CommandKind::RemoveNode,
            None,
            NativeRef::from_addr(8),
            NativeRef::NULL,
            false,
        );
        let raw = RawCommandItem::from(&record);
        assert_eq!(raw.flags, 0);
        assert_eq!(raw.payload_ptr, 0);
        assert_eq!(raw.payload_len, 0);
    }

    #[test]
    fn test_as_bytes() {
        let items = [RawCommandItem::zeroed(); 3];
        assert_eq!(RawCommandItem::as_bytes(&items).len(), 120);
    }
}
