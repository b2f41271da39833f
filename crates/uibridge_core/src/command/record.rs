//! Command record definition.

use std::fmt;

/// Mutation kind carried by a [`CommandRecord`].
///
/// The queue never interprets the kind; the host dispatches on it.
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CommandKind {
    /// Create an element node. Payload: tag name.
    CreateNode = 0,
    /// Create a text node. Payload: text content.
    CreateTextNode = 1,
    /// Create a comment node.
    CreateComment = 2,
    /// Insert `target` relative to `aux`. Payload: position keyword.
    InsertAdjacentNode = 3,
    /// Remove `target` from its parent.
    RemoveNode = 4,
    /// Clone `target` into `aux`.
    CloneNode = 5,
    /// Set a property on `target`. Payload: serialized key and value.
    SetProperty = 6,
    /// Set an attribute on `target`.
    SetAttribute = 7,
    /// Remove an attribute from `target`.
    RemoveAttribute = 8,
    /// Set an inline style declaration on `target`.
    SetStyle = 9,
    /// Register an event listener. Payload: event type.
    AddEvent = 10,
    /// Unregister an event listener.
    RemoveEvent = 11,
    /// Release the host-side peer of `target`.
    DisposeBindingObject = 12,
    /// Navigate the host view. Payload: URL.
    Navigate = 13,
}

impl CommandKind {
    /// Every kind, in discriminant order.
    pub const ALL: [Self; 14] = [
        Self::CreateNode,
        Self::CreateTextNode,
        Self::CreateComment,
        Self::InsertAdjacentNode,
        Self::RemoveNode,
        Self::CloneNode,
        Self::SetProperty,
        Self::SetAttribute,
        Self::RemoveAttribute,
        Self::SetStyle,
        Self::AddEvent,
        Self::RemoveEvent,
        Self::DisposeBindingObject,
        Self::Navigate,
    ];

    /// Returns the wire discriminant.
    #[inline]
    #[must_use]
    pub const fn as_raw(self) -> u32 {
        self as u32
    }

    /// Maps a discriminant back to a kind.
    #[must_use]
    pub fn from_raw(raw: u32) -> Option<Self> {
        Self::ALL.get(raw as usize).copied()
    }
}

/// Owned string payload of a command.
///
/// Deliberately not `Clone`: once moved into a record the producer has no
/// way to reach it again, and the consumer's clear is the only release point.
#[derive(PartialEq, Eq)]
pub struct CommandPayload(Box<str>);

impl CommandPayload {
    /// Takes ownership of `value`.
    #[must_use]
    pub fn new(value: impl Into<Box<str>>) -> Self {
        Self(value.into())
    }

    /// Borrows the payload text.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in bytes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the payload is the empty string.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Gives the text back, consuming the payload.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0.into_string()
    }
}

impl From<String> for CommandPayload {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for CommandPayload {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Debug for CommandPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

/// Untyped reference to a native object owned by another subsystem.
///
/// The record does not own the object. The owner keeps it alive at least
/// until the record has been consumed.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct NativeRef(usize);

impl NativeRef {
    /// The null reference.
    pub const NULL: Self = Self(0);

    /// Wraps a raw address.
    #[inline]
    #[must_use]
    pub const fn from_addr(addr: usize) -> Self {
        Self(addr)
    }

    /// Wraps a pointer.
    #[inline]
    #[must_use]
    pub fn from_ptr<T>(ptr: *const T) -> Self {
        Self(ptr as usize)
    }

    /// The raw address.
    #[inline]
    #[must_use]
    pub const fn addr(self) -> usize {
        self.0
    }

    /// Reinterprets the address as a pointer. Dereferencing it is the
    /// owner's business.
    #[inline]
    #[must_use]
    pub fn as_ptr<T>(self) -> *const T {
        self.0 as *const T
    }

    /// Whether this is [`NativeRef::NULL`].
    #[inline]
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }
}

/// One queued UI mutation.
///
/// Fields are private: a record is immutable from the moment it is appended
/// until its buffer is cleared.
#[derive(Debug, PartialEq, Eq)]
pub struct CommandRecord {
    kind: CommandKind,
    payload: Option<CommandPayload>,
    target: NativeRef,
    aux: NativeRef,
    request_update: bool,
}

impl CommandRecord {
    /// Builds a record, taking ownership of `payload`.
    #[must_use]
    pub fn new(
        kind: CommandKind,
        payload: Option<CommandPayload>,
        target: NativeRef,
        aux: NativeRef,
        request_update: bool,
    ) -> Self {
        Self {
            kind,
            payload,
            target,
            aux,
            request_update,
        }
    }

    /// The mutation kind.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> CommandKind {
        self.kind
    }

    /// The owned payload, if any.
    #[inline]
    #[must_use]
    pub fn payload(&self) -> Option<&CommandPayload> {
        self.payload.as_ref()
    }

    /// The payload text, if any.
    #[inline]
    #[must_use]
    pub fn payload_str(&self) -> Option<&str> {
        self.payload.as_ref().map(CommandPayload::as_str)
    }

    /// The primary native object.
    #[inline]
    #[must_use]
    pub fn target(&self) -> NativeRef {
        self.target
    }

    /// The secondary native object.
    #[inline]
    #[must_use]
    pub fn aux(&self) -> NativeRef {
        self.aux
    }

    /// Whether the host should schedule a repaint after draining.
    #[inline]
    #[must_use]
    pub fn request_update(&self) -> bool {
        self.request_update
    }
}
