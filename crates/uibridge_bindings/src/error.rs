//! # Binding Error Types

use thiserror::Error;

/// Errors raised by host-object bindings.
///
/// None of these reach the command queue.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BindingError {
    /// A global with this name is already installed.
    #[error("global already bound: {0}")]
    AlreadyBound(String),

    /// No global with this name is installed.
    #[error("global not bound: {0}")]
    NotBound(String),

    /// The property is host-owned and cannot be assigned from script.
    #[error("property is read-only: {0}")]
    ReadOnly(String),

    /// The assigned value has the wrong type for the property.
    #[error("invalid value for {property}: expected {expected}, got {actual}")]
    InvalidValue {
        /// Property being assigned.
        property: String,
        /// Expected script type.
        expected: &'static str,
        /// Script type that was assigned.
        actual: &'static str,
    },
}

/// Result type for binding operations.
pub type BindingResult<T> = Result<T, BindingError>;
