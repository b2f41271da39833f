//! # Queue Error Types
//!
//! The hot path (enqueue, drain, clear) never fails. These errors only come
//! from construction-time decisions: configuration and queue splitting.

use thiserror::Error;

/// Errors that can occur while configuring or splitting a command queue.
#[derive(Error, Debug)]
pub enum QueueError {
    /// A producer/consumer split was requested on a queue without a
    /// dedicated consumer thread.
    #[error("queue has no dedicated consumer thread and cannot be split")]
    NotDedicated,

    /// Configuration values are out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be read.
    #[error("config file error: {0}")]
    ConfigIo(#[from] std::io::Error),

    /// Configuration file is not valid TOML for [`crate::QueueConfig`].
    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

/// Result type for queue construction.
pub type QueueResult<T> = Result<T, QueueError>;
