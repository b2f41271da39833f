//! # Queue Configuration
//!
//! Loaded once when an execution context is created. The deployment mode
//! is fixed for the lifetime of the queue built from it.
//!
//! ```toml
//! dedicated_thread = true
//! initial_capacity = 256
//!
//! [backoff]
//! spin_limit = 6
//! yield_limit = 10
//! sleep_micros = 50
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{QueueError, QueueResult};

/// Largest accepted `spin_limit`. A step spins `2^step` times.
pub const MAX_SPIN_LIMIT: u32 = 16;

/// Wait policy for the swap guard.
///
/// A waiter spins with exponentially growing bursts up to `spin_limit`,
/// then yields its time slice up to `yield_limit`, then sleeps
/// `sleep_micros` between attempts. It never gives up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackoffConfig {
    /// Last step that busy-spins.
    pub spin_limit: u32,
    /// Last step that yields instead of sleeping.
    pub yield_limit: u32,
    /// Sleep between attempts once yielding is exhausted.
    pub sleep_micros: u64,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            spin_limit: 6,
            yield_limit: 10,
            sleep_micros: 50,
        }
    }
}

impl BackoffConfig {
    /// Checks that the phases are ordered and the sleep is non-zero.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::InvalidConfig`] describing the first bad field.
    pub fn validate(&self) -> QueueResult<()> {
        if self.spin_limit > MAX_SPIN_LIMIT {
            return Err(QueueError::InvalidConfig(format!(
                "backoff.spin_limit {} exceeds {MAX_SPIN_LIMIT}",
                self.spin_limit
            )));
        }
        if self.yield_limit < self.spin_limit {
            return Err(QueueError::InvalidConfig(format!(
                "backoff.yield_limit {} is below spin_limit {}",
                self.yield_limit, self.spin_limit
            )));
        }
        if self.sleep_micros == 0 {
            return Err(QueueError::InvalidConfig(
                "backoff.sleep_micros must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Construction parameters for a [`crate::UiCommandQueue`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueConfig {
    /// Whether a dedicated consumer thread drains the queue.
    ///
    /// `false` builds the single-buffer variant, `true` the double buffer.
    pub dedicated_thread: bool,
    /// Records reserved per buffer up front.
    pub initial_capacity: usize,
    /// Swap guard wait policy.
    pub backoff: BackoffConfig,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            dedicated_thread: false,
            initial_capacity: 64,
            backoff: BackoffConfig::default(),
        }
    }
}

impl QueueConfig {
    /// Default configuration with a dedicated consumer thread.
    #[must_use]
    pub fn dedicated() -> Self {
        Self {
            dedicated_thread: true,
            ..Self::default()
        }
    }

    /// Parses and validates a TOML document.
    ///
    /// Missing keys fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::ConfigParse`] for malformed TOML and
    /// [`QueueError::InvalidConfig`] for out-of-range values.
    pub fn from_toml_str(content: &str) -> QueueResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::ConfigIo`] if the file cannot be read, otherwise
    /// the same errors as [`QueueConfig::from_toml_str`].
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> QueueResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validates every section.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::InvalidConfig`] describing the first bad field.
    pub fn validate(&self) -> QueueResult<()> {
        self.backoff.validate()
    }
}
