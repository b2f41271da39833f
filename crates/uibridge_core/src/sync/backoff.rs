//! Wait policy for the swap guard.

use std::thread;
use std::time::Duration;

use crate::config::BackoffConfig;

/// Escalating wait: spin, then yield, then sleep.
///
/// ```text
/// step 0..=spin_limit         spin 2^step iterations
/// step ..=yield_limit         thread::yield_now()
/// beyond                      thread::sleep(sleep_micros)
/// ```
///
/// The guard holder may be descheduled at any moment. Spinning alone would
/// burn the waiter's whole time slice against a thread that cannot run, so
/// the wait hands the CPU back once the spin phase is exhausted.
#[derive(Debug)]
pub struct Backoff {
    config: BackoffConfig,
    step: u32,
    warned: bool,
}

impl Backoff {
    /// Starts a fresh wait.
    #[must_use]
    pub fn new(config: BackoffConfig) -> Self {
        Self {
            config,
            step: 0,
            warned: false,
        }
    }

    /// Waits once, then advances to the next step.
    pub fn snooze(&mut self) {
        if self.step <= self.config.spin_limit {
            for _ in 0..(1u32 << self.step.min(crate::config::MAX_SPIN_LIMIT)) {
                std::hint::spin_loop();
            }
        } else if self.step <= self.config.yield_limit {
            thread::yield_now();
        } else {
            if !self.warned {
                self.warned = true;
                tracing::warn!(
                    step = self.step,
                    sleep_micros = self.config.sleep_micros,
                    "swap guard still held after yielding, sleeping between attempts"
                );
            }
            thread::sleep(Duration::from_micros(self.config.sleep_micros));
        }

        if self.step <= self.config.yield_limit {
            self.step += 1;
        }
    }

    /// Current step.
    #[inline]
    #[must_use]
    pub fn step(&self) -> u32 {
        self.step
    }

    /// Whether the wait has reached the sleep phase.
    #[inline]
    #[must_use]
    pub fn is_sleeping(&self) -> bool {
        self.step > self.config.yield_limit
    }

    /// Restarts from the spin phase.
    pub fn reset(&mut self) {
        self.step = 0;
        self.warned = false;
    }
}
