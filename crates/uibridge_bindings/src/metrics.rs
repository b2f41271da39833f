//! Host-provided scalars read by bindings.

use parking_lot::RwLock;

/// Values the host thread publishes for the scripting thread to read.
///
/// The host updates them (e.g. when the window moves to another display);
/// bindings read them on every property access.
#[derive(Debug, Default)]
pub struct HostMetrics {
    device_pixel_ratio: RwLock<Option<f64>>,
}

impl HostMetrics {
    /// Creates metrics with nothing registered yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates metrics with a known device pixel ratio.
    #[must_use]
    pub fn with_device_pixel_ratio(ratio: f64) -> Self {
        Self {
            device_pixel_ratio: RwLock::new(Some(ratio)),
        }
    }

    /// Publishes a new device pixel ratio.
    pub fn set_device_pixel_ratio(&self, ratio: f64) {
        *self.device_pixel_ratio.write() = Some(ratio);
    }

    /// Withdraws the device pixel ratio, e.g. while the host view is detached.
    pub fn clear_device_pixel_ratio(&self) {
        *self.device_pixel_ratio.write() = None;
    }

    /// The current device pixel ratio, if the host has registered one.
    #[must_use]
    pub fn device_pixel_ratio(&self) -> Option<f64> {
        *self.device_pixel_ratio.read()
    }
}
