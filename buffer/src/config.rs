//! Serializable construction settings.

use serde::{Deserialize, Serialize};

/// Settings used to build a [`RingBuffer`](crate::RingBuffer).
///
/// Missing fields fall back to their defaults, so the struct can be embedded
/// in a larger application config with only the keys that matter:
///
/// ```
/// use streamring_buffer::RingBufferConfig;
///
/// let cfg: RingBufferConfig = serde_json::from_str(r#"{"capacity": 256}"#).unwrap();
/// assert_eq!(cfg.capacity, 256);
/// assert!(!cfg.warnings);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RingBufferConfig {
    /// Number of slots. Zero leaves the buffer unallocated until resized.
    pub capacity: usize,
    /// Report overwrites and rejected requests to the diagnostic sink.
    pub warnings: bool,
}

impl RingBufferConfig {
    /// Returns a config for `capacity` slots with warnings off.
    pub fn new(capacity: usize) -> Self {
        RingBufferConfig {
            capacity,
            ..Default::default()
        }
    }

    /// Sets whether diagnostics are reported.
    pub fn with_warnings(mut self, enabled: bool) -> Self {
        self.warnings = enabled;
        self
    }
}
