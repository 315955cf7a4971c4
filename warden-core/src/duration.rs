//! Stable duration type for configuration files.
//!
//! [`DurationMs`] serializes as a plain integer of milliseconds, so an
//! attempt TTL reads `"ttl": 600000` in a config file. Session records
//! store epoch milliseconds in the same unit.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Duration in milliseconds with a stable serialization format.
///
/// # Examples
///
/// ```
/// use warden_core::DurationMs;
///
/// let d = DurationMs::from_secs(90);
/// assert_eq!(d.as_millis(), 90_000);
///
/// let json = serde_json::to_string(&d).unwrap();
/// assert_eq!(json, "90000");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DurationMs(u64);

impl DurationMs {
    /// Zero duration.
    pub const ZERO: Self = Self(0);

    /// Create from milliseconds.
    pub const fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    /// Create from seconds.
    pub const fn from_secs(secs: u64) -> Self {
        Self(secs.saturating_mul(1000))
    }

    /// Get the value in milliseconds.
    pub fn as_millis(&self) -> u64 {
        self.0
    }

    /// Whether this is the zero duration.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Convert to `std::time::Duration`.
    pub fn to_std(&self) -> Duration {
        Duration::from_millis(self.0)
    }
}

/// Saturates at `u64::MAX` milliseconds.
impl From<Duration> for DurationMs {
    fn from(d: Duration) -> Self {
        Self(u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_to_and_from_std() {
        let d = DurationMs::from(Duration::from_micros(2_500));
        assert_eq!(d.as_millis(), 2);
        assert_eq!(DurationMs::from_secs(3).to_std(), Duration::from_secs(3));
        assert_eq!(DurationMs::from(Duration::MAX).as_millis(), u64::MAX);
        assert!(DurationMs::ZERO.is_zero());
    }
}
