//! Nullable clock — deterministic time for testing.

use chrono::{DateTime, TimeZone, Utc};
use kyc_types::Clock;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

/// A deterministic clock for testing.
///
/// Time only advances when you tell it to. Clones share the same time, so a
/// test can keep one handle while the engine owns another.
#[derive(Debug, Clone)]
pub struct NullClock {
    current: Arc<Mutex<(Instant, DateTime<Utc>)>>,
}

impl NullClock {
    /// Start at the current instant, with wall time fixed at 2024-01-01T00:00:00Z.
    pub fn new() -> Self {
        let wall = Utc
            .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
            .single()
            .unwrap_or_else(Utc::now);
        Self::at(wall)
    }

    /// Start at the given wall time.
    pub fn at(wall: DateTime<Utc>) -> Self {
        Self {
            current: Arc::new(Mutex::new((Instant::now(), wall))),
        }
    }

    /// Advance both the monotonic and the wall clock.
    pub fn advance(&self, by: Duration) {
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        current.0 += by;
        if let Some(wall) = chrono::Duration::from_std(by)
            .ok()
            .and_then(|delta| current.1.checked_add_signed(delta))
        {
            current.1 = wall;
        }
    }
}

impl Default for NullClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for NullClock {
    fn now(&self) -> Instant {
        self.current.lock().unwrap_or_else(PoisonError::into_inner).0
    }

    fn utc_now(&self) -> DateTime<Utc> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner).1
    }
}
