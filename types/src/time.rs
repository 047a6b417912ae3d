//! Clock port used for rate-limit windows and decision timestamps.
//!
//! Production code uses [`SystemClock`]; tests swap in a controllable clock
//! (see `kyc-nullables`).

use chrono::{DateTime, Utc};
use std::time::Instant;

/// Source of time for the verification engine.
pub trait Clock: Send + Sync {
    /// Monotonic instant, used for rate-limit windows.
    fn now(&self) -> Instant;

    /// Wall-clock time in UTC, used to stamp decisions.
    fn utc_now(&self) -> DateTime<Utc>;
}

/// Clock backed by the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn utc_now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
