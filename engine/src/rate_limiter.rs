//! Fixed-window rate limiting for outbound provider calls.
//!
//! One limiter instance is shared by all four provider gateways and by every
//! concurrent verification in the process, so document, biometric, address and
//! sanctions calls draw from the same budget.
//!
//! The window is wall-clock based: it restarts (`used = 0`, `start = now`) the
//! first time a check observes that strictly more than `window` has elapsed.
//! A quiet window therefore stays open past its nominal length until the next
//! check.

use kyc_types::Clock;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use crate::config::RateLimitConfig;

// TODO: move the window into a shared store so several replicas can enforce one budget.
pub struct RateLimiter {
    limit: u32,
    window: Duration,
    clock: Arc<dyn Clock>,
    state: Mutex<Window>,
}

struct Window {
    start: Instant,
    used: u32,
}

impl RateLimiter {
    /// A limiter allowing `limit` acquisitions per `window`, starting now.
    pub fn new(limit: u32, window: Duration, clock: Arc<dyn Clock>) -> Self {
        let start = clock.now();
        Self {
            limit,
            window,
            clock,
            state: Mutex::new(Window { start, used: 0 }),
        }
    }

    pub fn from_config(config: &RateLimitConfig, clock: Arc<dyn Clock>) -> Self {
        Self::new(config.limit, config.window(), clock)
    }

    /// Take one slot from the current window.
    ///
    /// The reset check, the comparison and the increment run under one lock,
    /// so concurrent callers never observe a torn window.
    pub fn try_acquire(&self) -> bool {
        let mut window = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let now = self.clock.now();

        if now.saturating_duration_since(window.start) > self.window {
            window.start = now;
            window.used = 0;
        }

        if window.used < self.limit {
            window.used += 1;
            true
        } else {
            false
        }
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn window(&self) -> Duration {
        self.window
    }
}
