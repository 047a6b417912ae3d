//! Retry with backoff, applied uniformly to a provider call closure.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use crate::config::{BackoffStrategy, RetryConfig};

/// Delay policy between failed attempts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backoff {
    Fixed(Duration),
    /// `initial`, then doubling, never above `max`.
    Exponential { initial: Duration, max: Duration },
}

impl Backoff {
    /// Delay to wait after the `failures`-th failed attempt (1-based).
    pub fn delay(&self, failures: u32) -> Duration {
        match *self {
            Self::Fixed(delay) => delay,
            Self::Exponential { initial, max } => {
                let factor = 1u32
                    .checked_shl(failures.saturating_sub(1))
                    .unwrap_or(u32::MAX);
                initial.checked_mul(factor).unwrap_or(max).min(max)
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    attempts: u32,
    backoff: Backoff,
}

impl RetryPolicy {
    /// `attempts` counts the first try; zero is treated as one.
    pub fn new(attempts: u32, backoff: Backoff) -> Self {
        Self {
            attempts: attempts.max(1),
            backoff,
        }
    }

    pub fn from_config(config: &RetryConfig) -> Self {
        let initial = Duration::from_millis(config.backoff_ms);
        let backoff = match config.strategy {
            BackoffStrategy::Fixed => Backoff::Fixed(initial),
            BackoffStrategy::Exponential => Backoff::Exponential {
                initial,
                max: Duration::from_millis(config.max_backoff_ms).max(initial),
            },
        };
        Self::new(config.attempts, backoff)
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn backoff(&self) -> Backoff {
        self.backoff
    }

    /// Run `op` until it succeeds or the attempt budget is spent.
    ///
    /// `op` receives the 1-based attempt number. The backoff delay is honoured
    /// between attempts, never after the last one. Returns the first `Ok` or the
    /// last `Err`.
    pub async fn run<T, E, F, Fut>(&self, mut op: F) -> Result<T, E>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        let mut attempt = 1;
        loop {
            match op(attempt).await {
                Ok(value) => return Ok(value),
                Err(err) if attempt >= self.attempts => {
                    tracing::warn!(
                        attempt,
                        max_attempts = self.attempts,
                        error = %err,
                        "provider attempt failed, retry budget exhausted"
                    );
                    return Err(err);
                }
                Err(err) => {
                    let delay = self.backoff.delay(attempt);
                    tracing::warn!(
                        attempt,
                        max_attempts = self.attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "provider attempt failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}
