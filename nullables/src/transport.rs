//! Nullable transport — scripted provider replies without a network.

use async_trait::async_trait;
use kyc_providers::{ProviderTransport, TransportError};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// One scripted answer to a provider call.
#[derive(Debug, Clone)]
pub enum Reply {
    /// Answer immediately with this body.
    Respond(Value),
    /// Answer with this body after a delay.
    RespondAfter(Duration, Value),
    /// Fail the call.
    Fail(TransportError),
    /// Never answer; only the caller's deadline ends the call.
    Hang,
}

/// A provider transport that plays back scripted replies and records payloads.
///
/// Queued replies are consumed in order; once the queue is empty the default
/// reply (if any) is used for every further call.
pub struct NullTransport {
    script: Mutex<VecDeque<Reply>>,
    default: Option<Reply>,
    /// Every payload received, in call order.
    payloads: Mutex<Vec<Value>>,
}

impl NullTransport {
    /// A transport with an empty script: calls fail until replies are enqueued.
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            default: None,
            payloads: Mutex::new(Vec::new()),
        }
    }

    /// A transport that gives the same reply to every call.
    pub fn always(reply: Reply) -> Self {
        Self {
            default: Some(reply),
            ..Self::new()
        }
    }

    /// Every call answers with `body`.
    pub fn responding(body: Value) -> Self {
        Self::always(Reply::Respond(body))
    }

    /// Every call fails with `err`.
    pub fn failing(err: TransportError) -> Self {
        Self::always(Reply::Fail(err))
    }

    /// Every call hangs.
    pub fn hanging() -> Self {
        Self::always(Reply::Hang)
    }

    /// Queue a reply ahead of the default.
    pub fn enqueue(&self, reply: Reply) {
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(reply);
    }

    /// Number of calls received so far.
    pub fn calls(&self) -> usize {
        self.payloads
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// All payloads received (for assertions).
    pub fn payloads(&self) -> Vec<Value> {
        self.payloads
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn next_reply(&self) -> Option<Reply> {
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .or_else(|| self.default.clone())
    }
}

impl Default for NullTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProviderTransport for NullTransport {
    async fn call(&self, payload: Value) -> Result<Value, TransportError> {
        self.payloads
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(payload);

        match self.next_reply() {
            Some(Reply::Respond(body)) => Ok(body),
            Some(Reply::RespondAfter(delay, body)) => {
                tokio::time::sleep(delay).await;
                Ok(body)
            }
            Some(Reply::Fail(err)) => Err(err),
            Some(Reply::Hang) => std::future::pending().await,
            None => Err(TransportError::Connect("no scripted reply".to_string())),
        }
    }
}
