//! Canned [`Llm`] clients.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::port::outbound::llm::Llm;

/// Always replies with the same text.
pub struct MockLlm {
    response: String,
    calls: AtomicUsize,
}

impl MockLlm {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of completions served.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Llm for MockLlm {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn complete(&self, _prompt: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.response.clone())
    }
}

/// Fails every call with a connection error.
pub struct FailingLlm;

#[async_trait]
impl Llm for FailingLlm {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn complete(&self, _prompt: &str) -> Result<String> {
        Err(Error::Connection("provider unavailable".into()))
    }
}

/// Answers only after `delay`.
pub struct SlowLlm {
    delay: Duration,
}

impl SlowLlm {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl Llm for SlowLlm {
    fn name(&self) -> &'static str {
        "slow"
    }

    async fn complete(&self, _prompt: &str) -> Result<String> {
        tokio::time::sleep(self.delay).await;
        Ok(r#"{"same_event": true, "confidence": 1.0}"#.to_string())
    }
}
