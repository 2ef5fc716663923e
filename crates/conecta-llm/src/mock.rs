use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use conecta_core::errors::ProviderError;

use crate::generator::TextGenerator;

/// Pre-programmed replies for deterministic testing without API calls.
pub enum MockReply {
    Text(String),
    Error(ProviderError),
    /// Wait a duration, then yield the inner reply.
    Delayed(Duration, Box<MockReply>),
}

impl MockReply {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn delayed(delay: Duration, inner: MockReply) -> Self {
        Self::Delayed(delay, Box::new(inner))
    }
}

/// Mock generator that returns pre-programmed replies in sequence.
/// Also records every prompt it receives, so tests can assert on the
/// composed prompt text.
pub struct MockGenerator {
    replies: Mutex<VecDeque<MockReply>>,
    prompts: Mutex<Vec<String>>,
    call_count: AtomicUsize,
}

impl MockGenerator {
    pub fn new(replies: Vec<MockReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            prompts: Mutex::new(Vec::new()),
            call_count: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Prompts received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    fn name(&self) -> &str {
        "mock"
    }

    fn model(&self) -> &str {
        "mock-model"
    }

    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let call = self.call_count.fetch_add(1, Ordering::Relaxed);
        self.prompts.lock().push(prompt.to_string());

        let reply = self.replies.lock().pop_front().ok_or_else(|| {
            ProviderError::InvalidRequest(format!("MockGenerator: no reply configured for call {call}"))
        })?;

        resolve_reply(reply).await
    }
}

/// Resolve a MockReply, handling Delayed by sleeping first.
async fn resolve_reply(reply: MockReply) -> Result<String, ProviderError> {
    let mut current = reply;
    loop {
        match current {
            MockReply::Text(text) => return Ok(text),
            MockReply::Error(e) => return Err(e),
            MockReply::Delayed(delay, inner) => {
                tokio::time::sleep(delay).await;
                current = *inner;
            }
        }
    }
}
