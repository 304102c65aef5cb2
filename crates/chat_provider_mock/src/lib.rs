//! Deterministic mock implementation of the shared `chat_provider` contract.
//!
//! Replies are scripted up front and handed out in order; every request the
//! provider receives is recorded for later inspection.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use chat_provider::{
    ChatMessage, CompletionError, CompletionProvider, CompletionRequest, ProviderProfile,
};

/// Stable provider identifier used for explicit startup selection.
pub const MOCK_PROVIDER_ID: &str = "mock";

/// Most recent requests kept for inspection; older ones are dropped.
pub const REQUEST_LOG_LIMIT: usize = 64;

/// One scripted outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockReply {
    /// Reply with an assistant message.
    Message(String),
    /// Succeed without a message.
    Empty,
    Fail(CompletionError),
}

#[derive(Debug, Default)]
struct MockState {
    replies: VecDeque<MockReply>,
    requests: VecDeque<CompletionRequest>,
    received: usize,
}

/// Deterministic mock provider used by `task_server` tests and local runs.
///
/// Once the script runs out, the fallback reply is repeated.
#[derive(Debug)]
pub struct MockProvider {
    state: Mutex<MockState>,
    fallback: MockReply,
    delay: Option<Duration>,
}

impl MockProvider {
    #[must_use]
    pub fn new(replies: impl IntoIterator<Item = MockReply>) -> Self {
        Self {
            state: Mutex::new(MockState {
                replies: replies.into_iter().collect(),
                requests: VecDeque::new(),
                received: 0,
            }),
            fallback: MockReply::Empty,
            delay: None,
        }
    }

    /// Answers every request with the same assistant message.
    #[must_use]
    pub fn always(content: impl Into<String>) -> Self {
        Self::new(Vec::new()).with_fallback(MockReply::Message(content.into()))
    }

    #[must_use]
    pub fn with_fallback(mut self, fallback: MockReply) -> Self {
        self.fallback = fallback;
        self
    }

    /// Sleeps before answering; lets callers exercise their timeouts.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Up to [`REQUEST_LOG_LIMIT`] most recent requests, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<CompletionRequest> {
        lock_unpoisoned(&self.state).requests.iter().cloned().collect()
    }

    /// Total requests received, including ones no longer kept.
    #[must_use]
    pub fn request_count(&self) -> usize {
        lock_unpoisoned(&self.state).received
    }

    fn next_reply(&self, request: CompletionRequest) -> MockReply {
        let mut state = lock_unpoisoned(&self.state);
        state.received += 1;
        if state.requests.len() == REQUEST_LOG_LIMIT {
            state.requests.pop_front();
        }
        state.requests.push_back(request);
        state
            .replies
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone())
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::always("Walk the dog, 5, 1")
    }
}

#[async_trait]
impl CompletionProvider for MockProvider {
    fn profile(&self) -> ProviderProfile {
        ProviderProfile {
            provider_id: MOCK_PROVIDER_ID.to_string(),
            endpoint: None,
        }
    }

    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<Option<ChatMessage>, CompletionError> {
        let reply = self.next_reply(request);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match reply {
            MockReply::Message(content) => Ok(Some(ChatMessage::assistant(content))),
            MockReply::Empty => Ok(None),
            MockReply::Fail(error) => Err(error),
        }
    }
}

fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
