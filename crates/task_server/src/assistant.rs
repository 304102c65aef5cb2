//! TaskGPT completion service: fixed preamble and generation parameters in front
//! of a [`CompletionProvider`].

use std::sync::Arc;
use std::time::Duration;

use chat_provider::{
    ChatMessage, CompletionError, CompletionProvider, CompletionRequest, Conversation,
    ProviderInitError,
};
use chat_provider_openai::{OpenAiProvider, OpenAiProviderConfig};
use thiserror::Error;
use tracing::{debug, warn};

pub const MODEL: &str = "gpt-3.5-turbo";
pub const TEMPERATURE: f32 = 0.0;
pub const MAX_TOKENS: u32 = 50;

const PERSONA: &str = "\
You are a useful and objective tool that creates tasks called TaskGPT.
You will receive input from a user looking to create a task.
Your job is to help them create actionable tasks that they can complete while asking as few questions as possible.
You will return one of two responses:
1. An isolated task definition string in TaskGPT syntax (see examples). It will contain the name of the task the user is asking to create and an estimated session length and number of sessions it will take to complete.
2. A supportive response that indicates that the user's input was not understood or not actionable, and how they can improve their input. You might suggest an actionable task (do not use the TaskGPT syntax).";

/// Seed exchanges shown to the model after the persona, as `(user, assistant)`.
const EXAMPLES: [(&str, &str); 6] = [
    (
        "I want to learn how to play the guitar.",
        "That sounds like a great idea! How about learning a song?",
    ),
    (
        "I want to learn how to play Little Wing by Jimi Hendrix.",
        "\"Learn Little Wing by Jimi Hendrix, 30, 3\"",
    ),
    ("I want to walk my dog.", "\"Walk the dog, 5, 1\""),
    ("I need to brush my teeth.", "\"Brush teeth, 1, 1\""),
    (
        "I want to go swimming for half an hour every day this week.",
        "\"Swim every day this week, 30, 7\"",
    ),
    (
        "I need to go shopping before my friend comes over",
        "\"Go shopping, 30, 1\"",
    ),
];

/// Messages sent ahead of every caller conversation.
pub fn preamble() -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(1 + EXAMPLES.len() * 2);
    messages.push(ChatMessage::system(PERSONA));
    for (user, assistant) in EXAMPLES {
        messages.push(ChatMessage::user(user));
        messages.push(ChatMessage::assistant(assistant));
    }
    messages
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompletionFailed {
    #[error("completion timed out after {}s", .0.as_secs_f32())]
    Timeout(Duration),
    #[error(transparent)]
    Provider(#[from] CompletionError),
}

pub struct TaskAssistant {
    provider: Arc<dyn CompletionProvider>,
    timeout: Duration,
}

impl TaskAssistant {
    pub fn new(provider: Arc<dyn CompletionProvider>, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    /// Builds an assistant over the OpenAI provider. Fails before any network
    /// call when the API key is missing.
    pub fn openai(config: OpenAiProviderConfig) -> Result<Self, ProviderInitError> {
        let timeout = config
            .timeout
            .unwrap_or(crate::config::DEFAULT_COMPLETION_TIMEOUT);
        let provider = OpenAiProvider::new(config)?;
        Ok(Self::new(Arc::new(provider), timeout))
    }

    pub fn provider(&self) -> &Arc<dyn CompletionProvider> {
        &self.provider
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Preamble followed by `history`, with the fixed generation parameters.
    pub fn build_request(&self, history: &Conversation) -> CompletionRequest {
        let mut messages = preamble();
        messages.extend(history.messages().iter().cloned());
        CompletionRequest {
            model: MODEL.to_string(),
            messages,
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        }
    }

    /// Returns the next assistant message for `history`, or `None` when the
    /// remote reply carried no message or only whitespace. The preamble is never part of the result.
    pub async fn complete(
        &self,
        history: &Conversation,
    ) -> Result<Option<ChatMessage>, CompletionFailed> {
        let request = self.build_request(history);
        debug!(
            history = history.len(),
            messages = request.messages.len(),
            "requesting completion"
        );

        match tokio::time::timeout(self.timeout, self.provider.complete(request)).await {
            Ok(Ok(reply)) => Ok(reply.filter(|message| !message.content.trim().is_empty())),
            Ok(Err(error)) => {
                warn!(%error, "completion failed");
                Err(error.into())
            }
            Err(_) => {
                warn!(timeout_secs = self.timeout.as_secs_f32(), "completion timed out");
                Err(CompletionFailed::Timeout(self.timeout))
            }
        }
    }
}
