//! Form submission → conversation → completion.

use std::collections::BTreeMap;

use chat_provider::{ChatMessage, ChatRole, Conversation};
use taskgpt::TaskDefinition;
use tracing::debug;

use crate::assistant::TaskAssistant;

pub const MESSAGE_FIELD: &str = "message";
pub const HISTORY_FIELD: &str = "chatHistory";

/// A parsed form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub message: String,
    pub history: Conversation,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    /// Nothing to display: missing input or a reply without a message.
    NoResult,
    Completed {
        message: ChatMessage,
        /// Present when the reply is in TaskGPT syntax.
        task: Option<TaskDefinition>,
    },
    Failed {
        error: String,
    },
}

/// Reads `message` (required, non-blank) and `chatHistory` (optional JSON array
/// of `{role, content}`). Returns `None` when the submission cannot be used.
pub fn parse_submission(fields: &BTreeMap<String, String>) -> Option<Submission> {
    let Some(message) = fields
        .get(MESSAGE_FIELD)
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
    else {
        debug!("submission without message");
        return None;
    };

    let history = match fields
        .get(HISTORY_FIELD)
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
    {
        None => Conversation::new(),
        Some(raw) => match serde_json::from_str::<Vec<ChatMessage>>(raw) {
            Ok(messages) => Conversation::from(messages),
            Err(error) => {
                debug!(%error, "submission with unparseable chat history");
                return None;
            }
        },
    };

    Some(Submission {
        message: message.to_string(),
        history,
    })
}

/// Appends the user message to the history and asks the assistant for a reply.
pub async fn handle_submission(
    assistant: &TaskAssistant,
    submission: Submission,
) -> SubmissionOutcome {
    let mut history = submission.history;
    history.push(ChatMessage::user(submission.message));

    match assistant.complete(&history).await {
        Ok(Some(message)) => {
            let task = match message.role {
                ChatRole::Assistant => TaskDefinition::parse(&message.content).ok(),
                _ => None,
            };
            debug!(task = task.is_some(), "completion received");
            SubmissionOutcome::Completed { message, task }
        }
        Ok(None) => {
            debug!("completion without message");
            SubmissionOutcome::NoResult
        }
        Err(error) => SubmissionOutcome::Failed {
            error: error.to_string(),
        },
    }
}

/// [`parse_submission`] then [`handle_submission`].
pub async fn handle_form(
    assistant: &TaskAssistant,
    fields: &BTreeMap<String, String>,
) -> SubmissionOutcome {
    match parse_submission(fields) {
        Some(submission) => handle_submission(assistant, submission).await,
        None => SubmissionOutcome::NoResult,
    }
}
