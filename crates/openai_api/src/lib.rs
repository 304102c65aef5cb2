//! Transport-only client for an OpenAI-compatible chat completions endpoint.
//!
//! This crate owns request building, header construction and response/error
//! parsing. It knows nothing about prompts, conversations or retries.

pub mod client;
pub mod config;
pub mod error;
pub mod headers;
pub mod payload;
pub mod url;

pub use client::OpenAiApiClient;
pub use config::OpenAiApiConfig;
pub use error::OpenAiApiError;
pub use payload::{ChatCompletionRequest, ChatCompletionResponse, RequestMessage, ReplyMessage};
pub use reqwest::StatusCode;
pub use url::normalize_chat_completions_url;
