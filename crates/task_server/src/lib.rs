//! HTTP front end for the TaskGPT assistant.
//!
//! `POST /completion` takes multipart fields `message` and `chatHistory` and
//! answers with the next assistant message; `GET /health` answers `ok`.

pub mod assistant;
pub mod config;
pub mod error;
pub mod handler;
pub mod routes;

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use chat_provider_mock::MockProvider;
use tokio::net::TcpListener;
use tracing::info;

pub use assistant::{preamble, CompletionFailed, TaskAssistant, MAX_TOKENS, MODEL, TEMPERATURE};
pub use config::{ProviderKind, ServerConfig};
pub use error::ServerError;
pub use handler::{
    handle_form, handle_submission, parse_submission, Submission, SubmissionOutcome,
};
pub use routes::build_router;

/// Builds the assistant selected by `config`.
pub fn build_assistant(config: &ServerConfig) -> Result<TaskAssistant, ServerError> {
    let assistant = match config.provider {
        ProviderKind::OpenAi => TaskAssistant::openai(config.openai_provider_config())?,
        ProviderKind::Mock => TaskAssistant::new(
            Arc::new(MockProvider::default()),
            config.completion_timeout,
        ),
    };
    info!(
        provider = %assistant.provider().profile().provider_id,
        "completion provider ready"
    );
    Ok(assistant)
}

/// Binds `addr` and serves until `shutdown` resolves.
pub async fn serve(
    addr: SocketAddr,
    assistant: Arc<TaskAssistant>,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), ServerError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;
    info!(addr = %listener.local_addr()?, "task server listening");

    axum::serve(listener, build_router(assistant))
        .with_graceful_shutdown(shutdown)
        .await?;
    info!("task server stopped");
    Ok(())
}
