use std::sync::Arc;

use task_server::{build_assistant, serve, ServerConfig, ServerError};
use taskgpt::logging::init_logging;
use taskgpt::EnvConfig;
use tracing::warn;

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    init_logging(&EnvConfig::from_env());

    let config = ServerConfig::from_env()?;
    let assistant = Arc::new(build_assistant(&config)?);

    serve(config.bind, assistant, async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            warn!(%error, "failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    })
    .await
}
