use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::multipart::{Multipart, MultipartError, MultipartRejection};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chat_provider::ChatMessage;
use serde::Serialize;
use taskgpt::TaskDefinition;
use tracing::debug;

use crate::assistant::TaskAssistant;
use crate::handler::{handle_form, SubmissionOutcome};

#[derive(Clone)]
pub struct AppState {
    assistant: Arc<TaskAssistant>,
}

#[derive(Debug, Serialize)]
struct CompletedBody {
    message: ChatMessage,
    task: Option<TaskDefinition>,
}

#[derive(Debug, Serialize)]
struct FailedBody {
    error: String,
}

pub fn build_router(assistant: Arc<TaskAssistant>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/completion", post(completion))
        .with_state(AppState { assistant })
}

async fn health() -> &'static str {
    "ok"
}

async fn completion(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let fields = match multipart {
        Ok(multipart) => match read_fields(multipart).await {
            Ok(fields) => fields,
            Err(error) => {
                debug!(%error, "unreadable multipart body");
                return StatusCode::NO_CONTENT.into_response();
            }
        },
        Err(rejection) => {
            debug!(%rejection, "completion request is not multipart");
            return StatusCode::NO_CONTENT.into_response();
        }
    };

    outcome_response(handle_form(&state.assistant, &fields).await)
}

/// Collects named text fields; later duplicates replace earlier ones.
async fn read_fields(mut multipart: Multipart) -> Result<BTreeMap<String, String>, MultipartError> {
    let mut fields = BTreeMap::new();
    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        let value = field.text().await?;
        fields.insert(name, value);
    }
    Ok(fields)
}

fn outcome_response(outcome: SubmissionOutcome) -> Response {
    match outcome {
        SubmissionOutcome::NoResult => StatusCode::NO_CONTENT.into_response(),
        SubmissionOutcome::Completed { message, task } => {
            (StatusCode::OK, Json(CompletedBody { message, task })).into_response()
        }
        SubmissionOutcome::Failed { error } => {
            (StatusCode::BAD_GATEWAY, Json(FailedBody { error })).into_response()
        }
    }
}
