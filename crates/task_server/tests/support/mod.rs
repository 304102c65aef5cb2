#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use chat_provider_mock::{MockProvider, MockReply};
use chat_provider_openai::OpenAiProviderConfig;
use task_server::{build_router, TaskAssistant};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tower::ServiceExt;

pub const BOUNDARY: &str = "taskgpt-test-boundary";

pub struct Harness {
    pub provider: Arc<MockProvider>,
    pub assistant: Arc<TaskAssistant>,
}

impl Harness {
    pub fn new(replies: impl IntoIterator<Item = MockReply>) -> Self {
        Self::with_provider(MockProvider::new(replies))
    }

    pub fn with_provider(provider: MockProvider) -> Self {
        Self::with_timeout(provider, Duration::from_secs(5))
    }

    pub fn with_timeout(provider: MockProvider, timeout: Duration) -> Self {
        let provider = Arc::new(provider);
        let assistant = Arc::new(TaskAssistant::new(
            Arc::clone(&provider) as Arc<dyn chat_provider::CompletionProvider>,
            timeout,
        ));
        Self {
            provider,
            assistant,
        }
    }

    /// Assistant over the real OpenAI adapter, pointed at `base_url`.
    pub fn openai(base_url: &str) -> Arc<TaskAssistant> {
        let config = OpenAiProviderConfig::new("sk-test")
            .with_base_url(base_url)
            .with_timeout(Duration::from_secs(5));
        Arc::new(TaskAssistant::openai(config).expect("openai assistant"))
    }

    pub fn router(&self) -> Router {
        build_router(Arc::clone(&self.assistant))
    }
}

pub fn multipart_body(fields: &[(&str, &str)]) -> String {
    let mut body = String::new();
    for (name, value) in fields {
        body.push_str(&format!("--{BOUNDARY}\r\n"));
        body.push_str(&format!(
            "Content-Disposition: form-data; name=\"{name}\"\r\n\r\n"
        ));
        body.push_str(value);
        body.push_str("\r\n");
    }
    body.push_str(&format!("--{BOUNDARY}--\r\n"));
    body
}

pub fn completion_request(fields: &[(&str, &str)]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/completion")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(fields)))
        .expect("request")
}

pub async fn send(router: Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = router.oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body");
    (status, body.to_vec())
}

pub fn json(body: &[u8]) -> serde_json::Value {
    serde_json::from_slice(body).expect("response body should be JSON")
}

/// Local chat completions endpoint answering every request with `body`.
///
/// Returns the base URL to configure the client with.
pub async fn serve_completions(body: serde_json::Value) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("local TCP listener should bind");
    let addr = listener.local_addr().expect("listener address");
    let body = body.to_string();

    tokio::spawn(async move {
        while let Ok((socket, _)) = listener.accept().await {
            let body = body.clone();
            tokio::spawn(async move {
                answer(socket, &body).await;
            });
        }
    });

    format!("http://{addr}/v1")
}

async fn answer(mut socket: TcpStream, body: &str) {
    let mut request = Vec::new();
    let mut buffer = [0_u8; 2048];
    let head_end = loop {
        let Ok(n) = socket.read(&mut buffer).await else {
            return;
        };
        if n == 0 {
            return;
        }
        request.extend_from_slice(&buffer[..n]);
        if let Some(position) = request.windows(4).position(|window| window == b"\r\n\r\n") {
            break position + 4;
        }
    };

    let head = String::from_utf8_lossy(&request[..head_end]).to_ascii_lowercase();
    let content_length = head
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|value| value.trim().parse::<usize>().ok())
        .unwrap_or(0);
    let mut received = request.len() - head_end;
    while received < content_length {
        match socket.read(&mut buffer).await {
            Ok(0) | Err(_) => return,
            Ok(n) => received += n,
        }
    }

    let response = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len(),
    );
    let _ = socket.write_all(response.as_bytes()).await;
    let _ = socket.shutdown().await;
}
