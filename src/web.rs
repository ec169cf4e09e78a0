//! Minimal web front end: a static page and a JSON `/chat` endpoint.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{instrument, warn};

use crate::core::{LlmError, LlmProvider, UserInput};

const INDEX_HTML: &str = include_str!("web/index.html");

pub const GOODBYE: &str = "Chat ended. Goodbye!";

/// Shared, read-only state. `provider` is `None` when no API key was configured.
#[derive(Clone)]
pub struct AppState {
    pub provider: Option<Arc<dyn LlmProvider>>,
}

impl AppState {
    pub fn new(provider: Option<Arc<dyn LlmProvider>>) -> Self {
        Self { provider }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatQuestion {
    #[serde(default)]
    pub question: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ChatAnswer {
    pub answer: String,
    pub ended: bool,
}

/// Failure body returned by `/chat`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }
}

impl From<LlmError> for ApiError {
    fn from(error: LlmError) -> Self {
        let status = match &error {
            LlmError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            LlmError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            LlmError::Http { status_code, .. } => StatusCode::from_u16(*status_code)
                .ok()
                .filter(|status| status.is_client_error() || status.is_server_error())
                .unwrap_or(StatusCode::BAD_GATEWAY),
            LlmError::Network { .. } if error.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
            LlmError::Network { .. } | LlmError::Parse { .. } => StatusCode::BAD_GATEWAY,
        };

        Self::new(status, error.detail())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/chat", post(chat))
        .route("/health", get(health_check))
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

#[instrument(skip_all)]
async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

#[instrument(skip_all)]
async fn chat(
    State(state): State<AppState>,
    body: Result<Json<ChatQuestion>, JsonRejection>,
) -> Result<Json<ChatAnswer>, ApiError> {
    let Json(body) = body?;
    let question = match UserInput::parse(&body.question) {
        UserInput::Quit => {
            return Ok(Json(ChatAnswer {
                answer: GOODBYE.to_string(),
                ended: true,
            }));
        }
        UserInput::Empty => {
            return Err(ApiError::new(
                StatusCode::BAD_REQUEST,
                "Question must not be empty.",
            ));
        }
        UserInput::Prompt(question) => question,
    };

    let provider = state.provider.as_ref().ok_or_else(|| {
        ApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "GROQ_API_KEY is not configured on the server.",
        )
    })?;

    let answer = provider.complete(&question).await.map_err(|e| {
        warn!(error = %e, "Chat completion failed");
        ApiError::from(e)
    })?;

    Ok(Json(ChatAnswer {
        answer,
        ended: false,
    }))
}
