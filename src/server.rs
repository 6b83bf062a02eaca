use axum::{
    extract::Path,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::error::MockError;
use crate::extract::ValidatedJson;
use crate::fixtures;
use crate::models::chat::{ChatCompletionChunk, ChatCompletionRequest};
use crate::models::common::{HealthStatus, ModelCard};
use crate::models::completions::{CompletionChunk, CompletionRequest, CompletionResponse};
use crate::models::embeddings::{EmbeddingRequest, EmbeddingResponse};
use crate::streaming::{sse_response, StreamScenario};
use crate::util::cors_layer_from_env;

/// Routes served by the mock, in registration order.
pub const ROUTES: [&str; 5] = [
    "/health",
    "/chat/completions",
    "/completions",
    "/embeddings",
    "/models/:model",
];

/// Build the Axum router. The route table is fixed once built; handlers share
/// no mutable state.
pub fn build_router() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/chat/completions", post(chat_completions))
        .route("/completions", post(completions))
        .route("/embeddings", post(embeddings))
        .route("/models/:model", get(model_info))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer_from_env()),
        )
}

async fn health() -> Json<HealthStatus> {
    Json(fixtures::health())
}

/// `POST /chat/completions`
/// - temperature outside [0, 2]: plain-text 400
/// - non-streaming: echo of the input messages
/// - streaming: two chunks, empty-choices first when the first message is the sentinel
async fn chat_completions(
    ValidatedJson(req): ValidatedJson<ChatCompletionRequest>,
) -> Result<Response, MockError> {
    if let Err(e) = req.check_temperature() {
        tracing::warn!(temperature = req.temperature, "rejecting chat request");
        return Err(e);
    }

    if req.stream {
        if req.messages.is_empty() {
            return Err(MockError::validation(
                "value_error",
                &["body", "messages"],
                "messages must not be empty when stream is true",
            ));
        }
        let scenario = StreamScenario::detect(req.first_text());
        debug!(messages = req.messages.len(), ?scenario, "streaming chat completion");
        return Ok(sse_response::<ChatCompletionChunk>(scenario));
    }

    debug!(messages = req.messages.len(), "chat completion");
    let body = fixtures::chat_completion(&req)?;
    Ok(Json(body).into_response())
}

/// `POST /completions`. No temperature rule here.
async fn completions(
    ValidatedJson(req): ValidatedJson<CompletionRequest>,
) -> Result<Response, MockError> {
    if req.stream {
        let scenario = StreamScenario::detect(req.prompt.as_single());
        debug!(?scenario, "streaming text completion");
        return Ok(sse_response::<CompletionChunk>(scenario));
    }

    let body: CompletionResponse = fixtures::completion(&req);
    debug!(choices = body.choices.len(), "text completion");
    Ok(Json(body).into_response())
}

async fn embeddings(ValidatedJson(req): ValidatedJson<EmbeddingRequest>) -> Json<EmbeddingResponse> {
    debug!(inputs = req.input.len(), "embeddings");
    Json(fixtures::embeddings(&req))
}

async fn model_info(Path(model): Path<String>) -> Json<ModelCard> {
    Json(fixtures::model_card(&model))
}
