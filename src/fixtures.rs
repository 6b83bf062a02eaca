//! Deterministic response builders.
//!
//! Every identifier, timestamp and usage counter below is a fixed literal so
//! responses compare byte-for-byte across runs.

use once_cell::sync::Lazy;

use crate::models::chat::{
    ChatChoice, ChatCompletionChunk, ChatCompletionRequest, ChatCompletionResponse, ChatDelta,
    ChatResponseMessage, ChatStreamChoice,
};
use crate::models::common::{EmbeddingUsage, HealthStatus, ModelCard, Usage};
use crate::models::completions::{
    CompletionChoice, CompletionChunk, CompletionRequest, CompletionResponse,
    CompletionStreamChoice,
};
use crate::models::embeddings::{Embedding, EmbeddingRequest, EmbeddingResponse};
use crate::wire;

pub const CHAT_COMPLETION_ID: &str = "chatcmpl-123";
pub const CHAT_CREATED: u64 = 1677652288;
pub const SYSTEM_FINGERPRINT: &str = "fp_44709d6fcb";
pub const CHAT_MODEL: &str = "gpt-4o-mini";

pub const COMPLETION_ID: &str = "cmpl-uqkvlQyYK7bGYrRHQ0eXlWi7";
pub const COMPLETION_CREATED: u64 = 1589478378;

pub const EMBEDDING_MODEL: &str = "text-embedding-ada-002";
pub const EMBEDDING_DIMENSIONS: u32 = 1536;

pub const MODEL_CREATED: u64 = 1686935002;
pub const MODEL_OWNER: &str = "openai";

pub const CHAT_USAGE: Usage = Usage {
    prompt_tokens: 9,
    completion_tokens: 12,
    total_tokens: 21,
};

pub const COMPLETION_USAGE: Usage = Usage {
    prompt_tokens: 5,
    completion_tokens: 7,
    total_tokens: 12,
};

pub const EMBEDDING_USAGE: EmbeddingUsage = EmbeddingUsage {
    prompt_tokens: 8,
    total_tokens: 8,
};

/// `[0, 1, ..., 1535]`, built on first use and shared for the process lifetime.
pub static PLACEHOLDER_EMBEDDING: Lazy<Vec<u32>> =
    Lazy::new(|| (0..EMBEDDING_DIMENSIONS).collect());

// ============================================================================
// Chat
// ============================================================================

/// Echo response: the assistant content is the JSON array of the input messages,
/// encoded by [`wire::to_string`].
pub fn chat_completion(
    req: &ChatCompletionRequest,
) -> Result<ChatCompletionResponse, serde_json::Error> {
    let echoed = wire::to_string(&req.messages)?;
    Ok(ChatCompletionResponse {
        id: CHAT_COMPLETION_ID.to_string(),
        object: "chat.completion".to_string(),
        created: CHAT_CREATED,
        model: CHAT_MODEL.to_string(),
        system_fingerprint: SYSTEM_FINGERPRINT.to_string(),
        choices: vec![ChatChoice {
            index: 0,
            message: ChatResponseMessage {
                role: "assistant".to_string(),
                content: echoed,
            },
            logprobs: None,
            finish_reason: "stop".to_string(),
        }],
        usage: CHAT_USAGE,
    })
}

fn chat_chunk_envelope(choices: Vec<ChatStreamChoice>, usage: Option<Usage>) -> ChatCompletionChunk {
    ChatCompletionChunk {
        id: CHAT_COMPLETION_ID.to_string(),
        object: "chat.completion.chunk".to_string(),
        created: CHAT_CREATED,
        model: CHAT_MODEL.to_string(),
        system_fingerprint: SYSTEM_FINGERPRINT.to_string(),
        choices,
        usage,
    }
}

/// Chunk carrying one content delta.
pub fn chat_chunk(content: &str) -> ChatCompletionChunk {
    chat_chunk_envelope(
        vec![ChatStreamChoice {
            delta: ChatDelta {
                content: Some(content.to_string()),
                function_call: None,
                role: None,
                tool_calls: None,
            },
            finish_reason: None,
            index: 0,
            logprobs: None,
        }],
        Some(CHAT_USAGE),
    )
}

/// Chunk with `choices: []` and `usage: null`.
pub fn chat_chunk_empty_choices() -> ChatCompletionChunk {
    chat_chunk_envelope(Vec::new(), None)
}

// ============================================================================
// Text completions
// ============================================================================

/// One choice per prompt, each echoing its prompt. Every choice reports `index: 0`.
pub fn completion(req: &CompletionRequest) -> CompletionResponse {
    let choices = req
        .prompt
        .texts()
        .into_iter()
        .map(|text| CompletionChoice {
            text: text.to_string(),
            index: 0,
            logprobs: None,
            finish_reason: "length".to_string(),
        })
        .collect();

    CompletionResponse {
        id: COMPLETION_ID.to_string(),
        object: "text_completion".to_string(),
        created: COMPLETION_CREATED,
        model: CHAT_MODEL.to_string(),
        choices,
        usage: COMPLETION_USAGE,
    }
}

fn completion_chunk_envelope(
    choices: Vec<CompletionStreamChoice>,
    usage: Option<Usage>,
) -> CompletionChunk {
    CompletionChunk {
        id: COMPLETION_ID.to_string(),
        object: "text_completion".to_string(),
        created: COMPLETION_CREATED,
        model: CHAT_MODEL.to_string(),
        choices,
        system_fingerprint: None,
        usage,
    }
}

pub fn completion_chunk(text: &str) -> CompletionChunk {
    completion_chunk_envelope(
        vec![CompletionStreamChoice {
            finish_reason: None,
            index: 0,
            logprobs: None,
            text: text.to_string(),
        }],
        Some(COMPLETION_USAGE),
    )
}

pub fn completion_chunk_empty_choices() -> CompletionChunk {
    completion_chunk_envelope(Vec::new(), None)
}

// ============================================================================
// Embeddings, models, health
// ============================================================================

pub fn embeddings(req: &EmbeddingRequest) -> EmbeddingResponse {
    let data = (0..req.input.len())
        .map(|index| Embedding {
            object: "embedding".to_string(),
            embedding: PLACEHOLDER_EMBEDDING.clone(),
            index,
        })
        .collect();

    EmbeddingResponse {
        object: "list".to_string(),
        data,
        model: EMBEDDING_MODEL.to_string(),
        usage: EMBEDDING_USAGE,
    }
}

/// Any id is accepted; the descriptor just echoes it.
pub fn model_card(id: &str) -> ModelCard {
    ModelCard {
        id: id.to_string(),
        object: "model".to_string(),
        created: MODEL_CREATED,
        owned_by: MODEL_OWNER.to_string(),
    }
}

pub fn health() -> HealthStatus {
    HealthStatus {
        status: "healthy".to_string(),
    }
}
