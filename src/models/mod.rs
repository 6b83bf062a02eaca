//! Request and response models for the emulated endpoints.
//!
//! - `chat`: `/chat/completions` payloads, including the ordered content-part decoder.
//! - `completions`: `/completions` payloads.
//! - `embeddings`: `/embeddings` payloads.
//! - `common`: usage blocks, the model descriptor and the health body.
//!
//! Response types serialize absent values as `null` rather than skipping them,
//! so the emitted JSON keeps the same keys as the hosted API.

pub mod chat;
pub mod common;
pub mod completions;
pub mod embeddings;

pub use chat::{
    ChatCompletionChunk, ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ContentPart,
    MessageContent,
};
pub use common::{EmbeddingUsage, HealthStatus, ModelCard, Usage};
pub use completions::{CompletionChunk, CompletionRequest, CompletionResponse, PromptInput};
pub use embeddings::{EmbeddingInput, EmbeddingRequest, EmbeddingResponse};
