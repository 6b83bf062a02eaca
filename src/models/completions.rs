use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::common::Usage;

/// `prompt` accepts a single string or a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PromptInput {
    Single(String),
    Batch(Vec<String>),
}

impl PromptInput {
    /// Prompts in request order; a single prompt yields one item.
    pub fn texts(&self) -> Vec<&str> {
        match self {
            PromptInput::Single(s) => vec![s.as_str()],
            PromptInput::Batch(v) => v.iter().map(String::as_str).collect(),
        }
    }

    /// The prompt when given as a bare string. Lists never match the sentinel.
    pub fn as_single(&self) -> Option<&str> {
        match self {
            PromptInput::Single(s) => Some(s),
            PromptInput::Batch(_) => None,
        }
    }
}

/// `POST /completions` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub prompt: PromptInput,
    #[serde(default)]
    pub stream: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionChoice {
    pub text: String,
    pub index: u32,
    pub logprobs: Option<Value>,
    pub finish_reason: String, // always "length"
}

/// Complete text completion response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub id: String,
    pub object: String, // "text_completion"
    pub created: u64,
    pub model: String,
    pub choices: Vec<CompletionChoice>,
    pub usage: Usage,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionStreamChoice {
    pub finish_reason: Option<String>,
    pub index: u32,
    pub logprobs: Option<Value>,
    pub text: String,
}

/// Streaming unit of `/completions`. Unlike chat chunks the object name is
/// the same as the non-streaming response and the fingerprint is null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionChunk {
    pub id: String,
    pub object: String, // "text_completion"
    pub created: u64,
    pub model: String,
    pub choices: Vec<CompletionStreamChoice>,
    pub system_fingerprint: Option<String>,
    pub usage: Option<Usage>,
}
