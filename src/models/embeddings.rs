use serde::{Deserialize, Serialize};

use crate::models::common::EmbeddingUsage;

/// Embedding input (single or batch).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EmbeddingInput {
    Single(String),
    Batch(Vec<String>),
}

impl EmbeddingInput {
    /// Number of vectors the response carries.
    pub fn len(&self) -> usize {
        match self {
            EmbeddingInput::Single(_) => 1,
            EmbeddingInput::Batch(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// `POST /embeddings` body. `model` and other fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddingRequest {
    pub input: EmbeddingInput,
}

/// Embedding object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Embedding {
    pub object: String, // "embedding"
    pub embedding: Vec<u32>,
    pub index: usize,
}

/// Embedding response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddingResponse {
    pub object: String, // "list"
    pub data: Vec<Embedding>,
    pub model: String,
    pub usage: EmbeddingUsage,
}
