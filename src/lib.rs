#![forbid(unsafe_code)]
#![doc = r#"
mock-openai

A deterministic stand-in for the OpenAI HTTP API, meant to be pointed at by
client test suites instead of the real service.

Crate highlights
- HTTP server (in `server`): `/health`, `/chat/completions`, `/completions`,
  `/embeddings`, `/models/{model}`.
- Responses are fixed literals or echoes of the request, so assertions can be exact.
- Streaming endpoints emit `data: <json>\n\n` frames; sending `"EMPTY_CHOICES"`
  as the first message (or the prompt) makes the first frame carry no choices.

Modules
- `models`: request and response shapes, including the ordered content-part decoder.
- `extract`: JSON extractor mapping schema failures to the validation envelope.
- `fixtures`: pure builders for every response body.
- `streaming`: chunk plans, lazy chunk sequences and SSE framing.
- `wire`: the spaced, ASCII-only JSON text used for echoes and SSE payloads.
- `server`: Axum router and handlers.
- `error`, `config`, `util`: error mapping, server configuration, tracing and CORS.
"#]

pub mod config;
pub mod error;
pub mod extract;
pub mod fixtures;
pub mod models;
pub mod server;
pub mod streaming;
pub mod util;
pub mod wire;

pub use crate::error::MockError;
pub use crate::server::build_router;

// Re-export model namespaces for convenience (`use mock_openai::chat`).
pub use crate::models::{chat, completions, embeddings};
