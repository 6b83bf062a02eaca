//! Error type shared by the handlers and its HTTP mapping.
//!
//! Two deliberately different shapes reach clients:
//! - schema failures use a `{"detail": [...]}` JSON envelope (422),
//! - the chat temperature rule answers with a bare plain-text 400.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Exact body of the temperature rejection.
pub const TEMPERATURE_RANGE_MESSAGE: &str = "Temperature must be between 0.0 and 2.0";

/// One entry of the validation `detail` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    #[serde(rename = "type")]
    pub kind: String,
    pub loc: Vec<String>,
    pub msg: String,
}

/// `{"detail": [...]}` body of a schema failure. Keys keep declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationBody {
    pub detail: Vec<ValidationIssue>,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}): {}", self.kind, self.msg)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MockError {
    #[error("temperature {0} outside [0.0, 2.0]")]
    TemperatureOutOfRange(f64),

    #[error("invalid request body {issue}")]
    Validation {
        status: StatusCode,
        issue: ValidationIssue,
    },

    #[error("serialize error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl MockError {
    /// Schema failure with the standard 422 status.
    pub fn validation(kind: &str, loc: &[&str], msg: impl Into<String>) -> Self {
        Self::Validation {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            issue: ValidationIssue {
                kind: kind.to_string(),
                loc: loc.iter().map(|s| s.to_string()).collect(),
                msg: msg.into(),
            },
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            MockError::TemperatureOutOfRange(_) => StatusCode::BAD_REQUEST,
            MockError::Validation { status, .. } => *status,
            MockError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for MockError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            // &str bodies are sent as text/plain; charset=utf-8
            MockError::TemperatureOutOfRange(_) => {
                (status, TEMPERATURE_RANGE_MESSAGE).into_response()
            }
            MockError::Validation { issue, .. } => {
                let body = ValidationBody {
                    detail: vec![issue],
                };
                (status, Json(body)).into_response()
            }
            MockError::Serialization(e) => error_response(status, &format!("serialize error: {e}")),
        }
    }
}

/// Build a JSON error response with the given HTTP status and message.
pub fn error_response(status: StatusCode, msg: &str) -> Response {
    let body = json!({ "error": { "message": msg } });
    (status, Json(body)).into_response()
}
