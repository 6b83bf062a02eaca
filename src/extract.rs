//! JSON body extractor that turns every schema failure into [`MockError::Validation`].
//!
//! Handlers never build schema errors themselves; they take `ValidatedJson<T>`
//! and receive either a fully typed payload or nothing at all.
//!
//! A request without `Content-Type` is still parsed as JSON. Only a header that
//! names some other media type is refused, and that is a 422 like any other
//! schema failure.

use axum::{
    async_trait,
    body::Bytes,
    extract::{
        rejection::{BytesRejection, JsonRejection},
        FromRequest, Request,
    },
    http::{header, HeaderMap, StatusCode},
    Json,
};
use serde::de::DeserializeOwned;

use crate::error::{MockError, ValidationIssue};

/// Message of the rejection for a declared non-JSON body.
pub const NOT_JSON_MESSAGE: &str = "Expected request with `Content-Type: application/json`";

/// Like [`axum::Json`], but rejects with the `{"detail": [...]}` envelope.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = MockError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match decode_body(req, state).await {
            Ok(value) => Ok(ValidatedJson(value)),
            Err(err) => {
                tracing::warn!(error = %err, "rejected request body");
                Err(err)
            }
        }
    }
}

async fn decode_body<S, T>(req: Request, state: &S) -> Result<T, MockError>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    if !accepts_as_json(req.headers()) {
        return Err(MockError::validation("value_error", &["body"], NOT_JSON_MESSAGE));
    }
    let bytes = Bytes::from_request(req, state)
        .await
        .map_err(body_read_error)?;
    let Json(value) = Json::<T>::from_bytes(&bytes).map_err(rejection_to_error)?;
    Ok(value)
}

/// True when `Content-Type` is absent, `application/json`, or an
/// `application/*+json` type. Parameters such as `charset` are ignored.
pub fn accepts_as_json(headers: &HeaderMap) -> bool {
    let Some(value) = headers.get(header::CONTENT_TYPE) else {
        return true;
    };
    let Ok(value) = value.to_str() else {
        return false;
    };
    let essence = value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    match essence.split_once('/') {
        Some(("application", subtype)) => subtype == "json" || subtype.ends_with("+json"),
        _ => false,
    }
}

fn body_read_error(rejection: BytesRejection) -> MockError {
    MockError::Validation {
        status: rejection.status(),
        issue: ValidationIssue {
            kind: "body_unreadable".to_string(),
            loc: vec!["body".to_string()],
            msg: rejection.body_text(),
        },
    }
}

/// Map axum's JSON rejection onto the validation taxonomy.
///
/// Syntax and shape errors are both 422; anything else keeps the status axum chose.
pub fn rejection_to_error(rejection: JsonRejection) -> MockError {
    let (kind, status) = match &rejection {
        JsonRejection::JsonDataError(_) => ("value_error", StatusCode::UNPROCESSABLE_ENTITY),
        JsonRejection::JsonSyntaxError(_) => ("json_invalid", StatusCode::UNPROCESSABLE_ENTITY),
        _ => ("body_unreadable", rejection.status()),
    };

    MockError::Validation {
        status,
        issue: ValidationIssue {
            kind: kind.to_string(),
            loc: vec!["body".to_string()],
            msg: rejection.body_text(),
        },
    }
}
