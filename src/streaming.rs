//! Server-Sent Events emitters for the streaming endpoints.
//!
//! - Each chunk is sent as `data: {json}\n\n`, the JSON written by [`wire::to_string`]
//! - No `[DONE]` terminator, heartbeat or retry directive; the body simply ends
//! - Chunks are built lazily, one per poll of the response body, so a client
//!   disconnect drops the stream before later chunks exist

use std::marker::PhantomData;

use axum::{
    body::Body,
    http::header,
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use futures_util::stream::{self, StreamExt};
use serde::Serialize;

use crate::fixtures;
use crate::models::chat::ChatCompletionChunk;
use crate::models::completions::CompletionChunk;
use crate::wire;

/// Input that switches a stream to the empty-choices-first scenario.
pub const EMPTY_CHOICES: &str = "EMPTY_CHOICES";

/// One planned unit of a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkStep {
    /// `choices: []`, `usage: null`
    EmptyChoices,
    /// Single choice carrying this text.
    Content(&'static str),
}

const HELLO_WORLD: [ChunkStep; 2] = [ChunkStep::Content("Hello"), ChunkStep::Content(" world")];
const EMPTY_THEN_HELLO: [ChunkStep; 2] = [ChunkStep::EmptyChoices, ChunkStep::Content("Hello")];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamScenario {
    HelloWorld,
    EmptyChoicesFirst,
}

impl StreamScenario {
    /// Pick the scenario from the text that may hold the sentinel.
    pub fn detect(text: Option<&str>) -> Self {
        match text {
            Some(EMPTY_CHOICES) => StreamScenario::EmptyChoicesFirst,
            _ => StreamScenario::HelloWorld,
        }
    }

    pub fn plan(self) -> &'static [ChunkStep] {
        match self {
            StreamScenario::HelloWorld => &HELLO_WORLD,
            StreamScenario::EmptyChoicesFirst => &EMPTY_THEN_HELLO,
        }
    }
}

/// A chunk type that can realise any [`ChunkStep`].
pub trait StreamChunk: Serialize {
    fn empty_choices() -> Self;
    fn content(text: &str) -> Self;

    fn from_step(step: ChunkStep) -> Self
    where
        Self: Sized,
    {
        match step {
            ChunkStep::EmptyChoices => Self::empty_choices(),
            ChunkStep::Content(text) => Self::content(text),
        }
    }
}

impl StreamChunk for ChatCompletionChunk {
    fn empty_choices() -> Self {
        fixtures::chat_chunk_empty_choices()
    }

    fn content(text: &str) -> Self {
        fixtures::chat_chunk(text)
    }
}

impl StreamChunk for CompletionChunk {
    fn empty_choices() -> Self {
        fixtures::completion_chunk_empty_choices()
    }

    fn content(text: &str) -> Self {
        fixtures::completion_chunk(text)
    }
}

/// Per-request chunk generator. Each `next()` builds exactly one chunk.
pub struct ChunkSequence<C> {
    steps: std::slice::Iter<'static, ChunkStep>,
    _chunk: PhantomData<fn() -> C>,
}

impl<C: StreamChunk> ChunkSequence<C> {
    pub fn new(scenario: StreamScenario) -> Self {
        Self {
            steps: scenario.plan().iter(),
            _chunk: PhantomData,
        }
    }
}

impl<C: StreamChunk> Iterator for ChunkSequence<C> {
    type Item = C;

    fn next(&mut self) -> Option<C> {
        self.steps.next().map(|step| C::from_step(*step))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.steps.size_hint()
    }
}

/// Frame one chunk as an SSE `data:` event.
pub fn sse_frame<T: Serialize>(chunk: &T) -> Result<Bytes, serde_json::Error> {
    let json = wire::to_string(chunk)?;
    Ok(Bytes::from(format!("data: {json}\n\n")))
}

/// Build a `text/event-stream` response that lazily emits the scenario's chunks.
pub fn sse_response<C>(scenario: StreamScenario) -> Response
where
    C: StreamChunk + 'static,
{
    let frames = stream::iter(ChunkSequence::<C>::new(scenario))
        .map(|chunk| sse_frame(&chunk).map_err(std::io::Error::other));

    (
        [
            (header::CONTENT_TYPE, "text/event-stream"),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        Body::from_stream(frames),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[test]
    fn sentinel_selects_scenario() {
        assert_eq!(
            StreamScenario::detect(Some("EMPTY_CHOICES")),
            StreamScenario::EmptyChoicesFirst
        );
        assert_eq!(StreamScenario::detect(Some("empty_choices")), StreamScenario::HelloWorld);
        assert_eq!(StreamScenario::detect(Some("hi")), StreamScenario::HelloWorld);
        assert_eq!(StreamScenario::detect(None), StreamScenario::HelloWorld);
    }

    #[test]
    fn chat_sequence_order() {
        let chunks: Vec<_> =
            ChunkSequence::<ChatCompletionChunk>::new(StreamScenario::HelloWorld).collect();
        let deltas: Vec<_> = chunks
            .iter()
            .map(|c| c.choices[0].delta.content.clone().unwrap())
            .collect();
        assert_eq!(deltas, ["Hello", " world"]);
    }

    #[test]
    fn empty_choices_sequence() {
        let chunks: Vec<_> =
            ChunkSequence::<CompletionChunk>::new(StreamScenario::EmptyChoicesFirst).collect();
        assert_eq!(chunks.len(), 2);
        assert!(chunks[0].choices.is_empty());
        assert!(chunks[0].usage.is_none());
        assert_eq!(chunks[1].choices[0].text, "Hello");
        assert!(chunks[1].usage.is_some());
    }

    #[test]
    fn sequence_is_restartable_per_request() {
        let mut first = ChunkSequence::<CompletionChunk>::new(StreamScenario::HelloWorld);
        assert_eq!(first.size_hint(), (2, Some(2)));
        first.next();
        let second = ChunkSequence::<CompletionChunk>::new(StreamScenario::HelloWorld);
        assert_eq!(second.count(), 2);
        assert_eq!(first.count(), 1);
    }

    #[test]
    fn frame_format() {
        let frame = sse_frame(&serde_json::json!({"a": 1, "b": [null, "x"]})).unwrap();
        assert_eq!(&frame[..], b"data: {\"a\": 1, \"b\": [null, \"x\"]}\n\n");
    }

    #[tokio::test]
    async fn response_body_is_concatenated_frames() {
        let resp = sse_response::<ChatCompletionChunk>(StreamScenario::EmptyChoicesFirst);
        assert_eq!(resp.headers()[header::CONTENT_TYPE], "text/event-stream");
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        let expected = [
            sse_frame(&fixtures::chat_chunk_empty_choices()).unwrap(),
            sse_frame(&fixtures::chat_chunk("Hello")).unwrap(),
        ]
        .concat();
        assert_eq!(body.to_vec(), expected);
        assert!(!String::from_utf8_lossy(&body).contains("[DONE]"));
    }
}
