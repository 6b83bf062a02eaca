mod common;

use axum::http::StatusCode;
use common::{json_request, send};
use mock_openai::completions::CompletionResponse;
use serde_json::json;

#[tokio::test]
async fn single_prompt_yields_one_choice() {
    let resp = send(json_request(
        "/completions",
        json!({"model": "gpt-4o-mini", "prompt": "Once upon a time"}),
    ))
    .await;
    assert_eq!(resp.status, StatusCode::OK, "body: {}", resp.text());

    let body: CompletionResponse = serde_json::from_slice(&resp.body).unwrap();
    assert_eq!(body.id, "cmpl-uqkvlQyYK7bGYrRHQ0eXlWi7");
    assert_eq!(body.object, "text_completion");
    assert_eq!(body.created, 1589478378);
    assert_eq!(body.model, "gpt-4o-mini");
    assert_eq!(body.choices.len(), 1);
    assert_eq!(body.choices[0].text, "Once upon a time");
    assert_eq!(body.choices[0].finish_reason, "length");
    assert_eq!(body.usage.total_tokens, 12);
}

#[tokio::test]
async fn prompt_list_yields_choice_per_entry() {
    let resp = send(json_request("/completions", json!({"prompt": ["a", "b", "c"]}))).await;
    let body = resp.json();
    let choices = body["choices"].as_array().unwrap();
    assert_eq!(choices.len(), 3);
    for (choice, expected) in choices.iter().zip(["a", "b", "c"]) {
        assert_eq!(choice["text"], expected);
        // every choice reports index 0, unlike embeddings
        assert_eq!(choice["index"], 0);
        assert_eq!(choice["finish_reason"], "length");
        assert!(choice["logprobs"].is_null());
    }
    assert!(body.get("system_fingerprint").is_none());
}

#[tokio::test]
async fn temperature_is_not_checked() {
    let resp = send(json_request(
        "/completions",
        json!({"prompt": "x", "temperature": 9.5}),
    ))
    .await;
    assert_eq!(resp.status, StatusCode::OK);
}

#[tokio::test]
async fn stream_hello_world() {
    let resp = send(json_request("/completions", json!({"prompt": "hi", "stream": true}))).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.content_type.as_deref(), Some("text/event-stream"));

    let frames = resp.sse_frames();
    assert_eq!(frames.len(), 2);
    assert_eq!(frames[0]["choices"][0]["text"], "Hello");
    assert_eq!(frames[1]["choices"][0]["text"], " world");
    for frame in &frames {
        assert_eq!(frame["object"], "text_completion");
        assert!(frame["system_fingerprint"].is_null());
        assert!(frame["choices"][0]["finish_reason"].is_null());
        assert_eq!(frame["usage"]["prompt_tokens"], 5);
    }
}

#[tokio::test]
async fn stream_empty_choices_sentinel() {
    let resp = send(json_request(
        "/completions",
        json!({"prompt": "EMPTY_CHOICES", "stream": true}),
    ))
    .await;
    let frames = resp.sse_frames();
    assert_eq!(frames.len(), 2);
    assert_eq!(frames[0]["choices"], json!([]));
    assert!(frames[0]["usage"].is_null());
    assert_eq!(frames[1]["choices"][0]["text"], "Hello");
}

#[tokio::test]
async fn sentinel_in_prompt_list_is_not_special() {
    let resp = send(json_request(
        "/completions",
        json!({"prompt": ["EMPTY_CHOICES"], "stream": true}),
    ))
    .await;
    let frames = resp.sse_frames();
    assert_eq!(frames[0]["choices"][0]["text"], "Hello");
    assert_eq!(frames[1]["choices"][0]["text"], " world");
}
