use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::MockError;
use crate::models::common::Usage;

// ============================================================================
// Content parts
// ============================================================================

/// Tag of a text content part: always `"text"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextPartType {
    #[serde(rename = "text")]
    Text,
}

/// Tag of an image content part: always `"image_url"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImagePartType {
    #[serde(rename = "image_url")]
    ImageUrl,
}

/// Tag of an audio content part: always `"input_audio"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AudioPartType {
    #[serde(rename = "input_audio")]
    InputAudio,
}

/// `{"type": "text", "text": "..."}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextContentPart {
    #[serde(rename = "type")]
    pub kind: TextPartType,
    pub text: String,
}

/// Image fidelity hint: "auto" | "low" | "high".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageDetail {
    Auto,
    Low,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageUrl {
    pub url: String,
    pub detail: ImageDetail,
}

/// `{"type": "image_url", "image_url": {"url": "...", "detail": "auto"}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageContentPart {
    #[serde(rename = "type")]
    pub kind: ImagePartType,
    pub image_url: ImageUrl,
}

/// Audio container: "wav" | "mp3".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    Wav,
    Mp3,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputAudio {
    /// Base64 payload; never decoded.
    pub data: String,
    pub format: AudioFormat,
}

/// `{"type": "input_audio", "input_audio": {"data": "...", "format": "wav"}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioContentPart {
    #[serde(rename = "type")]
    pub kind: AudioPartType,
    pub input_audio: InputAudio,
}

/// One element of an array-shaped message content.
///
/// Serializes as the inner part (no extra wrapping). Deserialization does not
/// dispatch on the `type` tag: it runs [`CONTENT_PART_DECODERS`] in order and
/// keeps the first variant whose structure matches.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ContentPart {
    Text(TextContentPart),
    Image(ImageContentPart),
    Audio(AudioContentPart),
}

type PartDecoder = fn(&Value) -> Result<ContentPart, serde_json::Error>;

fn decode_text_part(v: &Value) -> Result<ContentPart, serde_json::Error> {
    TextContentPart::deserialize(v).map(ContentPart::Text)
}

fn decode_image_part(v: &Value) -> Result<ContentPart, serde_json::Error> {
    ImageContentPart::deserialize(v).map(ContentPart::Image)
}

fn decode_audio_part(v: &Value) -> Result<ContentPart, serde_json::Error> {
    AudioContentPart::deserialize(v).map(ContentPart::Audio)
}

/// Content part variants in resolution order. Earlier entries win when a part
/// is structurally valid for more than one variant.
pub const CONTENT_PART_DECODERS: [(&str, PartDecoder); 3] = [
    ("text", decode_text_part),
    ("image_url", decode_image_part),
    ("input_audio", decode_audio_part),
];

/// Decode a raw JSON content part by trying each variant left to right.
///
/// On failure the error lists why every variant was rejected.
pub fn decode_content_part(value: &Value) -> Result<ContentPart, String> {
    let mut rejections = Vec::with_capacity(CONTENT_PART_DECODERS.len());
    for (name, decode) in CONTENT_PART_DECODERS {
        match decode(value) {
            Ok(part) => return Ok(part),
            Err(e) => rejections.push(format!("{name}: {e}")),
        }
    }
    Err(format!(
        "content part matched none of [text, image_url, input_audio] ({})",
        rejections.join("; ")
    ))
}

impl<'de> Deserialize<'de> for ContentPart {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        decode_content_part(&value).map_err(de::Error::custom)
    }
}

// ============================================================================
// Messages and request
// ============================================================================

/// Message content: a plain string, or a list of content parts.
///
/// The string form is tried first.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

impl MessageContent {
    /// The plain string content, if this is the string form.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MessageContent::Text(s) => Some(s),
            MessageContent::Parts(_) => None,
        }
    }
}

impl<'de> Deserialize<'de> for MessageContent {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::String(s) => Ok(MessageContent::Text(s)),
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(i, item)| {
                    decode_content_part(item)
                        .map_err(|e| <D::Error as de::Error>::custom(format!("[{i}]: {e}")))
                })
                .collect::<Result<Vec<_>, _>>()
                .map(MessageContent::Parts),
            other => Err(<D::Error as de::Error>::custom(format!(
                "content must be a string or a list of content parts, got {}",
                json_kind(&other)
            ))),
        }
    }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Chat message as accepted by `/chat/completions`. `role` is free-form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: MessageContent,
}

/// Lowest accepted sampling temperature.
pub const MIN_TEMPERATURE: f64 = 0.0;
/// Highest accepted sampling temperature.
pub const MAX_TEMPERATURE: f64 = 2.0;

/// `POST /chat/completions` body. Unknown fields such as `model` are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    pub messages: Vec<ChatMessage>,
    /// Parsed without bounds; see [`ChatCompletionRequest::check_temperature`].
    #[serde(default)]
    pub temperature: f64,
    #[serde(default)]
    pub stream: bool,
}

impl ChatCompletionRequest {
    /// Business-rule check run after parsing: temperature must lie in [0.0, 2.0].
    pub fn check_temperature(&self) -> Result<(), MockError> {
        if (MIN_TEMPERATURE..=MAX_TEMPERATURE).contains(&self.temperature) {
            Ok(())
        } else {
            Err(MockError::TemperatureOutOfRange(self.temperature))
        }
    }

    /// String content of the first message, used for sentinel detection.
    pub fn first_text(&self) -> Option<&str> {
        self.messages.first().and_then(|m| m.content.as_text())
    }
}

// ============================================================================
// Chat Completions Response Models
// ============================================================================

/// Assistant message inside a non-streaming choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponseMessage {
    pub role: String, // "assistant"
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatChoice {
    pub index: u32,
    pub message: ChatResponseMessage,
    pub logprobs: Option<Value>,
    pub finish_reason: String,
}

/// Complete Chat Completions API response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionResponse {
    pub id: String,
    pub object: String, // "chat.completion"
    pub created: u64,
    pub model: String,
    pub system_fingerprint: String,
    pub choices: Vec<ChatChoice>,
    pub usage: Usage,
}

// ============================================================================
// Chat Completions Streaming Response Models
// ============================================================================

/// Delta in a streaming chunk. Absent members are emitted as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatDelta {
    pub content: Option<String>,
    pub function_call: Option<Value>,
    pub role: Option<String>,
    pub tool_calls: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatStreamChoice {
    pub delta: ChatDelta,
    pub finish_reason: Option<String>,
    pub index: u32,
    pub logprobs: Option<Value>,
}

/// Streaming chunk response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionChunk {
    pub id: String,
    pub object: String, // "chat.completion.chunk"
    pub created: u64,
    pub model: String,
    pub system_fingerprint: String,
    pub choices: Vec<ChatStreamChoice>,
    pub usage: Option<Usage>,
}
