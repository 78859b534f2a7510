use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use rattan_core::{
    Content, ContentPart, FinishReason, GenerateChunk, GenerateOptions, GenerateRequest,
    GenerateResponse, GenerateUsage, MediaSource, Message, ResponseFormat, Role,
};
use serde_json::{json, Value};

use crate::error::WireError;
use crate::wire::WireCodec;

/// Codec for the generative-language JSON dialect.
///
/// System messages lift into the top-level `systemInstruction`; the assistant
/// role maps to the wire role `model`. Inline media is base64-encoded here
/// and nowhere else, with no size inspection: over-limit payloads are encoded
/// and forwarded, and the rejection comes back from the service.
#[derive(Debug, Clone, Default)]
pub struct GeminiCodec;

impl GeminiCodec {
    /// Create a new codec
    pub fn new() -> Self {
        Self
    }

    /// Convert a conversation message to a wire content entry
    fn encode_message(&self, msg: &Message) -> Result<Value, WireError> {
        let role = match msg.role {
            Role::User => "user",
            Role::Assistant => "model",
            Role::System => {
                return Err(WireError::Unsupported(
                    "system messages map to systemInstruction".to_string(),
                ))
            }
        };

        let parts: Vec<Value> = match &msg.content {
            Content::Text { text } => vec![json!({ "text": text })],
            Content::Parts { parts } => parts
                .iter()
                .map(|p| self.encode_part(p))
                .collect::<Result<Vec<_>, _>>()?,
        };

        Ok(json!({ "role": role, "parts": parts }))
    }

    /// Convert a content part to the wire part shape
    fn encode_part(&self, part: &ContentPart) -> Result<Value, WireError> {
        match part {
            ContentPart::Text { text } => Ok(json!({ "text": text })),
            ContentPart::Media { source } => match source {
                MediaSource::Inline { mime_type, data } => Ok(json!({
                    "inlineData": {
                        "mimeType": mime_type,
                        "data": BASE64.encode(data),
                    }
                })),
                MediaSource::File { handle } => Ok(json!({
                    "fileData": {
                        "mimeType": handle.mime_type,
                        "fileUri": handle.uri,
                    }
                })),
            },
        }
    }

    fn encode_generation_config(&self, options: &GenerateOptions) -> Option<Value> {
        let mut config = serde_json::Map::new();

        if let Some(temp) = options.temperature {
            config.insert("temperature".to_string(), json!(temp));
        }
        if let Some(top_p) = options.top_p {
            config.insert("topP".to_string(), json!(top_p));
        }
        if let Some(max_tokens) = options.max_tokens {
            config.insert("maxOutputTokens".to_string(), json!(max_tokens));
        }

        match &options.response_format {
            None | Some(ResponseFormat::Text) => {}
            Some(ResponseFormat::JsonObject) => {
                config.insert("responseMimeType".to_string(), json!("application/json"));
            }
            Some(ResponseFormat::JsonSchema { schema }) => {
                config.insert("responseMimeType".to_string(), json!("application/json"));
                config.insert("responseSchema".to_string(), schema.clone());
            }
        }

        if config.is_empty() {
            None
        } else {
            Some(Value::Object(config))
        }
    }

    /// Convert finish reason string to enum
    fn convert_finish_reason(&self, reason: Option<&str>) -> FinishReason {
        match reason {
            Some("STOP") | None => FinishReason::Stop,
            Some("MAX_TOKENS") => FinishReason::MaxTokens,
            Some("SAFETY") => FinishReason::Safety,
            Some("RECITATION") => FinishReason::Recitation,
            Some(_) => FinishReason::Other,
        }
    }

    fn candidate_text(candidate: &Value) -> String {
        candidate["content"]["parts"]
            .as_array()
            .map(|parts| {
                parts
                    .iter()
                    .filter_map(|p| p["text"].as_str())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default()
    }
}

impl WireCodec for GeminiCodec {
    fn dialect(&self) -> &str {
        "gemini"
    }

    fn encode_request(&self, request: &GenerateRequest) -> Result<Value, WireError> {
        let mut system_texts = Vec::new();
        let mut contents = Vec::new();

        for message in &request.messages {
            match message.role {
                Role::System => system_texts.push(message.text_content()),
                _ => contents.push(self.encode_message(message)?),
            }
        }

        let mut body = json!({ "contents": contents });

        if !system_texts.is_empty() {
            body["systemInstruction"] = json!({
                "parts": [{ "text": system_texts.join("\n\n") }]
            });
        }

        if let Some(config) = self.encode_generation_config(&request.options) {
            body["generationConfig"] = config;
        }

        Ok(body)
    }

    fn decode_response(&self, data: &Value) -> Result<GenerateResponse, WireError> {
        let candidate = data["candidates"]
            .get(0)
            .ok_or_else(|| WireError::MissingField("candidates".to_string()))?;

        let message = Message::assistant(Self::candidate_text(candidate));
        let finish_reason = self.convert_finish_reason(candidate["finishReason"].as_str());

        let usage_data = data.get("usageMetadata");
        let usage = GenerateUsage {
            input_tokens: usage_data
                .and_then(|u| u["promptTokenCount"].as_u64())
                .unwrap_or(0) as u32,
            output_tokens: usage_data
                .and_then(|u| u["candidatesTokenCount"].as_u64())
                .unwrap_or(0) as u32,
            total_tokens: usage_data
                .and_then(|u| u["totalTokenCount"].as_u64())
                .unwrap_or(0) as u32,
        };

        let id = data["responseId"].as_str().unwrap_or_default().to_string();
        let model = data["modelVersion"].as_str().unwrap_or_default().to_string();

        Ok(GenerateResponse {
            id,
            model,
            message,
            usage,
            finish_reason,
        })
    }

    fn decode_stream_chunk(&self, data: &str) -> Result<Option<GenerateChunk>, WireError> {
        let chunk: Value = serde_json::from_str(data)?;

        let candidate = chunk["candidates"].get(0);

        if let Some(candidate) = candidate {
            let text = Self::candidate_text(candidate);
            if !text.is_empty() {
                return Ok(Some(GenerateChunk::Content { text }));
            }

            if let Some(reason) = candidate["finishReason"].as_str() {
                return Ok(Some(GenerateChunk::Finish {
                    reason: self.convert_finish_reason(Some(reason)),
                }));
            }
        }

        if let Some(usage) = chunk.get("usageMetadata") {
            let input = usage["promptTokenCount"].as_u64().unwrap_or(0) as u32;
            let output = usage["candidatesTokenCount"].as_u64().unwrap_or(0) as u32;
            return Ok(Some(GenerateChunk::Usage {
                input_tokens: input,
                output_tokens: output,
            }));
        }

        Ok(None)
    }
}
