use serde_json::Value;

use crate::types::Message;

/// Content generation request
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub options: GenerateOptions,
}

impl GenerateRequest {
    /// Create a new request for the given model
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: Vec::new(),
            options: GenerateOptions::default(),
        }
    }

    /// Add a message to the request
    pub fn with_message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    /// Add multiple messages
    pub fn with_messages(mut self, messages: Vec<Message>) -> Self {
        self.messages.extend(messages);
        self
    }

    /// Set options
    pub fn with_options(mut self, options: GenerateOptions) -> Self {
        self.options = options;
        self
    }

    /// Enable streaming
    pub fn stream(mut self) -> Self {
        self.options.stream = true;
        self
    }

    /// Set temperature
    pub fn temperature(mut self, temp: f32) -> Self {
        self.options.temperature = Some(temp);
        self
    }

    /// Set max output tokens
    pub fn max_tokens(mut self, max: u32) -> Self {
        self.options.max_tokens = Some(max);
        self
    }

    /// Set response format
    pub fn response_format(mut self, format: ResponseFormat) -> Self {
        self.options.response_format = Some(format);
        self
    }

    /// Check if any message carries a media part
    pub fn has_media(&self) -> bool {
        self.messages.iter().any(|m| m.has_media())
    }
}

impl Default for GenerateRequest {
    fn default() -> Self {
        Self {
            model: String::new(),
            messages: Vec::new(),
            options: GenerateOptions::default(),
        }
    }
}

/// Options for content generation
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub top_p: Option<f32>,
    pub stream: bool,
    pub response_format: Option<ResponseFormat>,
}

impl GenerateOptions {
    /// Create default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set temperature (0.0 - 2.0)
    pub fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }

    /// Set max output tokens
    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }

    /// Set top_p (0.0 - 1.0)
    pub fn with_top_p(mut self, top_p: f32) -> Self {
        self.top_p = Some(top_p);
        self
    }

    /// Enable streaming
    pub fn with_streaming(mut self) -> Self {
        self.stream = true;
        self
    }

    /// Set response format
    pub fn with_response_format(mut self, format: ResponseFormat) -> Self {
        self.response_format = Some(format);
        self
    }
}

/// Response format for structured outputs.
///
/// `JsonObject` and `JsonSchema` select the JSON-text output path. Structured
/// output is always requested through this channel rather than tool calling,
/// which the service does not support for requests carrying media parts.
#[derive(Debug, Clone)]
pub enum ResponseFormat {
    /// Standard text response
    Text,
    /// JSON object response
    JsonObject,
    /// JSON constrained to a specific schema
    JsonSchema { schema: Value },
}

impl ResponseFormat {
    /// Create JSON object format
    pub fn json_object() -> Self {
        Self::JsonObject
    }

    /// Create JSON schema format
    pub fn json_schema(schema: Value) -> Self {
        Self::JsonSchema { schema }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ContentPart, Message, Role};

    #[test]
    fn test_request_builder() {
        let request = GenerateRequest::new("flash-8")
            .with_message(Message::user("Hello"))
            .temperature(0.7)
            .max_tokens(100);

        assert_eq!(request.model, "flash-8");
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.options.temperature, Some(0.7));
        assert_eq!(request.options.max_tokens, Some(100));
    }

    #[test]
    fn test_has_media() {
        let request = GenerateRequest::new("flash-8").with_message(Message::user("Hello"));
        assert!(!request.has_media());

        let request = request.with_message(Message::from_parts(
            Role::User,
            vec![ContentPart::inline("audio/mp3", vec![0u8; 8])],
        ));
        assert!(request.has_media());
    }

    #[test]
    fn test_options_builder() {
        let options = GenerateOptions::new()
            .with_temperature(0.5)
            .with_max_tokens(200)
            .with_streaming();

        assert_eq!(options.temperature, Some(0.5));
        assert_eq!(options.max_tokens, Some(200));
        assert!(options.stream);
    }
}
