use async_trait::async_trait;
use rattan_client::{GenerateStream, Generator, Result};
use rattan_core::{GenerateChunk, GenerateRequest, GenerateResponse, Message};

/// Mock generator for testing
pub struct MockGenerator {
    reply: String,
    chunks: Vec<GenerateChunk>,
}

impl MockGenerator {
    pub fn new(reply: impl Into<String>, chunks: Vec<GenerateChunk>) -> Self {
        Self {
            reply: reply.into(),
            chunks,
        }
    }

    /// Create a mock that replies with the given text, streamed per character
    pub fn with_text_response(text: &str) -> Self {
        let chunks: Vec<GenerateChunk> = text
            .chars()
            .map(|c| GenerateChunk::content(c.to_string()))
            .collect();
        Self::new(text, chunks)
    }
}

#[async_trait]
impl Generator for MockGenerator {
    async fn generate(&self, _request: GenerateRequest) -> Result<GenerateResponse> {
        let message = Message::assistant(self.reply.clone());
        Ok(GenerateResponse::new("mock-123", "mock-model", message))
    }

    async fn generate_stream(&self, _request: GenerateRequest) -> Result<GenerateStream> {
        let chunks = self.chunks.clone();
        let stream = futures::stream::iter(chunks.into_iter().map(Ok));
        Ok(Box::pin(stream))
    }

    async fn validate(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use rattan_client::wire::utils::extract_json_text;
    use rattan_core::{compose, Content, MediaSource};
    use serde::Deserialize;

    #[tokio::test]
    async fn test_mock_stream_text() {
        let mock = MockGenerator::with_text_response("Hello");
        let request = GenerateRequest::new("mock-model");

        let mut stream = mock.generate_stream(request).await.unwrap();

        let mut result = String::new();
        while let Some(chunk) = stream.next().await {
            if let GenerateChunk::Content { text } = chunk.unwrap() {
                result.push_str(&text);
            }
        }

        assert_eq!(result, "Hello");
    }

    #[tokio::test]
    async fn test_mock_empty_stream() {
        let mock = MockGenerator::new("", vec![]);
        let request = GenerateRequest::new("mock-model");

        let stream = mock.generate_stream(request).await.unwrap();
        assert_eq!(stream.count().await, 0);
    }

    #[tokio::test]
    async fn test_composed_audio_request_through_generator() {
        let messages = compose(
            "Summarize this",
            Some(MediaSource::Inline {
                mime_type: "audio/mp3".to_string(),
                data: vec![0x00, 0x11, 0x22],
            }),
        )
        .unwrap();

        // One user message whose content is the [instruction, media] pair
        assert_eq!(messages.len(), 1);
        match &messages[0].content {
            Content::Parts { parts } => assert_eq!(parts.len(), 2),
            _ => panic!("Expected parts content"),
        }

        let mock = MockGenerator::with_text_response("A short summary.");
        let request = GenerateRequest::new("mock-model").with_messages(messages);
        let response = mock.generate(request).await.unwrap();

        assert_eq!(response.text(), "A short summary.");
    }

    #[tokio::test]
    async fn test_structured_reply_decodes() {
        #[derive(Debug, Deserialize)]
        struct Summary {
            summary: String,
        }

        // Models sometimes fence JSON-mode output
        let mock =
            MockGenerator::with_text_response("```json\n{\"summary\": \"three decisions made\"}\n```");
        let response = mock
            .generate(GenerateRequest::new("mock-model"))
            .await
            .unwrap();

        let text = response.text();
        let decoded: Summary = serde_json::from_str(extract_json_text(&text)).unwrap();
        assert_eq!(decoded.summary, "three decisions made");
    }
}
