use crate::generate::response::FinishReason;

/// Incremental piece of a streamed generation response
#[derive(Debug, Clone, PartialEq)]
pub enum GenerateChunk {
    /// A fragment of response text
    Content { text: String },
    /// Token usage, reported once near the end of the stream
    Usage { input_tokens: u32, output_tokens: u32 },
    /// Generation finished
    Finish { reason: FinishReason },
}

impl GenerateChunk {
    /// Create a content chunk
    pub fn content(text: impl Into<String>) -> Self {
        Self::Content { text: text.into() }
    }
}
