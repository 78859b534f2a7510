use crate::types::Message;

/// Content generation response
#[derive(Debug, Clone)]
pub struct GenerateResponse {
    pub id: String,
    pub model: String,
    pub message: Message,
    pub usage: GenerateUsage,
    pub finish_reason: FinishReason,
}

impl GenerateResponse {
    /// Create a new response
    pub fn new(id: impl Into<String>, model: impl Into<String>, message: Message) -> Self {
        Self {
            id: id.into(),
            model: model.into(),
            message,
            usage: GenerateUsage::default(),
            finish_reason: FinishReason::Stop,
        }
    }

    /// Set usage
    pub fn with_usage(mut self, usage: GenerateUsage) -> Self {
        self.usage = usage;
        self
    }

    /// Set finish reason
    pub fn with_finish_reason(mut self, reason: FinishReason) -> Self {
        self.finish_reason = reason;
        self
    }

    /// Get the text content
    pub fn text(&self) -> String {
        self.message.text_content()
    }
}

/// Token usage information
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
    pub total_tokens: u32,
}

impl GenerateUsage {
    /// Create new usage info
    pub fn new(input: u32, output: u32) -> Self {
        Self {
            input_tokens: input,
            output_tokens: output,
            total_tokens: input + output,
        }
    }

    /// Add another usage to this one
    pub fn add(&mut self, other: &GenerateUsage) {
        self.input_tokens += other.input_tokens;
        self.output_tokens += other.output_tokens;
        self.total_tokens += other.total_tokens;
    }
}

/// Why generation stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    Stop,
    MaxTokens,
    Safety,
    Recitation,
    Other,
}
