pub mod gemini;
pub mod utils;

pub use gemini::GeminiCodec;

use futures::Stream;
use rattan_core::{GenerateChunk, GenerateRequest, GenerateResponse};
use serde_json::Value;
use std::pin::Pin;

use crate::error::WireError;

/// Type alias for a streamed generation response
pub type GenerateStream =
    Pin<Box<dyn Stream<Item = Result<GenerateChunk, crate::ClientError>> + Send>>;

/// Codec for translating between internal types and a provider wire dialect
pub trait WireCodec: Send + Sync {
    /// Identifier of the wire dialect
    fn dialect(&self) -> &str;

    /// Encode a request into the provider's JSON body
    fn encode_request(&self, request: &GenerateRequest) -> Result<Value, WireError>;

    /// Decode a complete (non-streaming) response body
    fn decode_response(&self, data: &Value) -> Result<GenerateResponse, WireError>;

    /// Decode one server-sent event payload from a streamed response
    fn decode_stream_chunk(&self, data: &str) -> Result<Option<GenerateChunk>, WireError>;
}
