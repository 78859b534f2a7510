pub mod chunk;
pub mod request;
pub mod response;

pub use chunk::GenerateChunk;
pub use request::{GenerateOptions, GenerateRequest, ResponseFormat};
pub use response::{FinishReason, GenerateResponse, GenerateUsage};
