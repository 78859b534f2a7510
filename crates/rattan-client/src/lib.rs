pub mod client;
pub mod config;
pub mod error;
pub mod files;
pub mod wire;

// Re-export core types
pub use error::{ClientError, Result, WireError};
pub use client::{Client, Generator};
pub use config::{AuthConfig, ClientConfig};
pub use files::FileList;
pub use wire::{GeminiCodec, GenerateStream, WireCodec};
