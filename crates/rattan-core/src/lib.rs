pub mod compose;
pub mod generate;
pub mod types;

pub use types::{
    Content,
    ContentPart,
    FileHandle,
    FileState,
    MediaSource,
    Message,
    Role,
};

pub use generate::{
    FinishReason,
    GenerateChunk,
    GenerateOptions,
    GenerateRequest,
    GenerateResponse,
    GenerateUsage,
    ResponseFormat,
};

pub use compose::{compose, ComposeError};
