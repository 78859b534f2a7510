pub mod content;
pub mod file;
pub mod message;

pub use content::{Content, ContentPart, MediaSource};
pub use file::{FileHandle, FileState};
pub use message::{Message, Role};
