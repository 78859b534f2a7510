use serde::{Deserialize, Serialize};

/// Opaque handle to content uploaded to the remote service.
///
/// Handles are produced by the upload API and threaded through requests
/// unchanged; only `uri` and `mime_type` ever reach the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FileHandle {
    /// Resource name, e.g. `files/abc123`
    pub name: String,
    /// URI used to reference the file in requests
    pub uri: String,
    /// MIME type recorded at upload time
    pub mime_type: String,
    /// Processing state reported by the service
    #[serde(default)]
    pub state: FileState,
}

/// Server-side processing state of an uploaded file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FileState {
    Processing,
    #[default]
    Active,
    Failed,
}

impl FileHandle {
    pub fn new(
        name: impl Into<String>,
        uri: impl Into<String>,
        mime_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            uri: uri.into(),
            mime_type: mime_type.into(),
            state: FileState::Active,
        }
    }

    /// Whether the file is ready to be referenced in a request
    pub fn is_active(&self) -> bool {
        self.state == FileState::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_handle_is_active() {
        let handle = FileHandle::new("files/x", "https://example.com/files/x", "video/mp4");
        assert!(handle.is_active());
        assert_eq!(handle.mime_type, "video/mp4");
    }
}
