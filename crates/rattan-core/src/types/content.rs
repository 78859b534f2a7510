use serde::{Deserialize, Serialize};

use crate::types::file::FileHandle;

/// Content type for messages
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Content {
    /// Simple text content
    Text { text: String },
    /// Multimodal content parts
    Parts { parts: Vec<ContentPart> },
}

/// Individual content part (for multimodal messages)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    /// Text content
    Text { text: String },
    /// Binary media content
    Media { source: MediaSource },
}

/// Media source for audio, image, video and document parts
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum MediaSource {
    /// Raw bytes embedded in the request payload.
    ///
    /// `data` is carried byte-for-byte unmodified; base64 encoding happens at
    /// the wire layer. `mime_type` must describe the actual encoding of the
    /// bytes, which the remote service checks, not this library. The service
    /// also owns the inline payload size limit: payloads over it are accepted
    /// here and rejected remotely.
    Inline { mime_type: String, data: Vec<u8> },
    /// Reference to previously uploaded content
    File { handle: FileHandle },
}

impl Content {
    /// Create text content
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Create content from parts
    pub fn parts(parts: Vec<ContentPart>) -> Self {
        Self::Parts { parts }
    }

    /// Check if content is empty
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text { text } => text.is_empty(),
            Self::Parts { parts } => parts.is_empty(),
        }
    }

    /// Check if content carries any media part
    pub fn has_media(&self) -> bool {
        match self {
            Self::Text { .. } => false,
            Self::Parts { parts } => parts
                .iter()
                .any(|p| matches!(p, ContentPart::Media { .. })),
        }
    }
}

impl ContentPart {
    /// Create a text part
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Create an inline media part from raw bytes
    pub fn inline(mime_type: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self::Media {
            source: MediaSource::Inline {
                mime_type: mime_type.into(),
                data: data.into(),
            },
        }
    }

    /// Create a media part referencing an uploaded file
    pub fn file(handle: FileHandle) -> Self {
        Self::Media {
            source: MediaSource::File { handle },
        }
    }
}

impl MediaSource {
    /// Get the declared MIME type
    pub fn mime_type(&self) -> &str {
        match self {
            Self::Inline { mime_type, .. } => mime_type,
            Self::File { handle } => &handle.mime_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_content() {
        let content = Content::text("Hello");
        match content {
            Content::Text { text } => assert_eq!(text, "Hello"),
            _ => panic!("Expected text content"),
        }
    }

    #[test]
    fn test_parts_content() {
        let parts = vec![ContentPart::text("Hello "), ContentPart::text("World")];
        let content = Content::parts(parts);
        match content {
            Content::Parts { parts: p } => assert_eq!(p.len(), 2),
            _ => panic!("Expected parts content"),
        }
    }

    #[test]
    fn test_inline_part_keeps_bytes() {
        let bytes = vec![0x00, 0xff, 0x7f, 0x80];
        let part = ContentPart::inline("audio/mp3", bytes.clone());
        match part {
            ContentPart::Media {
                source: MediaSource::Inline { data, mime_type },
            } => {
                assert_eq!(mime_type, "audio/mp3");
                assert_eq!(data, bytes);
            }
            _ => panic!("Expected inline media"),
        }
    }

    #[test]
    fn test_file_part() {
        let handle = FileHandle::new("files/abc123", "https://example.com/files/abc123", "audio/mp4");
        let part = ContentPart::file(handle);
        match part {
            ContentPart::Media {
                source: MediaSource::File { handle },
            } => assert_eq!(handle.name, "files/abc123"),
            _ => panic!("Expected file media"),
        }
    }

    #[test]
    fn test_has_media() {
        assert!(!Content::text("plain").has_media());
        let content = Content::parts(vec![
            ContentPart::text("listen"),
            ContentPart::inline("audio/wav", vec![0u8; 4]),
        ]);
        assert!(content.has_media());
    }
}
