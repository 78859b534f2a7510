use thiserror::Error;

use crate::types::{ContentPart, MediaSource, Message};

/// Error building a prompt
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ComposeError {
    #[error("instruction must not be empty")]
    EmptyInstruction,
}

/// Build the message list for an instruction and optional media attachment.
///
/// Yields exactly one user message. Without media its content is the
/// instruction text; with media its content is the two-part list
/// `[instruction, media]`, in that order.
///
/// The instruction must be non-empty. That is the only local validation:
/// media bytes and MIME types are forwarded as given, and inline payloads are
/// not size-checked here. A payload over the service's inline limit composes
/// fine and is rejected by the service on invocation.
pub fn compose(
    instruction: impl Into<String>,
    media: Option<MediaSource>,
) -> Result<Vec<Message>, ComposeError> {
    let instruction = instruction.into();
    if instruction.is_empty() {
        return Err(ComposeError::EmptyInstruction);
    }

    let message = match media {
        None => Message::user(instruction),
        Some(source) => Message::from_parts(
            crate::types::Role::User,
            vec![
                ContentPart::Text { text: instruction },
                ContentPart::Media { source },
            ],
        ),
    };

    Ok(vec![message])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Content, FileHandle, Role};

    #[test]
    fn test_text_only() {
        let messages = compose("Summarize this", None).unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, Role::User);
        assert_eq!(messages[0].content, Content::text("Summarize this"));
    }

    #[test]
    fn test_empty_instruction_rejected() {
        let err = compose("", None).unwrap_err();
        assert_eq!(err, ComposeError::EmptyInstruction);
    }

    #[test]
    fn test_file_reference_order() {
        let handle = FileHandle::new("files/rec1", "https://example.com/files/rec1", "audio/mp4");
        let messages = compose(
            "Summarize this meeting recording",
            Some(MediaSource::File { handle: handle.clone() }),
        )
        .unwrap();

        assert_eq!(messages.len(), 1);
        match &messages[0].content {
            Content::Parts { parts } => {
                assert_eq!(parts.len(), 2);
                assert_eq!(parts[0], ContentPart::text("Summarize this meeting recording"));
                assert_eq!(parts[1], ContentPart::file(handle));
            }
            _ => panic!("Expected parts content"),
        }
    }

    #[test]
    fn test_inline_media_passthrough() {
        let bytes: Vec<u8> = (0..=255).collect();
        let messages = compose(
            "Summarize this",
            Some(MediaSource::Inline {
                mime_type: "audio/mp3".to_string(),
                data: bytes.clone(),
            }),
        )
        .unwrap();

        assert_eq!(messages.len(), 1);
        match &messages[0].content {
            Content::Parts { parts } => match &parts[1] {
                ContentPart::Media {
                    source: MediaSource::Inline { mime_type, data },
                } => {
                    assert_eq!(mime_type, "audio/mp3");
                    assert_eq!(data, &bytes);
                }
                _ => panic!("Expected inline media part"),
            },
            _ => panic!("Expected parts content"),
        }
    }

    #[test]
    fn test_oversized_inline_media_is_not_checked() {
        // Over the service's documented ~20 MiB inline cap. Rejection is the
        // service's job; composing must succeed.
        let data = vec![0u8; 21 * 1024 * 1024];
        let messages = compose(
            "Transcribe this",
            Some(MediaSource::Inline {
                mime_type: "audio/wav".to_string(),
                data,
            }),
        )
        .unwrap();
        assert_eq!(messages.len(), 1);
    }
}
