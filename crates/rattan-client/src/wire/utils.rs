/// Wire utilities
use rattan_core::Content;

/// Convert content to a simple string representation
pub fn content_to_string(content: &Content) -> String {
    match content {
        Content::Text { text } => text.clone(),
        Content::Parts { parts } => parts
            .iter()
            .filter_map(|p| match p {
                rattan_core::ContentPart::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join(""),
    }
}

/// Extract the JSON payload from a model response.
///
/// JSON-mode responses are usually bare JSON, but models sometimes wrap the
/// payload in a fenced ```json block. Returns the inner text with fences and
/// surrounding whitespace removed.
pub fn extract_json_text(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}
