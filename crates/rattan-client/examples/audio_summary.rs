//! Example: Summarizing audio with structured output
//!
//! Shows the two ways of attaching audio to a request:
//! - inline bytes with a declared MIME type
//! - a handle to a previously uploaded file
//!
//! Run with: GEMINI_API_KEY=... cargo run --example audio_summary

use rattan_client::{AuthConfig, Client, ClientConfig};
use rattan_core::{compose, GenerateRequest, MediaSource};
use serde::Deserialize;
use serde_json::json;

// A minimal WAV header, enough to demonstrate the request shape. Real usage
// loads actual audio from disk or the network.
const DEMO_WAV: &[u8] = &[
    0x52, 0x49, 0x46, 0x46, 0x24, 0x00, 0x00, 0x00, 0x57, 0x41, 0x56, 0x45, 0x66, 0x6d, 0x74,
    0x20, 0x10, 0x00, 0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x44, 0xac, 0x00, 0x00, 0x88, 0x58,
    0x01, 0x00, 0x02, 0x00, 0x10, 0x00, 0x64, 0x61, 0x74, 0x61, 0x00, 0x00, 0x00, 0x00,
];

#[derive(Debug, Deserialize)]
struct MeetingSummary {
    summary: String,
    action_items: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // =========================================================================
    // Example 1: Composing a request with inline audio
    // =========================================================================
    println!("=== Example 1: Inline audio ===");

    let messages = compose(
        "Summarize this recording.",
        Some(MediaSource::Inline {
            mime_type: "audio/wav".to_string(),
            data: DEMO_WAV.to_vec(),
        }),
    )?;
    println!("Composed {} message(s)", messages.len());

    let request = GenerateRequest::new("gemini-2.0-flash")
        .with_messages(messages)
        .temperature(0.2);

    let Some(auth) = AuthConfig::from_env("GEMINI_API_KEY") else {
        println!("GEMINI_API_KEY not set; skipping network calls");
        return Ok(());
    };

    let config = ClientConfig::new().with_model("gemini-2.0-flash");
    let config = match auth {
        AuthConfig::ApiKey { key } => config.with_api_key(key),
        _ => config,
    };
    let client = Client::with_config(config)?;

    let response = client.generate(request).await?;
    println!("Response: {}", response.text());

    // =========================================================================
    // Example 2: Upload once, reference by handle
    // =========================================================================
    println!("\n=== Example 2: Uploaded file reference ===");

    let handle = client
        .upload_file(DEMO_WAV.to_vec(), "audio/wav", "meeting.wav")
        .await?;
    println!("Uploaded as {}", handle.name);

    let messages = compose(
        "Summarize this meeting recording.",
        Some(MediaSource::File { handle: handle.clone() }),
    )?;

    // =========================================================================
    // Example 3: Structured output from audio input
    // =========================================================================
    println!("\n=== Example 3: Structured output ===");

    let schema = json!({
        "type": "object",
        "properties": {
            "summary": { "type": "string" },
            "action_items": { "type": "array", "items": { "type": "string" } }
        },
        "required": ["summary", "action_items"]
    });

    let request = GenerateRequest::new("gemini-2.0-flash").with_messages(messages);
    let summary: MeetingSummary = client.generate_structured(request, schema).await?;
    println!("Summary: {}", summary.summary);
    for item in &summary.action_items {
        println!("- {}", item);
    }

    client.delete_file(&handle.name).await?;

    Ok(())
}
