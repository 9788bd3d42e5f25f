//! Response Decoding
//!
//! The two strategies for turning a `/cache` response into command output.

use reqwest::Response;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::DecodeMode;
use crate::error::Result;
use crate::models::CommandResponse;

/// Decodes a successful response according to `mode`.
pub async fn decode_response(response: Response, mode: DecodeMode) -> Result<Value> {
    match mode {
        DecodeMode::Json => {
            let body = response.bytes().await?;
            let decoded = CommandResponse::from_body(&body).inspect_err(|e| {
                warn!("Failed to decode cache response: {}", e);
            })?;
            Ok(decoded.output)
        }
        DecodeMode::RawFirstChunk => {
            let mut response = response;
            let chunk = response.chunk().await?;
            debug!(
                "Read first response chunk: {} bytes",
                chunk.as_ref().map_or(0, |c| c.len())
            );
            Ok(Value::String(
                chunk.map(|c| bytes_to_code_points(&c)).unwrap_or_default(),
            ))
        }
    }
}

/// Maps every byte to the char with the same code point.
///
/// This is a Latin-1 reading of the body: ASCII comes through unchanged,
/// but multi-byte UTF-8 sequences turn into one char per byte. The server
/// protocol is assumed to be ASCII-only; nothing here checks that.
pub fn bytes_to_code_points(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}
