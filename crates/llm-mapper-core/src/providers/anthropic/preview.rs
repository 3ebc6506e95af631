//! Preview extraction

use super::{content, messages};
use crate::types::{CanonicalRequest, CanonicalResponse, Preview};
use serde_json::Value;

/// Request preview of bodies the gateway stored truncated
pub const TOO_LARGE_MARKER: &str = "Input too large";

/// Build the preview for a normalized pair
///
/// Request text comes from the provider body as sent, before system folding.
pub fn build(
    request_body: &Value,
    request: &CanonicalRequest,
    response_body: Option<&Value>,
    response: Option<&CanonicalResponse>,
) -> Preview {
    let concatenated_messages = request
        .messages
        .iter()
        .chain(response.into_iter().flat_map(|response| response.messages.iter()))
        .cloned()
        .collect();

    Preview {
        request: request_text(request_body),
        response: response_text(response_body, response),
        concatenated_messages,
    }
}

fn request_text(body: &Value) -> String {
    if body.get("tooLarge").and_then(Value::as_bool) == Some(true) {
        return TOO_LARGE_MARKER.to_string();
    }
    if let Some(list) = body.get("messages").and_then(Value::as_array) {
        return messages::last_message_text(list);
    }
    body.get("prompt")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_default()
}

fn response_text(body: Option<&Value>, response: Option<&CanonicalResponse>) -> String {
    if let Some(error) = response.and_then(|response| response.error.as_ref()) {
        return error.message.clone();
    }
    let Some(body) = body else {
        return String::new();
    };

    let text = body
        .get("content")
        .map(|content| content::flatten(content).trim().to_string())
        .unwrap_or_default();
    if !text.is_empty() {
        return text;
    }

    // Text completions, possibly wrapped in a `body` envelope
    let legacy = body.get("body").unwrap_or(body);
    legacy
        .get("completion")
        .and_then(Value::as_str)
        .map(|completion| completion.trim().to_string())
        .unwrap_or_default()
}
