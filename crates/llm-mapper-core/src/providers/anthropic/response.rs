//! Response body transforms

use super::content;
use crate::error::TransformError;
use crate::types::role;
use serde_json::{json, Value};

/// Prefix of response message ids
pub const RESPONSE_ID_PREFIX: &str = "resp-msg";

/// `content` -> canonical `messages`
///
/// Each text block becomes one assistant message with trimmed text, each
/// `tool_use` block an assistant message with one tool call. Other blocks are
/// dropped.
pub fn content_to_internal(body: &Value, _internal: &Value) -> Result<Option<Value>, TransformError> {
    let messages: Vec<(String, Vec<Value>)> = match body {
        Value::Null => return Ok(None),
        Value::String(text) => vec![(text.trim().to_string(), Vec::new())],
        Value::Array(blocks) => {
            let mut messages = Vec::with_capacity(blocks.len());
            for block in blocks {
                match block.get("type").and_then(Value::as_str) {
                    Some(content::TEXT_BLOCK) => {
                        let text = block.get("text").and_then(Value::as_str).unwrap_or_default();
                        messages.push((text.trim().to_string(), Vec::new()));
                    }
                    Some(content::TOOL_USE_BLOCK) => {
                        messages.push((String::new(), vec![content::tool_call(block)?]));
                    }
                    _ => {}
                }
            }
            messages
        }
        other => return Err(TransformError::unexpected("string or array of content blocks", other)),
    };

    let messages = messages
        .into_iter()
        .enumerate()
        .map(|(position, (text, calls))| {
            content::message(format!("{}-{}", RESPONSE_ID_PREFIX, position), role::ASSISTANT, text, calls)
        })
        .collect();
    Ok(Some(Value::Array(messages)))
}

/// Canonical `messages` -> `content`
pub fn content_to_external(messages: &Value, _external: &Value) -> Result<Option<Value>, TransformError> {
    let messages = messages
        .as_array()
        .ok_or_else(|| TransformError::unexpected("array", messages))?;

    let blocks = messages
        .iter()
        .flat_map(|message| {
            let text = message.get("content").and_then(Value::as_str).unwrap_or_default();
            let calls = message
                .get("tool_calls")
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or_default();
            content::blocks(text, calls)
        })
        .collect();
    Ok(Some(Value::Array(blocks)))
}

/// `error` -> canonical `error`
pub fn error_to_internal(error: &Value, _internal: &Value) -> Result<Option<Value>, TransformError> {
    let message = match error {
        Value::Null => return Ok(None),
        Value::String(message) => message.clone(),
        Value::Object(fields) => match fields.get("message").and_then(Value::as_str) {
            Some(message) => message.to_string(),
            None => error.to_string(),
        },
        other => other.to_string(),
    };
    Ok(Some(json!({"message": message})))
}

/// Canonical `error` -> `error`
pub fn error_to_external(error: &Value, _external: &Value) -> Result<Option<Value>, TransformError> {
    let message = error
        .get("message")
        .and_then(Value::as_str)
        .ok_or(TransformError::MissingField { field: "error.message" })?;
    Ok(Some(json!({"type": "error", "message": message})))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_text_blocks_become_trimmed_assistant_messages() {
        let content = json!([
            {"type": "text", "text": "  Hello there. "},
            {"type": "thinking", "thinking": "..."},
            {"type": "tool_use", "id": "toolu_1", "name": "f", "input": {"a": 1}}
        ]);
        let messages = content_to_internal(&content, &json!({})).unwrap().unwrap();
        assert_eq!(
            messages,
            json!([
                {"id": "resp-msg-0", "role": "assistant", "content": "Hello there."},
                {
                    "id": "resp-msg-1",
                    "role": "assistant",
                    "content": "",
                    "tool_calls": [{"id": "toolu_1", "name": "f", "arguments": {"a": 1}}]
                }
            ])
        );
    }

    #[test]
    fn test_string_content_is_one_message() {
        let messages = content_to_internal(&json!(" hi "), &json!({})).unwrap().unwrap();
        assert_eq!(messages, json!([{"id": "resp-msg-0", "role": "assistant", "content": "hi"}]));
    }

    #[test]
    fn test_content_renders_back_to_blocks() {
        let messages = json!([
            {"id": "resp-msg-0", "role": "assistant", "content": "Hello"},
            {"id": "resp-msg-1", "role": "assistant", "content": "", "tool_calls": [{"id": "t", "name": "f", "arguments": {}}]}
        ]);
        assert_eq!(
            content_to_external(&messages, &json!({})).unwrap(),
            Some(json!([
                {"type": "text", "text": "Hello"},
                {"type": "tool_use", "id": "t", "name": "f", "input": {}}
            ]))
        );
    }

    #[test]
    fn test_error_message_extraction() {
        let error = json!({"type": "overloaded_error", "message": "Overloaded"});
        assert_eq!(
            error_to_internal(&error, &json!({})).unwrap(),
            Some(json!({"message": "Overloaded"}))
        );
        assert_eq!(
            error_to_internal(&json!({"code": 529}), &json!({})).unwrap(),
            Some(json!({"message": "{\"code\":529}"}))
        );
        assert_eq!(
            error_to_external(&json!({"message": "Overloaded"}), &json!({})).unwrap(),
            Some(json!({"type": "error", "message": "Overloaded"}))
        );
    }
}
