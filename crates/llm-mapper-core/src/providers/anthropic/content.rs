//! Content block helpers for the Anthropic Messages format
//!
//! Anthropic content is either a plain string or a list of typed blocks. The
//! canonical message keeps a text projection (text blocks joined by a single
//! space) plus any `tool_use` blocks as structured tool calls.

use crate::error::TransformError;
use serde_json::{json, Map, Value};

pub const TEXT_BLOCK: &str = "text";
pub const TOOL_USE_BLOCK: &str = "tool_use";

/// Text projection of a content value
///
/// Non-text blocks are ignored. Anything that is neither a string nor a list
/// projects to the empty string.
pub fn flatten(content: &Value) -> String {
    match content {
        Value::String(text) => text.clone(),
        Value::Array(blocks) => blocks
            .iter()
            .filter_map(block_text)
            .collect::<Vec<_>>()
            .join(" "),
        _ => String::new(),
    }
}

fn block_text(block: &Value) -> Option<&str> {
    if block.get("type")?.as_str()? != TEXT_BLOCK {
        return None;
    }
    block.get("text")?.as_str()
}

/// Canonical tool calls for every `tool_use` block in `content`
pub fn tool_calls(content: &Value) -> Result<Vec<Value>, TransformError> {
    let Value::Array(blocks) = content else {
        return Ok(Vec::new());
    };

    blocks
        .iter()
        .filter(|block| block.get("type").and_then(Value::as_str) == Some(TOOL_USE_BLOCK))
        .map(tool_call)
        .collect()
}

/// Canonical tool call for one `tool_use` block
pub fn tool_call(block: &Value) -> Result<Value, TransformError> {
    let name = block
        .get("name")
        .and_then(Value::as_str)
        .ok_or(TransformError::MissingField { field: "tool_use.name" })?;

    let mut call = Map::new();
    if let Some(id) = block.get("id").and_then(Value::as_str) {
        call.insert("id".to_string(), json!(id));
    }
    call.insert("name".to_string(), json!(name));
    call.insert(
        "arguments".to_string(),
        block.get("input").cloned().unwrap_or_else(|| json!({})),
    );
    Ok(Value::Object(call))
}

/// Canonical message value
pub fn message(id: String, role: &str, content: String, tool_calls: Vec<Value>) -> Value {
    let mut message = Map::new();
    message.insert("id".to_string(), Value::String(id));
    message.insert("role".to_string(), json!(role));
    message.insert("content".to_string(), Value::String(content));
    if !tool_calls.is_empty() {
        message.insert("tool_calls".to_string(), Value::Array(tool_calls));
    }
    Value::Object(message)
}

/// Anthropic content for a canonical message
///
/// Messages without tool calls keep plain string content. With tool calls the
/// content becomes a block list: the text (when non-empty) and one `tool_use`
/// block per call.
pub fn render(message: &Value) -> Value {
    let text = message.get("content").and_then(Value::as_str).unwrap_or_default();
    let calls = message
        .get("tool_calls")
        .and_then(Value::as_array)
        .filter(|calls| !calls.is_empty());

    let Some(calls) = calls else {
        return json!(text);
    };
    Value::Array(blocks(text, calls))
}

/// Text block (when non-empty) followed by `tool_use` blocks
pub fn blocks(text: &str, calls: &[Value]) -> Vec<Value> {
    let mut blocks = Vec::with_capacity(calls.len() + 1);
    if !text.is_empty() {
        blocks.push(json!({"type": TEXT_BLOCK, "text": text}));
    }
    blocks.extend(calls.iter().map(render_tool_call));
    blocks
}

fn render_tool_call(call: &Value) -> Value {
    let mut block = Map::new();
    block.insert("type".to_string(), json!(TOOL_USE_BLOCK));
    if let Some(id) = call.get("id").filter(|id| !id.is_null()) {
        block.insert("id".to_string(), id.clone());
    }
    block.insert("name".to_string(), call.get("name").cloned().unwrap_or(Value::Null));
    block.insert(
        "input".to_string(),
        call.get("arguments").cloned().unwrap_or_else(|| json!({})),
    );
    Value::Object(block)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_string() {
        assert_eq!(flatten(&json!("hello")), "hello");
    }

    #[test]
    fn test_flatten_joins_text_blocks_with_single_space() {
        let content = json!([
            {"type": "text", "text": "Look at"},
            {"type": "image", "source": {"type": "base64", "data": "..."}},
            {"type": "text", "text": "this picture"}
        ]);
        assert_eq!(flatten(&content), "Look at this picture");
    }

    #[test]
    fn test_flatten_ignores_non_text_only_content() {
        let content = json!([{"type": "tool_use", "id": "t1", "name": "f", "input": {}}]);
        assert_eq!(flatten(&content), "");
        assert_eq!(flatten(&json!(42)), "");
    }

    #[test]
    fn test_tool_calls_extracted() {
        let content = json!([
            {"type": "text", "text": "calling"},
            {"type": "tool_use", "id": "toolu_1", "name": "get_weather", "input": {"city": "Paris"}}
        ]);
        assert_eq!(
            tool_calls(&content).unwrap(),
            vec![json!({"id": "toolu_1", "name": "get_weather", "arguments": {"city": "Paris"}})]
        );
    }

    #[test]
    fn test_tool_use_without_name_is_rejected() {
        let content = json!([{"type": "tool_use", "id": "toolu_1"}]);
        assert_eq!(
            tool_calls(&content),
            Err(TransformError::MissingField { field: "tool_use.name" })
        );
    }

    #[test]
    fn test_render_plain_and_with_tool_calls() {
        assert_eq!(render(&json!({"role": "user", "content": "hi"})), json!("hi"));

        let message = json!({
            "role": "assistant",
            "content": "",
            "tool_calls": [{"id": "toolu_1", "name": "f", "arguments": {"x": 1}}]
        });
        assert_eq!(
            render(&message),
            json!([{"type": "tool_use", "id": "toolu_1", "name": "f", "input": {"x": 1}}])
        );
    }
}
