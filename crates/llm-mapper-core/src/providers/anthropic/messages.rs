//! System prompt folding and message list transforms
//!
//! Anthropic carries the system prompt in a top-level `system` field, but
//! clients also send system-role entries inside `messages`. The canonical list
//! holds exactly one system message, first. The `system` declaration runs
//! before the `messages` declaration, so the messages transform sees whether
//! an explicit system prompt was already placed.

use super::content;
use crate::error::TransformError;
use crate::types::role;
use serde_json::{json, Value};

/// Prefix of request message ids
pub const REQUEST_ID_PREFIX: &str = "req-msg";

fn request_id(position: usize) -> String {
    format!("{}-{}", REQUEST_ID_PREFIX, position)
}

/// `system` -> canonical `messages`
pub fn system_to_internal(system: &Value, _internal: &Value) -> Result<Option<Value>, TransformError> {
    let text = match system {
        Value::Null => return Ok(None),
        Value::String(_) | Value::Array(_) => content::flatten(system),
        other => return Err(TransformError::unexpected("string or array of content blocks", other)),
    };
    if text.is_empty() {
        return Ok(None);
    }

    Ok(Some(json!([content::message(request_id(0), role::SYSTEM, text, Vec::new())])))
}

/// Canonical `messages` -> `system`
pub fn system_to_external(messages: &Value, _external: &Value) -> Result<Option<Value>, TransformError> {
    let messages = messages
        .as_array()
        .ok_or_else(|| TransformError::unexpected("array", messages))?;

    Ok(messages
        .iter()
        .find(|message| message.get("role").and_then(Value::as_str) == Some(role::SYSTEM))
        .and_then(|message| message.get("content").cloned()))
}

/// `messages` -> canonical `messages`, folded onto the system message placed
/// by [`system_to_internal`]
pub fn messages_to_internal(messages: &Value, internal: &Value) -> Result<Option<Value>, TransformError> {
    let messages = messages
        .as_array()
        .ok_or_else(|| TransformError::unexpected("array", messages))?;

    let mut system: Option<String> = internal
        .get("messages")
        .and_then(Value::as_array)
        .and_then(|placed| placed.first())
        .filter(|first| first.get("role").and_then(Value::as_str) == Some(role::SYSTEM))
        .map(|first| first.get("content").and_then(Value::as_str).unwrap_or_default().to_string());

    let mut conversation = Vec::with_capacity(messages.len());
    for message in messages {
        let message_role = message
            .get("role")
            .and_then(Value::as_str)
            .ok_or(TransformError::MissingField { field: "messages[].role" })?;
        let raw_content = message.get("content");
        let text = raw_content.map(content::flatten).unwrap_or_default();

        if message_role == role::SYSTEM {
            // Explicit field wins, then the first embedded one
            if system.is_none() {
                system = Some(text);
            }
            continue;
        }

        let calls = match raw_content {
            Some(raw_content) => content::tool_calls(raw_content)?,
            None => Vec::new(),
        };
        conversation.push((message_role.to_string(), text, calls));
    }

    let folded = system
        .into_iter()
        .map(|text| (role::SYSTEM.to_string(), text, Vec::new()))
        .chain(conversation)
        .enumerate()
        .map(|(position, (message_role, text, calls))| {
            content::message(request_id(position), &message_role, text, calls)
        })
        .collect();

    Ok(Some(Value::Array(folded)))
}

/// Canonical `messages` -> `messages`, without system entries
pub fn messages_to_external(messages: &Value, _external: &Value) -> Result<Option<Value>, TransformError> {
    let messages = messages
        .as_array()
        .ok_or_else(|| TransformError::unexpected("array", messages))?;

    let mut rendered = Vec::with_capacity(messages.len());
    for message in messages {
        let message_role = match message.get("role") {
            Some(Value::String(message_role)) => message_role,
            Some(other) => return Err(TransformError::unexpected("string role", other)),
            None => return Err(TransformError::MissingField { field: "messages[].role" }),
        };
        if message_role == role::SYSTEM {
            continue;
        }
        rendered.push(json!({
            "role": message_role,
            "content": content::render(message),
        }));
    }

    Ok(Some(Value::Array(rendered)))
}

/// Text of the last message in a provider message list, before folding
pub fn last_message_text(messages: &[Value]) -> String {
    messages
        .last()
        .and_then(|message| message.get("content"))
        .map(content::flatten)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_system_string_becomes_first_message() {
        let result = system_to_internal(&json!("Be brief."), &json!({})).unwrap();
        assert_eq!(
            result,
            Some(json!([{"id": "req-msg-0", "role": "system", "content": "Be brief."}]))
        );
    }

    #[test]
    fn test_system_blocks_are_flattened() {
        let system = json!([{"type": "text", "text": "Be"}, {"type": "text", "text": "brief."}]);
        let result = system_to_internal(&system, &json!({})).unwrap();
        assert_eq!(result.unwrap()[0]["content"], json!("Be brief."));
    }

    #[test]
    fn test_system_of_wrong_type_is_a_defect() {
        assert!(system_to_internal(&json!(5), &json!({})).is_err());
        assert_eq!(system_to_internal(&json!(""), &json!({})), Ok(None));
    }

    #[test]
    fn test_embedded_system_moves_to_front_and_duplicates_drop() {
        let messages = json!([
            {"role": "user", "content": "hi"},
            {"role": "system", "content": "first"},
            {"role": "system", "content": "second"},
            {"role": "assistant", "content": "hello"}
        ]);
        let result = messages_to_internal(&messages, &json!({})).unwrap().unwrap();
        assert_eq!(
            result,
            json!([
                {"id": "req-msg-0", "role": "system", "content": "first"},
                {"id": "req-msg-1", "role": "user", "content": "hi"},
                {"id": "req-msg-2", "role": "assistant", "content": "hello"}
            ])
        );
    }

    #[test]
    fn test_explicit_system_wins_over_embedded() {
        let internal = json!({
            "messages": [{"id": "req-msg-0", "role": "system", "content": "explicit"}]
        });
        let messages = json!([
            {"role": "system", "content": "embedded"},
            {"role": "user", "content": "hi"}
        ]);
        let result = messages_to_internal(&messages, &internal).unwrap().unwrap();
        assert_eq!(
            result,
            json!([
                {"id": "req-msg-0", "role": "system", "content": "explicit"},
                {"id": "req-msg-1", "role": "user", "content": "hi"}
            ])
        );
    }

    #[test]
    fn test_message_without_role_is_a_defect() {
        let messages = json!([{"content": "hi"}]);
        assert_eq!(
            messages_to_internal(&messages, &json!({})),
            Err(TransformError::MissingField { field: "messages[].role" })
        );
    }

    #[test]
    fn test_assistant_tool_use_kept_as_tool_calls() {
        let messages = json!([{
            "role": "assistant",
            "content": [
                {"type": "text", "text": "Checking."},
                {"type": "tool_use", "id": "toolu_1", "name": "lookup", "input": {"q": "x"}}
            ]
        }]);
        let result = messages_to_internal(&messages, &json!({})).unwrap().unwrap();
        assert_eq!(result[0]["content"], json!("Checking."));
        assert_eq!(
            result[0]["tool_calls"],
            json!([{"id": "toolu_1", "name": "lookup", "arguments": {"q": "x"}}])
        );
    }

    #[test]
    fn test_external_rendering_drops_system_and_ids() {
        let messages = json!([
            {"id": "req-msg-0", "role": "system", "content": "sys"},
            {"id": "req-msg-1", "role": "user", "content": "hi"}
        ]);
        assert_eq!(
            messages_to_external(&messages, &json!({})).unwrap(),
            Some(json!([{"role": "user", "content": "hi"}]))
        );
        assert_eq!(system_to_external(&messages, &json!({})).unwrap(), Some(json!("sys")));
    }

    #[test]
    fn test_last_message_text() {
        let messages = vec![
            json!({"role": "user", "content": "a"}),
            json!({"role": "user", "content": [{"type": "text", "text": "b"}]}),
        ];
        assert_eq!(last_message_text(&messages), "b");
        assert_eq!(last_message_text(&[]), "");
    }
}
