//! Canonical schema types
//!
//! This module defines the provider-agnostic shape every provider payload is
//! normalized into. Mappers produce these as JSON; the entry point reads them
//! back into the typed form with serde.
//!
//! Scalar fields filled by pass-through declarations read an ill-typed value
//! (`"temperature": "0.7"`) as absent rather than failing the call.

use crate::error::json_type_name;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;

/// Read an optional field, treating a value of the wrong type as absent
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }

    let found = json_type_name(&value);
    match serde_json::from_value(value) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(error) => {
            debug!(
                expected = std::any::type_name::<T>(),
                found,
                %error,
                "Dropping ill-typed canonical field"
            );
            Ok(None)
        }
    }
}

/// Result of normalizing one request/response pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedSchema {
    pub request: CanonicalRequest,

    /// Absent when no response body was captured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<CanonicalResponse>,

    pub preview: Preview,
}

/// Canonical chat request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CanonicalRequest {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Conversation, system message first when there is one
    #[serde(default)]
    pub messages: Vec<Message>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u64>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,

    /// Stop sequences
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub stop: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolDefinition>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<ToolChoice>,

    /// Only ever `Some(false)`; an unset provider flag stays unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parallel_tool_calls: Option<bool>,
}

/// Canonical chat response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CanonicalResponse {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    #[serde(default)]
    pub messages: Vec<Message>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ResponseError>,
}

/// A conversation message
///
/// `id` is assigned during normalization and is only stable within one call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub role: String,
    /// Text projection of the provider content
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,
}

impl Message {
    pub fn is_system(&self) -> bool {
        self.role == role::SYSTEM
    }
}

/// Well-known message roles
pub mod role {
    pub const SYSTEM: &str = "system";
    pub const USER: &str = "user";
    pub const ASSISTANT: &str = "assistant";
}

/// A tool invocation requested by the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub arguments: Value,
}

/// A tool the model may call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// JSON schema of the tool input
    #[serde(default)]
    pub parameters: Value,
}

/// Tool selection strategy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ToolChoice {
    /// Model decides
    Auto,
    /// Model must call some tool
    Any,
    /// Model must not call tools
    None,
    /// Model must call the named tool
    Tool { name: String },
}

/// Error reported in place of a response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseError {
    pub message: String,
}

/// Human-readable projection of a request/response pair
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Preview {
    pub request: String,
    pub response: String,
    pub concatenated_messages: Vec<Message>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tool_choice_wire_shape() {
        let choice: ToolChoice = serde_json::from_value(json!({"type": "tool", "name": "search"})).unwrap();
        assert_eq!(choice, ToolChoice::Tool { name: "search".to_string() });
        assert_eq!(serde_json::to_value(ToolChoice::Any).unwrap(), json!({"type": "any"}));
    }

    #[test]
    fn test_request_omits_unset_fields() {
        let request = CanonicalRequest {
            model: Some("m".to_string()),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&request).unwrap(), json!({"model": "m", "messages": []}));
    }

    #[test]
    fn test_ill_typed_scalars_read_as_absent() {
        let request: CanonicalRequest = serde_json::from_value(json!({
            "model": 42,
            "messages": [],
            "temperature": "0.7",
            "top_p": 0.9,
            "max_tokens": 1024.0,
            "stream": "yes",
            "stop": "END"
        }))
        .unwrap();

        assert_eq!(request.model, None);
        assert_eq!(request.temperature, None);
        assert_eq!(request.top_p, Some(0.9));
        assert_eq!(request.max_tokens, None);
        assert_eq!(request.stream, None);
        assert_eq!(request.stop, None);
    }

    #[test]
    fn test_null_scalars_read_as_absent() {
        let request: CanonicalRequest =
            serde_json::from_value(json!({"temperature": null, "stop": ["a", "b"]})).unwrap();
        assert_eq!(request.temperature, None);
        assert_eq!(request.stop, Some(vec!["a".to_string(), "b".to_string()]));
    }

    #[test]
    fn test_message_deserializes_without_tool_calls() {
        let message: Message =
            serde_json::from_value(json!({"id": "req-msg-0", "role": "system", "content": "hi"})).unwrap();
        assert!(message.is_system());
        assert!(message.tool_calls.is_none());
    }
}
