//! Tool definitions, tool choice and the parallel tool use flag
//!
//! Copyright (c) 2025 LLM Mapper Team
//! Licensed under the Apache-2.0 license

use crate::error::TransformError;
use serde_json::{json, Map, Value};

const DISABLE_PARALLEL: &str = "disable_parallel_tool_use";

/// `tools` -> canonical `tools`
pub fn tools_to_internal(tools: &Value, _internal: &Value) -> Result<Option<Value>, TransformError> {
    rename_tool_fields(tools, "input_schema", "parameters").map(Some)
}

/// Canonical `tools` -> `tools`
pub fn tools_to_external(tools: &Value, _external: &Value) -> Result<Option<Value>, TransformError> {
    rename_tool_fields(tools, "parameters", "input_schema").map(Some)
}

fn rename_tool_fields(tools: &Value, schema_from: &str, schema_to: &str) -> Result<Value, TransformError> {
    let tools = tools
        .as_array()
        .ok_or_else(|| TransformError::unexpected("array", tools))?;

    tools
        .iter()
        .map(|tool| {
            let name = tool
                .get("name")
                .and_then(Value::as_str)
                .ok_or(TransformError::MissingField { field: "tools[].name" })?;

            let mut converted = Map::new();
            converted.insert("name".to_string(), json!(name));
            if let Some(description) = tool.get("description").filter(|d| !d.is_null()) {
                converted.insert("description".to_string(), description.clone());
            }
            converted.insert(
                schema_to.to_string(),
                tool.get(schema_from).cloned().unwrap_or_else(|| json!({})),
            );
            Ok(Value::Object(converted))
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Value::Array)
}

/// `tool_choice` -> canonical `tool_choice`
///
/// A bare string names a tool. Unknown shapes are transform defects.
pub fn tool_choice_to_internal(choice: &Value, _internal: &Value) -> Result<Option<Value>, TransformError> {
    match choice {
        Value::Null => Ok(None),
        Value::String(name) => Ok(Some(json!({"type": "tool", "name": name}))),
        Value::Object(fields) => {
            let kind = fields
                .get("type")
                .and_then(Value::as_str)
                .ok_or(TransformError::MissingField { field: "tool_choice.type" })?;
            match kind {
                "auto" | "any" | "none" => Ok(Some(json!({"type": kind}))),
                "tool" => {
                    let name = tool_name(fields)?;
                    Ok(Some(json!({"type": "tool", "name": name})))
                }
                other => Err(TransformError::UnknownVariant {
                    field: "tool_choice.type",
                    value: other.to_string(),
                }),
            }
        }
        other => Err(TransformError::unexpected("string or object", other)),
    }
}

/// Canonical `tool_choice` -> `tool_choice`
///
/// Canonical `none` has no Anthropic equivalent and degrades to `any`.
pub fn tool_choice_to_external(choice: &Value, _external: &Value) -> Result<Option<Value>, TransformError> {
    match choice {
        Value::Null => Ok(None),
        Value::String(name) => Ok(Some(json!({"type": "tool", "name": name}))),
        Value::Object(fields) => {
            let kind = fields
                .get("type")
                .and_then(Value::as_str)
                .ok_or(TransformError::MissingField { field: "tool_choice.type" })?;
            match kind {
                "auto" => Ok(Some(json!({"type": "auto"}))),
                "any" | "none" => Ok(Some(json!({"type": "any"}))),
                "tool" => {
                    let name = tool_name(fields)?;
                    Ok(Some(json!({"type": "tool", "name": name})))
                }
                other => Err(TransformError::UnknownVariant {
                    field: "tool_choice.type",
                    value: other.to_string(),
                }),
            }
        }
        other => Err(TransformError::unexpected("string or object", other)),
    }
}

fn tool_name(fields: &Map<String, Value>) -> Result<&str, TransformError> {
    fields
        .get("name")
        .and_then(Value::as_str)
        .ok_or(TransformError::MissingField { field: "tool_choice.name" })
}

/// `tool_choice.disable_parallel_tool_use` -> canonical `parallel_tool_calls`
///
/// Only an explicit `true` produces a value (`false`); anything else stays
/// absent.
pub fn parallel_to_internal(choice: &Value, _internal: &Value) -> Result<Option<Value>, TransformError> {
    let disabled = choice.get(DISABLE_PARALLEL).and_then(Value::as_bool) == Some(true);
    Ok(disabled.then_some(Value::Bool(false)))
}

/// Canonical `parallel_tool_calls` -> `tool_choice.disable_parallel_tool_use`
///
/// Reads the external `tool_choice` written by the tool choice declaration
/// and re-emits it with the flag set; without one, `auto` is used.
pub fn parallel_to_external(parallel: &Value, external: &Value) -> Result<Option<Value>, TransformError> {
    match parallel {
        Value::Bool(false) => {
            let mut choice = match external.get("tool_choice") {
                Some(Value::Object(existing)) => existing.clone(),
                _ => {
                    let mut auto = Map::new();
                    auto.insert("type".to_string(), json!("auto"));
                    auto
                }
            };
            choice.insert(DISABLE_PARALLEL.to_string(), Value::Bool(true));
            Ok(Some(Value::Object(choice)))
        }
        Value::Bool(true) | Value::Null => Ok(None),
        other => Err(TransformError::unexpected("boolean", other)),
    }
}
