//! Property-based testing strategies for generating test data
//!
//! This module provides proptest strategies for canonical types. The request
//! strategy stays inside the subset the Anthropic request mapper converts
//! without loss, so it can drive round-trip properties.

#![cfg(test)]

use crate::types::*;
use proptest::collection::vec;
use proptest::option;
use proptest::prelude::*;
use serde_json::{json, Value};

/// Strategy for non-system roles
pub fn conversation_role_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just(role::USER), Just(role::ASSISTANT)]
}

/// Strategy for tool calls
pub fn tool_call_strategy() -> impl Strategy<Value = ToolCall> {
    (
        option::of("toolu_[a-zA-Z0-9]{4,12}"),
        "[a-z_]{1,16}",
        "[a-z ]{0,20}",
    )
        .prop_map(|(id, name, query)| ToolCall {
            id,
            name,
            arguments: json!({"query": query}),
        })
}

/// Strategy for conversation messages, ids left blank
pub fn message_strategy() -> impl Strategy<Value = Message> {
    (
        conversation_role_strategy(),
        "[a-zA-Z0-9 .,!?]{0,80}",
        vec(tool_call_strategy(), 0..3),
    )
        .prop_map(|(speaker, content, calls)| {
            // Only assistant turns carry tool calls
            let tool_calls = (speaker == role::ASSISTANT && !calls.is_empty()).then_some(calls);
            Message {
                id: String::new(),
                role: speaker.to_string(),
                content,
                tool_calls,
            }
        })
}

/// Strategy for tool definitions
pub fn tool_definition_strategy() -> impl Strategy<Value = ToolDefinition> {
    (
        "[a-z_]{1,16}",
        option::of("[a-zA-Z ]{1,40}"),
        "[a-z]{1,8}",
    )
        .prop_map(|(name, description, field)| ToolDefinition {
            name,
            description,
            parameters: json!({
                "type": "object",
                "properties": {field: {"type": "string"}}
            }),
        })
}

/// Strategy for tool choices that survive a round trip (no `none`)
pub fn tool_choice_strategy() -> impl Strategy<Value = ToolChoice> {
    prop_oneof![
        Just(ToolChoice::Auto),
        Just(ToolChoice::Any),
        "[a-z_]{1,16}".prop_map(|name| ToolChoice::Tool { name }),
    ]
}

/// Strategy for canonical requests inside the lossless subset
pub fn canonical_request_strategy() -> impl Strategy<Value = CanonicalRequest> {
    let messages = (option::of("[a-zA-Z .]{1,60}"), vec(message_strategy(), 0..6));
    let sampling = (
        option::of(0.0f64..=1.0),
        option::of(0.0f64..=1.0),
        option::of(1u64..=8192),
        option::of(any::<bool>()),
    );
    let tooling = (
        option::of(vec(tool_definition_strategy(), 0..3)),
        option::of(tool_choice_strategy()),
        any::<bool>(),
    );

    (
        option::of("claude-[a-z0-9-]{1,20}"),
        messages,
        sampling,
        option::of(vec("[A-Z]{1,8}", 0..3)),
        tooling,
    )
        .prop_map(|(model, (system, conversation), sampling, stop, tooling)| {
            let (temperature, top_p, max_tokens, stream) = sampling;
            let (tools, tool_choice, disable_parallel) = tooling;

            let messages = system
                .map(|content| Message {
                    id: String::new(),
                    role: role::SYSTEM.to_string(),
                    content,
                    tool_calls: None,
                })
                .into_iter()
                .chain(conversation)
                .enumerate()
                .map(|(position, message)| Message {
                    id: format!("req-msg-{}", position),
                    ..message
                })
                .collect();

            // Without a tool choice the flag renders as `auto`, which reads back differently
            let parallel_tool_calls = (tool_choice.is_some() && disable_parallel).then_some(false);

            CanonicalRequest {
                model,
                messages,
                temperature,
                top_p,
                max_tokens,
                stream,
                stop,
                tools,
                tool_choice,
                parallel_tool_calls,
            }
        })
}

/// Strategy for arbitrary JSON values with bounded depth
pub fn json_value_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| Value::Number(n.into())),
        "[a-zA-Z0-9 ]{0,20}".prop_map(Value::String),
    ];

    leaf.prop_recursive(3, 24, 5, |inner| {
        prop_oneof![
            vec(inner.clone(), 0..5).prop_map(Value::Array),
            proptest::collection::hash_map("[a-z_]{1,10}", inner, 0..5)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::get_mapper;
    use crate::providers::anthropic::REQUEST_MAPPER;

    proptest! {
        #[test]
        fn test_request_strategy_ids_are_positional(request in canonical_request_strategy()) {
            for (position, message) in request.messages.iter().enumerate() {
                prop_assert_eq!(&message.id, &format!("req-msg-{}", position));
            }
        }

        #[test]
        fn test_canonical_request_round_trips(request in canonical_request_strategy()) {
            let mapper = get_mapper(REQUEST_MAPPER).unwrap();
            let canonical = serde_json::to_value(&request).unwrap();

            let external = mapper.map(&canonical).unwrap();
            let back: CanonicalRequest =
                serde_json::from_value(mapper.to_internal(&external).unwrap()).unwrap();

            prop_assert_eq!(back, request);
        }

        #[test]
        fn test_request_mapping_is_deterministic(value in json_value_strategy()) {
            let mapper = get_mapper(REQUEST_MAPPER).unwrap();
            let first = mapper.to_internal(&value).map_err(|e| e.to_string());
            let second = mapper.to_internal(&value).map_err(|e| e.to_string());
            prop_assert_eq!(first, second);
        }
    }
}
