//! Anthropic Messages API mappers
//!
//! The request mapper is order-sensitive in two places: `system` is declared
//! before `messages` so the message fold can see an explicit system prompt,
//! and `tool_choice -> parallel_tool_calls` is declared after
//! `tool_choice -> tool_choice` so its backward direction can extend the
//! external tool choice that was already rendered.
//!
//! Copyright (c) 2025 LLM Mapper Team
//! Licensed under the Apache-2.0 license

pub mod content;
pub mod messages;
pub mod preview;
pub mod response;
pub mod tools;

use super::{get_mapper, ProviderMapper};
use crate::error::{Error, Result};
use crate::mapping::{MapperBuilder, MappingReport, PathMapper};
use crate::normalize::NormalizeInput;
use crate::types::{CanonicalRequest, CanonicalResponse, NormalizedSchema};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, debug_span};

/// Schema name of the request mapper
pub const REQUEST_MAPPER: &str = "anthropic-chat";
/// Schema name of the response mapper
pub const RESPONSE_MAPPER: &str = "anthropic-chat-response";

/// Declarations for Anthropic chat request bodies
pub fn chat_request_builder() -> MapperBuilder {
    MapperBuilder::new(REQUEST_MAPPER)
        .map("model", "model")
        .map_with_transform(
            "system",
            "messages",
            messages::system_to_internal,
            messages::system_to_external,
            Some("system prompt becomes the leading system message"),
        )
        .map_with_transform(
            "messages",
            "messages",
            messages::messages_to_internal,
            messages::messages_to_external,
            Some("folds embedded system messages; explicit system wins"),
        )
        .map("temperature", "temperature")
        .map("top_p", "top_p")
        .map("max_tokens", "max_tokens")
        .map("stream", "stream")
        .map("stop_sequences", "stop")
        .map_with_transform(
            "tools",
            "tools",
            tools::tools_to_internal,
            tools::tools_to_external,
            Some("input_schema <-> parameters"),
        )
        .map_with_transform(
            "tool_choice",
            "tool_choice",
            tools::tool_choice_to_internal,
            tools::tool_choice_to_external,
            Some("auto/any/tool; bare string names a tool; none renders as any"),
        )
        .map_with_transform(
            "tool_choice",
            "parallel_tool_calls",
            tools::parallel_to_internal,
            tools::parallel_to_external,
            Some("disable_parallel_tool_use=true becomes parallel_tool_calls=false"),
        )
}

/// Declarations for Anthropic chat response bodies
pub fn chat_response_builder() -> MapperBuilder {
    MapperBuilder::new(RESPONSE_MAPPER)
        .map("model", "model")
        .map_with_transform(
            "content",
            "messages",
            response::content_to_internal,
            response::content_to_external,
            Some("one assistant message per text or tool_use block"),
        )
        .map_with_transform(
            "error",
            "error",
            response::error_to_internal,
            response::error_to_external,
            Some("error message"),
        )
}

/// Anthropic chat provider integration
#[derive(Debug, Clone, Copy, Default)]
pub struct AnthropicChat;

impl AnthropicChat {
    fn convert(
        &self,
        input: &NormalizeInput,
        mut reports: Option<&mut Vec<MappingReport>>,
    ) -> Result<NormalizedSchema> {
        let span = debug_span!(
            "normalize",
            provider = self.name(),
            model = %input.resolved_model_name
        );
        let _guard = span.enter();

        let request_mapper = get_mapper(REQUEST_MAPPER)?;
        let mut request: CanonicalRequest = read_section(
            &request_mapper,
            &input.provider_request_body,
            "request",
            reports.as_deref_mut(),
        )?;
        if request.model.is_none() && !input.resolved_model_name.is_empty() {
            request.model = Some(input.resolved_model_name.clone());
        }

        let response_body = input.provider_response_body.as_ref().filter(|body| !body.is_null());
        let response = match response_body {
            Some(body) => {
                let response_mapper = get_mapper(RESPONSE_MAPPER)?;
                let mut response: CanonicalResponse =
                    read_section(&response_mapper, body, "response", reports.as_deref_mut())?;
                if response.model.is_none() {
                    response.model = request.model.clone();
                }
                Some(response)
            }
            None => None,
        };

        let preview = preview::build(&input.provider_request_body, &request, response_body, response.as_ref());
        debug!(
            messages = request.messages.len(),
            has_response = response.is_some(),
            "Normalized request/response pair"
        );

        Ok(NormalizedSchema {
            request,
            response,
            preview,
        })
    }
}

/// Run `mapper` forward and read the result as a canonical section
fn read_section<T: DeserializeOwned>(
    mapper: &PathMapper,
    body: &Value,
    section: &'static str,
    reports: Option<&mut Vec<MappingReport>>,
) -> Result<T> {
    let value = match reports {
        Some(reports) => {
            let (value, report) = mapper.to_internal_with_report(body)?;
            reports.push(report);
            value
        }
        None => mapper.to_internal(body)?,
    };
    serde_json::from_value(value).map_err(|source| Error::Schema { section, source })
}

impl ProviderMapper for AnthropicChat {
    fn name(&self) -> &'static str {
        REQUEST_MAPPER
    }

    fn normalize(&self, input: &NormalizeInput) -> Result<NormalizedSchema> {
        self.convert(input, None)
    }

    fn normalize_with_reports(&self, input: &NormalizeInput) -> Result<(NormalizedSchema, Vec<MappingReport>)> {
        let mut reports = Vec::with_capacity(2);
        let schema = self.convert(input, Some(&mut reports))?;
        Ok((schema, reports))
    }

    fn render_request(&self, canonical: &Value) -> Result<Value> {
        get_mapper(REQUEST_MAPPER)?.map(canonical)
    }

    fn render_response(&self, canonical: &Value) -> Result<Value> {
        get_mapper(RESPONSE_MAPPER)?.map(canonical)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_declaration_order() {
        let mapper = chat_request_builder().build();
        let order: Vec<String> = mapper
            .declarations()
            .iter()
            .map(|d| format!("{}->{}", d.external_path, d.internal_path))
            .collect();
        assert_eq!(
            order,
            vec![
                "model->model",
                "system->messages",
                "messages->messages",
                "temperature->temperature",
                "top_p->top_p",
                "max_tokens->max_tokens",
                "stream->stream",
                "stop_sequences->stop",
                "tools->tools",
                "tool_choice->tool_choice",
                "tool_choice->parallel_tool_calls",
            ]
        );
    }

    #[test]
    fn test_every_transform_is_described() {
        for mapper in [chat_request_builder().build(), chat_response_builder().build()] {
            for declaration in mapper.declarations().iter().filter(|d| !d.is_identity()) {
                assert!(declaration.description.is_some(), "{} lacks a description", declaration);
            }
        }
    }
}
