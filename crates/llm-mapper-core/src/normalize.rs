//! Normalization entry point
//!
//! The call contract consumed by request-logging services: a captured
//! provider request body, an optional response body and the model name the
//! gateway resolved, in; a [`NormalizedSchema`] out.

use crate::error::Result;
use crate::mapping::MappingReport;
use crate::providers::provider_for;
use crate::types::NormalizedSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Input of one normalization call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizeInput {
    pub provider_request_body: Value,
    #[serde(default)]
    pub provider_response_body: Option<Value>,
    #[serde(default)]
    pub resolved_model_name: String,
}

impl NormalizeInput {
    pub fn new(provider_request_body: Value, resolved_model_name: impl Into<String>) -> Self {
        Self {
            provider_request_body,
            provider_response_body: None,
            resolved_model_name: resolved_model_name.into(),
        }
    }

    /// Attach the captured response body
    pub fn with_response(mut self, provider_response_body: Value) -> Self {
        self.provider_response_body = Some(provider_response_body);
        self
    }
}

/// Normalize a request/response pair captured from `provider`
pub fn normalize(provider: &str, input: &NormalizeInput) -> Result<NormalizedSchema> {
    provider_for(provider)?.normalize(input)
}

/// [`normalize`] plus the diagnostics of every mapper run
pub fn normalize_with_reports(
    provider: &str,
    input: &NormalizeInput,
) -> Result<(NormalizedSchema, Vec<MappingReport>)> {
    provider_for(provider)?.normalize_with_reports(input)
}
