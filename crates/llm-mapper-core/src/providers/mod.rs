//! Provider integrations
//!
//! Each provider exposes its mappers through the [`ProviderMapper`] trait.
//! The path mappers they declare live in one shared [`MapperRegistry`].

pub mod anthropic;

pub use anthropic::AnthropicChat;

use crate::error::{Error, Result};
use crate::mapping::{MapperRegistry, MappingReport, PathMapper};
use crate::normalize::NormalizeInput;
use crate::types::NormalizedSchema;
use serde_json::Value;
use std::sync::{Arc, OnceLock};

/// Names accepted by [`provider_for`]
pub const PROVIDER_NAMES: &[&str] = &["anthropic", "anthropic-chat"];

/// Per-provider normalization and rendering
pub trait ProviderMapper: Send + Sync {
    /// Name of the provider schema
    fn name(&self) -> &'static str;

    /// Normalize a captured request/response pair
    fn normalize(&self, input: &NormalizeInput) -> Result<NormalizedSchema>;

    /// Like [`ProviderMapper::normalize`], also returning one report per mapper run
    fn normalize_with_reports(&self, input: &NormalizeInput) -> Result<(NormalizedSchema, Vec<MappingReport>)>;

    /// Render a canonical request in the provider's shape
    fn render_request(&self, canonical: &Value) -> Result<Value>;

    /// Render a canonical response in the provider's shape
    fn render_response(&self, canonical: &Value) -> Result<Value>;
}

/// Registry holding the built-in provider mappers
pub fn builtin_registry() -> &'static MapperRegistry {
    static REGISTRY: OnceLock<MapperRegistry> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let mut registry = MapperRegistry::new();
        anthropic::chat_request_builder().build_and_register(&mut registry);
        anthropic::chat_response_builder().build_and_register(&mut registry);
        registry
    })
}

/// Look up a built-in mapper by name
pub fn get_mapper(name: &str) -> Result<Arc<PathMapper>> {
    builtin_registry().get(name)
}

static ANTHROPIC_CHAT: AnthropicChat = AnthropicChat;

/// Resolve a provider by name
pub fn provider_for(name: &str) -> Result<&'static dyn ProviderMapper> {
    match name {
        "anthropic" | "anthropic-chat" => Ok(&ANTHROPIC_CHAT),
        other => Err(Error::UnknownProvider {
            name: other.to_string(),
            available: PROVIDER_NAMES.join(", "),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_registry_contents() {
        let names: Vec<&str> = builtin_registry().names().collect();
        assert_eq!(names, vec![anthropic::REQUEST_MAPPER, anthropic::RESPONSE_MAPPER]);
        assert!(get_mapper("anthropic-chat").is_ok());
        assert!(matches!(get_mapper("openai-chat"), Err(Error::UnknownMapper { .. })));
    }

    #[test]
    fn test_provider_lookup() {
        assert_eq!(provider_for("anthropic").unwrap().name(), "anthropic-chat");
        assert_eq!(provider_for("anthropic-chat").unwrap().name(), "anthropic-chat");
    }

    #[test]
    fn test_unknown_provider() {
        let err = provider_for("openai").err().unwrap();
        assert!(matches!(err, Error::UnknownProvider { ref name, .. } if name == "openai"));
        assert!(err.to_string().contains("anthropic, anthropic-chat"));
    }
}
