//! LLM Mapper Core - Normalization engine for LLM provider payloads
//!
//! This crate maps heterogeneous provider request/response bodies into one
//! canonical schema and renders canonical values back into provider shapes.
//!
//! # Main Components
//!
//! - **Path language**: dotted/bracketed paths compiled once into steps
//! - **Path mapper**: ordered, bidirectional path-to-path declarations
//! - **Mapper builder**: fluent declaration surface for provider integrations
//! - **Providers**: the Anthropic chat request and response mappers
//! - **Normalization**: the entry point producing a [`NormalizedSchema`]
//!
//! # Example
//!
//! ```
//! use llm_mapper_core::{normalize, NormalizeInput};
//! use serde_json::json;
//!
//! # fn main() -> llm_mapper_core::Result<()> {
//! let input = NormalizeInput::new(
//!     json!({
//!         "model": "claude-3-5-sonnet-20241022",
//!         "system": "Be brief.",
//!         "messages": [{"role": "user", "content": "Hi"}]
//!     }),
//!     "claude-3-5-sonnet-20241022",
//! );
//! let schema = normalize("anthropic", &input)?;
//! assert_eq!(schema.request.messages[0].role, "system");
//! assert_eq!(schema.preview.request, "Hi");
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod mapping;
pub mod normalize;
pub mod providers;
pub mod types;

#[cfg(test)]
mod proptest_strategies;

// Re-export main types for convenience
pub use error::{Direction, Error, Result, TransformError};
pub use mapping::{
    MapperBuilder, MapperRegistry, MappingDeclaration, MappingOutcome, MappingReport, Path,
    PathMapper, SetOutcome, Step,
};
pub use normalize::{normalize, normalize_with_reports, NormalizeInput};
pub use providers::{builtin_registry, get_mapper, provider_for, AnthropicChat, ProviderMapper};
pub use types::{
    CanonicalRequest, CanonicalResponse, Message, NormalizedSchema, Preview, ResponseError,
    ToolCall, ToolChoice, ToolDefinition,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
