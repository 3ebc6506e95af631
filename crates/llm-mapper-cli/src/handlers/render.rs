//! Render command handler

use super::utils::{load_document, resolve_provider};
use crate::cli::RenderArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::OutputWriter;
use llm_mapper_core::provider_for;
use tracing::info;

/// Handle the render command
pub fn handle_render(args: RenderArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let provider = provider_for(&resolve_provider(args.provider.as_deref(), config))?;
    let canonical = load_document(&args.canonical)?;

    let rendered = if args.response {
        provider.render_response(&canonical)?
    } else {
        provider.render_request(&canonical)?
    };

    info!(
        provider = provider.name(),
        response = args.response,
        "Rendered canonical document"
    );

    output.data(&rendered)
}
