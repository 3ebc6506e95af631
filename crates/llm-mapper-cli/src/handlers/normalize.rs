//! Normalize command handler

use super::utils::{load_document, resolve_provider, save_json};
use crate::cli::NormalizeArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::{redaction, timing::Timer};
use crate::output::OutputWriter;
use llm_mapper_core::{provider_for, MappingReport, NormalizeInput, NormalizedSchema};
use serde::Serialize;
use tracing::debug;

/// Machine-readable output when diagnostics are requested
#[derive(Debug, Serialize)]
struct NormalizeOutput<'a> {
    schema: &'a NormalizedSchema,
    reports: &'a [MappingReport],
}

/// Handle the normalize command
pub fn handle_normalize(
    args: NormalizeArgs,
    config: &Config,
    output: &mut OutputWriter,
) -> Result<()> {
    let provider_name = resolve_provider(args.provider.as_deref(), config);
    let timer = Timer::with_details("normalize", &provider_name);
    let provider = provider_for(&provider_name)?;

    if args.save_to.as_deref() == Some(args.request.as_path()) {
        return Err(Error::invalid_args(
            "--save-to must not overwrite the request file",
        ));
    }

    let request = load_document(&args.request)?;
    debug!(body = %redaction::redacted_json(&request), "Loaded provider request");

    let model = args
        .model
        .or_else(|| config.default_model.clone())
        .unwrap_or_default();
    let mut input = NormalizeInput::new(request, model);

    if let Some(path) = args.response.as_deref() {
        let response = load_document(path)?;
        debug!(body = %redaction::redacted_json(&response), "Loaded provider response");
        input = input.with_response(response);
    }

    output.debug(&format!("Normalizing with provider '{}'", provider.name()))?;

    let (schema, reports) = if args.diagnostics || config.diagnostics {
        provider.normalize_with_reports(&input)?
    } else {
        (provider.normalize(&input)?, Vec::new())
    };

    debug!(
        messages = schema.request.messages.len(),
        has_response = schema.response.is_some(),
        elapsed_us = timer.elapsed().as_micros() as u64,
        "Normalization finished"
    );

    if reports.is_empty() || output.is_human() {
        output.schema(&schema)?;
    } else {
        output.data(&NormalizeOutput {
            schema: &schema,
            reports: &reports,
        })?;
    }

    if output.is_human() {
        for report in &reports {
            output.writeln("")?;
            output.report(report)?;

            let mismatches = report.summary().skipped_type_mismatch;
            if mismatches > 0 {
                output.warning(&format!(
                    "{} declaration(s) in '{}' could not be written due to a type mismatch",
                    mismatches, report.mapper
                ))?;
            }
        }
    }

    if let Some(path) = &args.save_to {
        save_json(path, &schema)?;
        output.success(&format!("✓ Saved normalized schema to {}", path.display()))?;
    }

    Ok(())
}
