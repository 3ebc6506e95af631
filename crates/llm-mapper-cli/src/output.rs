//! Output formatting and writing utilities
//!
//! This module provides utilities for formatting and writing output
//! in various formats (JSON, YAML, human-readable) with dedicated
//! human renderings for normalized schemas and mapping reports.

use crate::cli::OutputFormat;
use crate::error::Result;
use crate::logging::redaction;
use colored::Colorize;
use llm_mapper_core::{
    CanonicalRequest, CanonicalResponse, MappingReport, Message, NormalizedSchema, ToolChoice,
};
use serde::Serialize;
use serde_json::Value;
use std::io::{self, Write};
use tracing::{debug, trace};

/// Longest message text shown per line in human output
const MAX_CONTENT_WIDTH: usize = 96;

/// Trait for formatting output with specialized support for common types
pub trait OutputFormatter {
    /// Format a serializable value
    fn format<T: Serialize>(&self, value: &T) -> Result<String>;

    /// Format a normalized schema
    fn format_schema(&self, schema: &NormalizedSchema) -> Result<String>;

    /// Format a mapping report
    fn format_report(&self, report: &MappingReport) -> Result<String>;
}

impl OutputFormatter for OutputFormat {
    fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(value)?),
            OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(value)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
            // No dedicated rendering, fall back to pretty JSON
            OutputFormat::Human => Ok(serde_json::to_string_pretty(value)?),
        }
    }

    fn format_schema(&self, schema: &NormalizedSchema) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_schema_human(schema)),
            _ => self.format(schema),
        }
    }

    fn format_report(&self, report: &MappingReport) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(report.render()),
            _ => self.format(report),
        }
    }
}

/// Output writer that handles different output formats and colors
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    quiet: bool,
    verbose: u8,
    writer: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a new output writer on stdout
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool, verbose: u8) -> Self {
        Self::with_writer(format, use_color, quiet, verbose, Box::new(io::stdout()))
    }

    /// Create an output writer with a custom writer
    pub fn with_writer(
        format: OutputFormat,
        use_color: bool,
        quiet: bool,
        verbose: u8,
        writer: Box<dyn Write>,
    ) -> Self {
        Self {
            format,
            use_color,
            quiet,
            verbose,
            writer,
        }
    }

    /// Whether human-oriented extras (sections, tables, notes) are written
    pub fn is_human(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Write a line of output
    pub fn writeln(&mut self, content: &str) -> Result<()> {
        writeln!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write an info message
    pub fn info(&mut self, message: &str) -> Result<()> {
        debug!("Output info: {}", message);

        if self.quiet || !self.is_human() {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&format!("{} {}", "ℹ".blue(), message))
        } else {
            self.writeln(&format!("INFO: {}", message))
        }
    }

    /// Write a success message
    pub fn success(&mut self, message: &str) -> Result<()> {
        if self.quiet || !self.is_human() {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.green().to_string())
        } else {
            self.writeln(message)
        }
    }

    /// Write a warning message
    pub fn warning(&mut self, message: &str) -> Result<()> {
        if !self.is_human() {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.yellow().to_string())
        } else {
            self.writeln(&format!("WARNING: {}", message))
        }
    }

    /// Write a section header
    pub fn section(&mut self, title: &str) -> Result<()> {
        if self.quiet || !self.is_human() {
            return Ok(());
        }

        self.writeln("")?;
        if self.use_color {
            self.writeln(&format!("═══ {} ═══", title).bright_blue().to_string())
        } else {
            self.writeln(&format!("=== {} ===", title))
        }
    }

    /// Write data in the configured format
    pub fn data<T: Serialize>(&mut self, value: &T) -> Result<()> {
        if tracing::enabled!(tracing::Level::TRACE) {
            trace!("Outputting data: {}", redaction::redacted_json(&serde_json::to_value(value)?));
        }

        let formatted = self.format.format(value)?;
        self.writeln(formatted.trim_end())
    }

    /// Write a normalized schema
    pub fn schema(&mut self, schema: &NormalizedSchema) -> Result<()> {
        let formatted = self.format.format_schema(schema)?;
        self.writeln(formatted.trim_end())
    }

    /// Write a mapping report
    pub fn report(&mut self, report: &MappingReport) -> Result<()> {
        let formatted = self.format.format_report(report)?;
        if self.use_color && report.has_mismatches() {
            self.writeln(formatted.trim_end().yellow().to_string().as_str())
        } else {
            self.writeln(formatted.trim_end())
        }
    }

    /// Check if verbose output should be shown
    pub fn is_verbose(&self) -> bool {
        self.verbose > 0
    }

    /// Write debug information if verbose mode is enabled
    pub fn debug(&mut self, message: &str) -> Result<()> {
        if self.is_verbose() && self.is_human() {
            if self.use_color {
                self.writeln(&format!("{} {}", "DEBUG:".dimmed(), message.dimmed()))
            } else {
                self.writeln(&format!("DEBUG: {}", message))
            }
        } else {
            Ok(())
        }
    }

    /// Write a table (for human format)
    pub fn table(&mut self, headers: &[&str], rows: Vec<Vec<String>>) -> Result<()> {
        if self.quiet || !self.is_human() {
            return Ok(());
        }

        let mut widths = headers.iter().map(|h| h.chars().count()).collect::<Vec<_>>();
        for row in &rows {
            for (i, cell) in row.iter().enumerate() {
                if i < widths.len() {
                    widths[i] = widths[i].max(cell.chars().count());
                }
            }
        }

        let header_row = headers
            .iter()
            .enumerate()
            .map(|(i, h)| format!("{:width$}", h, width = widths[i]))
            .collect::<Vec<_>>()
            .join(" │ ");

        if self.use_color {
            self.writeln(&header_row.bold().to_string())?;
        } else {
            self.writeln(&header_row)?;
        }

        let separator = widths
            .iter()
            .map(|w| "─".repeat(*w))
            .collect::<Vec<_>>()
            .join("─┼─");
        self.writeln(&separator)?;

        for row in rows {
            let row_str = row
                .iter()
                .enumerate()
                .map(|(i, cell)| match widths.get(i) {
                    Some(&width) => format!("{:width$}", cell, width = width),
                    None => cell.clone(),
                })
                .collect::<Vec<_>>()
                .join(" │ ");
            self.writeln(row_str.trim_end())?;
        }

        Ok(())
    }
}

/// Format a normalized schema for human reading
fn format_schema_human(schema: &NormalizedSchema) -> String {
    let mut output = String::new();

    output.push_str("═══ Normalized Request ═══\n\n");
    output.push_str(&format_request_human(&schema.request));

    match &schema.response {
        Some(response) => {
            output.push_str("\n═══ Normalized Response ═══\n\n");
            output.push_str(&format_response_human(response));
        }
        None => output.push_str("\n📭 No response captured\n"),
    }

    output.push_str("\n═══ Preview ═══\n\n");
    output.push_str(&format!("  Request:  {}\n", truncate(&schema.preview.request)));
    output.push_str(&format!("  Response: {}\n", truncate(&schema.preview.response)));
    output.push_str(&format!(
        "  Messages: {} total\n",
        schema.preview.concatenated_messages.len()
    ));

    output
}

fn format_request_human(request: &CanonicalRequest) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "🔧 Model: {}\n",
        request.model.as_deref().unwrap_or("(unresolved)")
    ));

    let mut parameters = Vec::new();
    if let Some(temperature) = request.temperature {
        parameters.push(format!("temperature={}", temperature));
    }
    if let Some(top_p) = request.top_p {
        parameters.push(format!("top_p={}", top_p));
    }
    if let Some(max_tokens) = request.max_tokens {
        parameters.push(format!("max_tokens={}", max_tokens));
    }
    if let Some(stream) = request.stream {
        parameters.push(format!("stream={}", stream));
    }
    if let Some(stop) = &request.stop {
        parameters.push(format!("stop={:?}", stop));
    }
    if !parameters.is_empty() {
        output.push_str(&format!("⚙️  Parameters: {}\n", parameters.join(", ")));
    }

    output.push_str(&format_messages_human(&request.messages));

    if let Some(tools) = request.tools.as_ref().filter(|t| !t.is_empty()) {
        let names: Vec<&str> = tools.iter().map(|t| t.name.as_str()).collect();
        output.push_str(&format!("🛠️  Tools: {}\n", names.join(", ")));
    }

    if let Some(choice) = &request.tool_choice {
        let label = match choice {
            ToolChoice::Auto => "auto".to_string(),
            ToolChoice::Any => "any".to_string(),
            ToolChoice::None => "none".to_string(),
            ToolChoice::Tool { name } => format!("tool '{}'", name),
        };
        output.push_str(&format!("🎯 Tool choice: {}\n", label));
    }

    if request.parallel_tool_calls == Some(false) {
        output.push_str("   Parallel tool calls disabled\n");
    }

    output
}

fn format_response_human(response: &CanonicalResponse) -> String {
    let mut output = String::new();

    if let Some(model) = &response.model {
        output.push_str(&format!("🔧 Model: {}\n", model));
    }

    if let Some(error) = &response.error {
        output.push_str(&format!("❌ Error: {}\n", error.message));
    }

    if !response.messages.is_empty() {
        output.push_str(&format_messages_human(&response.messages));
    }

    output
}

fn format_messages_human(messages: &[Message]) -> String {
    let mut output = format!("💬 Messages ({}):\n", messages.len());

    for message in messages {
        output.push_str(&format!(
            "  [{}] {}: {}\n",
            message.id,
            message.role,
            truncate(&message.content)
        ));

        for call in message.tool_calls.iter().flatten() {
            output.push_str(&format!(
                "      ↳ tool_use {} {}\n",
                call.name,
                format_value_compact(&call.arguments)
            ));
        }
    }

    output
}

/// Shorten long text to one display line
fn truncate(text: &str) -> String {
    let single_line = text.replace('\n', " ");
    if single_line.chars().count() <= MAX_CONTENT_WIDTH {
        return single_line;
    }
    let head: String = single_line.chars().take(MAX_CONTENT_WIDTH - 1).collect();
    format!("{}…", head)
}

/// Format a JSON value in a compact, human-readable way
pub fn format_value_compact(value: &Value) -> String {
    match value {
        Value::String(s) => format!("\"{}\"", s),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => {
            if arr.len() <= 3 {
                format!(
                    "[{}]",
                    arr.iter()
                        .map(format_value_compact)
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            } else {
                format!("[{} items]", arr.len())
            }
        }
        Value::Object(obj) => {
            if obj.len() <= 2 {
                let items: Vec<String> = obj
                    .iter()
                    .map(|(k, v)| format!("{}: {}", k, format_value_compact(v)))
                    .collect();
                format!("{{{}}}", items.join(", "))
            } else {
                format!("{{{} fields}}", obj.len())
            }
        }
    }
}
