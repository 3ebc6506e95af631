//! llm-mapper CLI
//!
//! This is the main entry point for the llm-mapper command-line tool,
//! providing commands for normalizing captured provider payloads, rendering
//! canonical documents back into provider bodies and inspecting mappings.

mod cli;
mod config;
mod error;
mod handlers;
mod logging;
mod output;

use cli::{Cli, Commands, OutputFormat};
use colored::control;
use config::{Config, OutputConfig};
use error::{Error, Result};
use logging::{timing::Timer, LoggingConfig};
use output::OutputWriter;
use std::process;
use tracing::instrument;

fn main() {
    let cli = Cli::parse_args();

    let config = match Config::load_with_file(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => exit_with(&e, cli.use_color()),
    };

    let use_color = cli.use_color() && config.output.color;
    control::set_override(use_color);

    if let Err(e) = init_logging(&cli, &config) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    match run(cli, &config, use_color) {
        Ok(()) => process::exit(0),
        Err(e) => exit_with(&e, use_color),
    }
}

/// Print the error and exit with its code
fn exit_with(error: &Error, use_color: bool) -> ! {
    eprintln!("{}", error::format_error(error, use_color));

    if error.should_show_help() {
        eprintln!("\nFor more information, try '--help'");
    }

    process::exit(error.exit_code());
}

/// Main application logic
#[instrument(skip(cli, config), fields(command = ?cli.command))]
fn run(cli: Cli, config: &Config, use_color: bool) -> Result<()> {
    let _timer = Timer::new("cli_execution");

    let format = output_format(cli.output, &config.output)?;
    let mut output = OutputWriter::new(format, use_color, cli.quiet, cli.verbosity_level());

    crate::log_with_request_id!(
        info,
        command = ?cli.command,
        verbosity = cli.verbosity_level(),
        "Executing command"
    );

    match cli.command {
        Commands::Normalize(args) => handlers::handle_normalize(args, config, &mut output),
        Commands::Render(args) => handlers::handle_render(args, config, &mut output),
        Commands::Path(args) => handlers::handle_path(args, &mut output),
        Commands::Mappers(args) => handlers::handle_mappers(args, &mut output),
        Commands::Config(args) => {
            handlers::handle_config(args, config, cli.config.as_deref(), &mut output)
        }
        Commands::Completions(args) => {
            handlers::handle_completions(args, &mut std::io::stdout())
        }
    }
}

/// Resolve the output format: `--output` first, then the configured default
fn output_format(flag: Option<OutputFormat>, config: &OutputConfig) -> Result<OutputFormat> {
    if let Some(format) = flag {
        return Ok(format);
    }

    let format = OutputFormat::from_config(&config.format)
        .ok_or_else(|| Error::config(format!("Unknown output format '{}'", config.format)))?;

    Ok(match format {
        OutputFormat::Json if config.pretty => OutputFormat::JsonPretty,
        other => other,
    })
}

/// Initialize the logging system
fn init_logging(cli: &Cli, config: &Config) -> Result<()> {
    let verbosity = cli.verbosity_level();
    let mut logging_config = LoggingConfig::from_verbosity(verbosity);

    logging_config.apply_file_settings(&config.logging, verbosity);
    logging_config.merge_with_env();

    // If quiet mode, only log errors
    if cli.quiet {
        logging_config.level = "error".to_string();
        logging_config.console = false;
    }

    logging::init_logging(logging_config)
}
