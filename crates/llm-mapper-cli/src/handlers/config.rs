//! Configuration command handlers

use crate::cli::{
    ConfigAction, ConfigArgs, ConfigFormat, ConfigGetArgs, ConfigGetFormat, ConfigInitArgs,
    ConfigShowArgs,
};
use crate::config::Config;
use crate::error::{Error, ErrorContext, Result};
use crate::output::OutputWriter;
use std::path::Path;

/// Handle the config command
pub fn handle_config(
    args: ConfigArgs,
    config: &Config,
    config_file: Option<&Path>,
    output: &mut OutputWriter,
) -> Result<()> {
    match args.action {
        ConfigAction::Init(init_args) => handle_config_init(init_args, output),
        ConfigAction::Show(show_args) => handle_config_show(show_args, config, output),
        ConfigAction::Get(get_args) => handle_config_get(get_args, config, output),
        ConfigAction::Path => handle_config_path(config_file, output),
    }
}

/// Handle config init subcommand
fn handle_config_init(args: ConfigInitArgs, output: &mut OutputWriter) -> Result<()> {
    if args.path.exists() && !args.force {
        return Err(Error::config(format!(
            "{} already exists (use --force to overwrite)",
            args.path.display()
        )));
    }

    Config::default()
        .save(&args.path)
        .context("Failed to write configuration")?;
    output.success(&format!("✓ Wrote default configuration to {}", args.path.display()))
}

/// Handle config show subcommand
fn handle_config_show(
    args: ConfigShowArgs,
    config: &Config,
    output: &mut OutputWriter,
) -> Result<()> {
    let content = match args.format {
        ConfigFormat::Toml => toml::to_string_pretty(config)?,
        ConfigFormat::Json => serde_json::to_string_pretty(config)?,
        ConfigFormat::Yaml => serde_yaml::to_string(config)?,
    };

    output.writeln(content.trim_end())
}

/// Handle config get subcommand
fn handle_config_get(args: ConfigGetArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let value = config.get_value(&args.key)?;

    match args.format {
        ConfigGetFormat::Value => output.writeln(&value),
        ConfigGetFormat::Json => {
            let json_value = serde_json::json!({
                "key": args.key,
                "value": value
            });
            output.writeln(&serde_json::to_string_pretty(&json_value)?)
        }
    }
}

/// Handle config path subcommand
fn handle_config_path(config_file: Option<&Path>, output: &mut OutputWriter) -> Result<()> {
    match Config::active_path(config_file) {
        Some(path) => output.writeln(&path.display().to_string()),
        None => {
            output.info("No configuration file found, using defaults")?;
            if let Some(user_path) = Config::user_config_path() {
                output.info(&format!("User config location: {}", user_path.display()))?;
            }
            Ok(())
        }
    }
}
