//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API,
//! providing a type-safe and well-documented command interface.

use clap::{Parser, Subcommand, ValueEnum};
use is_terminal::IsTerminal;
use std::path::PathBuf;

/// llm-mapper CLI - Normalize and render LLM provider payloads
///
/// Offline tooling over the llm-mapper engine: normalize captured provider
/// request/response bodies into the canonical schema, render canonical
/// requests back into provider bodies and inspect mapping paths.
#[derive(Parser, Debug)]
#[command(
    name = "llm-mapper",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "LLM_MAPPER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for results (defaults to the configured format)
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Normalize a captured provider request (and response) into the canonical schema
    Normalize(NormalizeArgs),

    /// Render a canonical request or response back into a provider body
    Render(RenderArgs),

    /// Parse mapping paths and optionally resolve them against a document
    Path(PathArgs),

    /// List registered mappers or show one mapper's declarations
    Mappers(MappersArgs),

    /// Manage configuration files and settings
    Config(ConfigArgs),

    /// Generate shell completions for the specified shell
    Completions(CompletionsArgs),
}

/// Arguments for the normalize command
#[derive(Parser, Debug)]
pub struct NormalizeArgs {
    /// Provider request body (JSON or YAML)
    #[arg(value_name = "REQUEST")]
    pub request: PathBuf,

    /// Provider response body captured for the same call
    #[arg(long, value_name = "FILE")]
    pub response: Option<PathBuf>,

    /// Resolved model name used when the bodies carry none
    #[arg(short, long, value_name = "NAME")]
    pub model: Option<String>,

    /// Provider the bodies were captured from
    #[arg(short, long, value_name = "PROVIDER")]
    pub provider: Option<String>,

    /// Include the per-declaration mapping reports
    #[arg(long)]
    pub diagnostics: bool,

    /// Save the normalized schema to a file
    #[arg(long = "save-to", value_name = "OUTPUT_FILE")]
    pub save_to: Option<PathBuf>,
}

/// Arguments for the render command
#[derive(Parser, Debug)]
pub struct RenderArgs {
    /// Canonical request (or response with --response) as JSON or YAML
    #[arg(value_name = "CANONICAL")]
    pub canonical: PathBuf,

    /// Provider to render for
    #[arg(short, long, value_name = "PROVIDER")]
    pub provider: Option<String>,

    /// Treat the input as a canonical response
    #[arg(long)]
    pub response: bool,
}

/// Arguments for the path command
#[derive(Parser, Debug)]
pub struct PathArgs {
    /// Path strings such as `messages[0].content`
    #[arg(value_name = "PATH", required = true, num_args = 1..)]
    pub paths: Vec<String>,

    /// Resolve each path against this JSON or YAML document
    #[arg(long, value_name = "FILE")]
    pub against: Option<PathBuf>,
}

/// Arguments for the mappers command
#[derive(Parser, Debug)]
pub struct MappersArgs {
    /// Mapper to describe (lists all mappers if omitted)
    #[arg(value_name = "NAME")]
    pub name: Option<String>,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration management actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Write a default configuration file
    Init(ConfigInitArgs),

    /// Show current configuration values
    Show(ConfigShowArgs),

    /// Get a configuration value
    Get(ConfigGetArgs),

    /// Print the configuration file in use
    Path,
}

/// Arguments for config init
#[derive(Parser, Debug)]
pub struct ConfigInitArgs {
    /// Target file (format chosen by extension)
    #[arg(value_name = "FILE", default_value = ".llm-mapper.toml")]
    pub path: PathBuf,

    /// Force overwrite existing config files
    #[arg(long)]
    pub force: bool,
}

/// Arguments for config show
#[derive(Parser, Debug)]
pub struct ConfigShowArgs {
    /// Show configuration in specified format
    #[arg(short, long, value_enum, default_value = "toml")]
    pub format: ConfigFormat,
}

/// Arguments for config get
#[derive(Parser, Debug)]
pub struct ConfigGetArgs {
    /// Configuration key (e.g., default_provider, output.format)
    pub key: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "value")]
    pub format: ConfigGetFormat,
}

/// Configuration file formats
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ConfigFormat {
    /// TOML format
    Toml,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

/// Configuration get output formats
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ConfigGetFormat {
    /// Just the value
    Value,
    /// JSON formatted
    Json,
}

/// Arguments for generating shell completions
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable formatted output
    Human,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
    /// Pretty-printed JSON output
    JsonPretty,
}

/// Supported shells for completion generation
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective verbosity level (considering quiet flag)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Check if colored output should be used
    pub fn use_color(&self) -> bool {
        !self.no_color && std::io::stdout().is_terminal()
    }
}

impl OutputFormat {
    /// Parse a configured format name, accepting the same spellings as `--output`
    pub fn from_config(name: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(name, true).ok()
    }
}

impl Shell {
    /// Convert to clap_complete shell type
    pub fn to_clap_shell(self) -> clap_complete::Shell {
        match self {
            Shell::Bash => clap_complete::Shell::Bash,
            Shell::Zsh => clap_complete::Shell::Zsh,
            Shell::Fish => clap_complete::Shell::Fish,
            Shell::PowerShell => clap_complete::Shell::PowerShell,
            Shell::Elvish => clap_complete::Shell::Elvish,
        }
    }
}
