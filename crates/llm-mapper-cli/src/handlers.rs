//! Command handlers for CLI subcommands
//!
//! Each subcommand lives in its own module; this module re-exports the
//! entry points used by `main`.

mod completions;
mod config;
mod mappers;
mod normalize;
mod path;
mod render;
mod utils;

pub use completions::handle_completions;
pub use config::handle_config;
pub use mappers::handle_mappers;
pub use normalize::handle_normalize;
pub use path::handle_path;
pub use render::handle_render;
