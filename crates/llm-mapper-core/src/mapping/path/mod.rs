//! Dotted/bracketed path language used by mapping declarations
//!
//! Paths like `messages[0].content` or `items[]` are compiled once with
//! [`Path::parse`] and then evaluated with [`get`] and [`set`].
//!
//! Copyright (c) 2025 LLM Mapper Team
//! Licensed under the Apache-2.0 license

pub mod accessor;
pub mod ast;
pub mod parser;


pub use accessor::{get, set, SetOutcome, MAX_ARRAY_PADDING};
pub use ast::{Index, Path, Step};
pub use parser::{parse, Parser};

use serde_json::Value;

/// Parse `path` and read it from `root` in one call
pub fn get_str<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    get(root, &parse(path))
}

/// Parse `path` and write `value` at it in one call
pub fn set_str(root: &mut Value, path: &str, value: Value) -> SetOutcome {
    set(root, &parse(path), value)
}
