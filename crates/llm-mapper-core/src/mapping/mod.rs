//! Declarative, bidirectional JSON mapping engine
//!
//! This module provides the path language, the mapper engine that applies an
//! ordered list of path-to-path declarations, the builder used to declare
//! them, a registry of named mappers and per-run diagnostics.
//!
//! Copyright (c) 2025 LLM Mapper Team
//! Licensed under the Apache-2.0 license

pub mod builder;
pub mod declaration;
pub mod mapper;
pub mod path;
pub mod registry;
pub mod report;

pub use builder::MapperBuilder;
pub use declaration::{MappingDeclaration, Transform, TransformFn, TransformPair};
pub use mapper::PathMapper;
pub use path::{Index, Path, SetOutcome, Step};
pub use registry::MapperRegistry;
pub use report::{MappingOutcome, MappingRecord, MappingReport, MappingSummary};
