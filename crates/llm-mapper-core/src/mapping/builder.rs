//! Fluent declaration surface for path mappers
//!
//! Provider integrations describe their mapping as a chain of `map` and
//! `map_with_transform` calls. Declarations keep call order; nothing is
//! reordered, deduplicated or validated, and a later declaration writing the
//! same target path overwrites an earlier one.
//!
//! Copyright (c) 2025 LLM Mapper Team
//! Licensed under the Apache-2.0 license

use super::declaration::{MappingDeclaration, Transform, TransformPair};
use super::mapper::PathMapper;
use super::path::Path;
use super::registry::MapperRegistry;
use crate::error::TransformError;
use serde_json::Value;
use std::sync::Arc;

/// Builder for [`PathMapper`]s
#[derive(Debug, Clone)]
pub struct MapperBuilder {
    name: String,
    declarations: Vec<MappingDeclaration>,
}

impl MapperBuilder {
    /// Start a mapper for the external schema `name`
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declarations: Vec::new(),
        }
    }

    /// Register an identity declaration
    pub fn map(mut self, external_path: &str, internal_path: &str) -> Self {
        self.declarations.push(MappingDeclaration::identity(
            Path::parse(external_path),
            Path::parse(internal_path),
        ));
        self
    }

    /// Register a transform-bearing declaration
    ///
    /// `to_internal` receives the external value and the canonical object
    /// built so far; `to_external` receives the canonical value and the
    /// external object built so far.
    pub fn map_with_transform<F, B>(
        mut self,
        external_path: &str,
        internal_path: &str,
        to_internal: F,
        to_external: B,
        description: Option<&str>,
    ) -> Self
    where
        F: Fn(&Value, &Value) -> std::result::Result<Option<Value>, TransformError> + Send + Sync + 'static,
        B: Fn(&Value, &Value) -> std::result::Result<Option<Value>, TransformError> + Send + Sync + 'static,
    {
        self.declarations.push(MappingDeclaration {
            external_path: Path::parse(external_path),
            internal_path: Path::parse(internal_path),
            transform: Some(TransformPair {
                to_internal: Transform::new(to_internal),
                to_external: Transform::new(to_external),
            }),
            description: description.map(str::to_string),
        });
        self
    }

    /// Register an already-built declaration
    pub fn declaration(mut self, declaration: MappingDeclaration) -> Self {
        self.declarations.push(declaration);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Snapshot the declarations registered so far into a mapper
    ///
    /// The builder stays usable; later registrations do not reach mappers
    /// that were already built.
    pub fn build(&self) -> PathMapper {
        PathMapper::new(self.name.clone(), self.declarations.clone())
    }

    /// Build and register the mapper under its schema name
    pub fn build_and_register(&self, registry: &mut MapperRegistry) -> Arc<PathMapper> {
        registry.register(self.build())
    }
}
