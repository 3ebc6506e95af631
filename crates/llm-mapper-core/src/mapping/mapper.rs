//! The path mapper engine
//!
//! A [`PathMapper`] is an immutable, named, ordered list of
//! [`MappingDeclaration`]s. Each run starts from a fresh empty object and
//! applies the declarations in registration order, so a transform can read
//! what earlier declarations already wrote into the target.
//!
//! Copyright (c) 2025 LLM Mapper Team
//! Licensed under the Apache-2.0 license

use super::declaration::MappingDeclaration;
use super::path::{self, SetOutcome};
use super::report::{MappingOutcome, MappingRecord, MappingReport};
use crate::error::{Direction, Error, Result};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, trace};

/// Immutable mapper between one external schema and the canonical schema
#[derive(Debug, Clone)]
pub struct PathMapper {
    name: String,
    declarations: Arc<[MappingDeclaration]>,
}

impl PathMapper {
    pub(crate) fn new(name: String, declarations: Vec<MappingDeclaration>) -> Self {
        Self {
            name,
            declarations: declarations.into(),
        }
    }

    /// Schema name this mapper was built for
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn declarations(&self) -> &[MappingDeclaration] {
        &self.declarations
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Convert an external (provider) value to the canonical shape
    pub fn to_internal(&self, external: &Value) -> Result<Value> {
        self.run(external, Direction::ToInternal, None)
    }

    /// Convert a canonical value to the external (provider) shape
    pub fn to_external(&self, internal: &Value) -> Result<Value> {
        self.run(internal, Direction::ToExternal, None)
    }

    /// Render a canonical value in the provider's shape
    ///
    /// Same as [`PathMapper::to_external`].
    pub fn map(&self, internal: &Value) -> Result<Value> {
        self.to_external(internal)
    }

    /// [`PathMapper::to_internal`] plus per-declaration diagnostics
    pub fn to_internal_with_report(&self, external: &Value) -> Result<(Value, MappingReport)> {
        let mut report = MappingReport::new(&self.name, Direction::ToInternal);
        let value = self.run(external, Direction::ToInternal, Some(&mut report))?;
        Ok((value, report))
    }

    /// [`PathMapper::to_external`] plus per-declaration diagnostics
    pub fn to_external_with_report(&self, internal: &Value) -> Result<(Value, MappingReport)> {
        let mut report = MappingReport::new(&self.name, Direction::ToExternal);
        let value = self.run(internal, Direction::ToExternal, Some(&mut report))?;
        Ok((value, report))
    }

    fn run(
        &self,
        source: &Value,
        direction: Direction,
        mut report: Option<&mut MappingReport>,
    ) -> Result<Value> {
        let mut target = Value::Object(Map::new());

        for (index, declaration) in self.declarations.iter().enumerate() {
            let (outcome, mismatch_step) = self.apply(declaration, source, &mut target, direction)?;

            if let Some(report) = report.as_deref_mut() {
                let (source_path, target_path) = declaration.paths(direction);
                report.push(MappingRecord {
                    index,
                    source_path: source_path.to_string(),
                    target_path: target_path.to_string(),
                    outcome,
                    mismatch_step,
                });
            }
        }

        Ok(target)
    }

    fn apply(
        &self,
        declaration: &MappingDeclaration,
        source: &Value,
        target: &mut Value,
        direction: Direction,
    ) -> Result<(MappingOutcome, Option<usize>)> {
        let (source_path, target_path) = declaration.paths(direction);

        let Some(value) = path::get(source, source_path) else {
            debug!(
                mapper = %self.name,
                %direction,
                source = %source_path,
                "Source path absent, skipping declaration"
            );
            return Ok((MappingOutcome::SkippedAbsent, None));
        };

        let value = match declaration.transform_for(direction) {
            Some(transform) => {
                let produced = transform.apply(value, target).map_err(|source| Error::Transform {
                    mapper: self.name.clone(),
                    direction,
                    external_path: declaration.external_path.to_string(),
                    internal_path: declaration.internal_path.to_string(),
                    source,
                })?;
                match produced {
                    Some(value) => value,
                    None => {
                        trace!(mapper = %self.name, target = %target_path, "Transform produced no value");
                        return Ok((MappingOutcome::SkippedByTransform, None));
                    }
                }
            }
            None => value.clone(),
        };

        match path::set(target, target_path, value) {
            SetOutcome::Written => {
                trace!(
                    mapper = %self.name,
                    source = %source_path,
                    target = %target_path,
                    "Applied declaration"
                );
                Ok((MappingOutcome::Applied, None))
            }
            SetOutcome::TypeMismatch { step } => {
                debug!(
                    mapper = %self.name,
                    %direction,
                    target = %target_path,
                    step,
                    "Target path blocked by value of another kind, skipping declaration"
                );
                Ok((MappingOutcome::SkippedTypeMismatch, Some(step)))
            }
            SetOutcome::IndexOutOfRange { step } => {
                debug!(
                    mapper = %self.name,
                    %direction,
                    target = %target_path,
                    step,
                    "Target index too far past the end of its array, skipping declaration"
                );
                Ok((MappingOutcome::SkippedTypeMismatch, Some(step)))
            }
        }
    }
}
