//! Mapping declarations and the transform functions they carry
//!
//! Copyright (c) 2025 LLM Mapper Team
//! Licensed under the Apache-2.0 license

use super::path::Path;
use crate::error::{Direction, TransformError};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Signature of a transform function
///
/// The first argument is the value read at the source path, the second the
/// target object built so far by earlier declarations. `Ok(None)` leaves the
/// target path untouched.
pub type TransformFn =
    dyn Fn(&Value, &Value) -> std::result::Result<Option<Value>, TransformError> + Send + Sync;

/// A shareable transform function
#[derive(Clone)]
pub struct Transform(Arc<TransformFn>);

impl Transform {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Value, &Value) -> std::result::Result<Option<Value>, TransformError> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn apply(
        &self,
        value: &Value,
        target: &Value,
    ) -> std::result::Result<Option<Value>, TransformError> {
        (self.0)(value, target)
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Transform(..)")
    }
}

/// Forward and backward functions of a transform-bearing declaration
#[derive(Debug, Clone)]
pub struct TransformPair {
    pub to_internal: Transform,
    pub to_external: Transform,
}

/// One path-to-path correspondence
#[derive(Debug, Clone)]
pub struct MappingDeclaration {
    pub external_path: Path,
    pub internal_path: Path,
    pub transform: Option<TransformPair>,
    pub description: Option<String>,
}

impl MappingDeclaration {
    /// Identity declaration
    pub fn identity(external_path: Path, internal_path: Path) -> Self {
        Self {
            external_path,
            internal_path,
            transform: None,
            description: None,
        }
    }

    /// `(source, target)` paths for a run in `direction`
    pub fn paths(&self, direction: Direction) -> (&Path, &Path) {
        match direction {
            Direction::ToInternal => (&self.external_path, &self.internal_path),
            Direction::ToExternal => (&self.internal_path, &self.external_path),
        }
    }

    /// Transform function for `direction`, if the declaration carries one
    pub fn transform_for(&self, direction: Direction) -> Option<&Transform> {
        self.transform.as_ref().map(|pair| match direction {
            Direction::ToInternal => &pair.to_internal,
            Direction::ToExternal => &pair.to_external,
        })
    }

    pub fn is_identity(&self) -> bool {
        self.transform.is_none()
    }
}

impl fmt::Display for MappingDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arrow = if self.is_identity() { "<->" } else { "<~>" };
        write!(f, "{} {} {}", self.external_path, arrow, self.internal_path)?;
        if let Some(description) = &self.description {
            write!(f, " ({})", description)?;
        }
        Ok(())
    }
}
