//! Reading and writing JSON values by compiled path
//!
//! `get` is a pure walk that yields `None` as soon as the path leaves the
//! document. `set` auto-creates missing intermediate containers, choosing an
//! array or an object from the kind of the step that will be applied to the
//! new container next.
//!
//! Copyright (c) 2025 LLM Mapper Team
//! Licensed under the Apache-2.0 license

use super::ast::{Index, Path, Step};
use serde_json::{Map, Value};

/// Most nulls `set` will pad an array with to reach a position
pub const MAX_ARRAY_PADDING: usize = 1024;

/// Result of a [`set`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOutcome {
    /// The value was stored
    Written,
    /// An existing value of the wrong kind blocked the walk at this step
    TypeMismatch { step: usize },
    /// The index at this step lies too far past the end of its array
    IndexOutOfRange { step: usize },
}

impl SetOutcome {
    pub fn is_written(&self) -> bool {
        matches!(self, SetOutcome::Written)
    }
}

/// Why a step could not be taken
enum Blocked {
    Kind,
    Range,
}

impl Blocked {
    fn at(self, step: usize) -> SetOutcome {
        match self {
            Blocked::Kind => SetOutcome::TypeMismatch { step },
            Blocked::Range => SetOutcome::IndexOutOfRange { step },
        }
    }
}

/// Resolve `path` against `root`
///
/// Whole-array markers keep the current value, so `items[]` resolves to the
/// `items` array itself.
pub fn get<'a>(root: &'a Value, path: &Path) -> Option<&'a Value> {
    let mut current = root;
    for step in path.steps() {
        current = match step {
            Step::Property(name) => current.as_object()?.get(name)?,
            Step::Index(Index::Position(position)) => match current {
                Value::Array(items) => items.get(*position)?,
                Value::Object(map) => map.get(&position.to_string())?,
                _ => return None,
            },
            Step::Index(Index::Key(key)) => current.as_object()?.get(key)?,
            Step::WholeArray => current,
        };
    }
    Some(current)
}

/// Write `value` at `path` inside `root`, creating containers on the way
///
/// An empty path replaces `root`. A trailing whole-array marker replaces the
/// array in place and only accepts array values. Array positions more than
/// [`MAX_ARRAY_PADDING`] past the current end are refused.
pub fn set(root: &mut Value, path: &Path, value: Value) -> SetOutcome {
    let steps = path.steps();
    let Some((last, init)) = steps.split_last() else {
        *root = value;
        return SetOutcome::Written;
    };

    let mut current = root;
    for (i, step) in init.iter().enumerate() {
        let next = &steps[i + 1];
        current = match descend(current, step, next) {
            Ok(child) => child,
            Err(blocked) => return blocked.at(i),
        };
    }

    match assign(current, last, value) {
        Ok(()) => SetOutcome::Written,
        Err(blocked) => blocked.at(steps.len() - 1),
    }
}

/// Step into `current`, creating the child if it is missing or null
fn descend<'a>(current: &'a mut Value, step: &Step, next: &Step) -> Result<&'a mut Value, Blocked> {
    let slot = match step {
        Step::Property(name) => object_slot(current, name)?,
        Step::Index(Index::Position(position)) => match current {
            Value::Array(items) => array_slot(items, *position)?,
            Value::Object(map) => map.entry(position.to_string()).or_insert(Value::Null),
            _ => return Err(Blocked::Kind),
        },
        Step::Index(Index::Key(key)) => object_slot(current, key)?,
        Step::WholeArray => {
            if current.is_null() {
                *current = Value::Array(Vec::new());
            }
            return if current.is_array() {
                Ok(current)
            } else {
                Err(Blocked::Kind)
            };
        }
    };

    if slot.is_null() {
        *slot = empty_container_for(next);
    }
    Ok(slot)
}

fn assign(current: &mut Value, step: &Step, value: Value) -> Result<(), Blocked> {
    match step {
        Step::Property(name) | Step::Index(Index::Key(name)) => {
            *object_slot(current, name)? = value;
        }
        Step::Index(Index::Position(position)) => match current {
            Value::Array(items) => *array_slot(items, *position)? = value,
            Value::Object(map) => {
                map.insert(position.to_string(), value);
            }
            _ => return Err(Blocked::Kind),
        },
        Step::WholeArray => {
            let replaceable = current.is_array() || current.is_null();
            if !(replaceable && value.is_array()) {
                return Err(Blocked::Kind);
            }
            *current = value;
        }
    }
    Ok(())
}

fn object_slot<'a>(current: &'a mut Value, name: &str) -> Result<&'a mut Value, Blocked> {
    let map = current.as_object_mut().ok_or(Blocked::Kind)?;
    Ok(map.entry(name.to_string()).or_insert(Value::Null))
}

/// Slot at `position`, padding the array with nulls when it is too short
fn array_slot(items: &mut Vec<Value>, position: usize) -> Result<&mut Value, Blocked> {
    if position >= items.len() {
        if position - items.len() >= MAX_ARRAY_PADDING {
            return Err(Blocked::Range);
        }
        let len = position.checked_add(1).ok_or(Blocked::Range)?;
        items.resize(len, Value::Null);
    }
    items.get_mut(position).ok_or(Blocked::Range)
}

fn empty_container_for(next: &Step) -> Value {
    if next.wants_array() {
        Value::Array(Vec::new())
    } else {
        Value::Object(Map::new())
    }
}
