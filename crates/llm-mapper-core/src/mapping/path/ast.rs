//! Parsed representation of mapping paths
//!
//! A path such as `messages[0].content` is compiled once into a sequence of
//! [`Step`]s. Index strings are classified at parse time so accessors never
//! re-inspect the text.
//!
//! Copyright (c) 2025 LLM Mapper Team
//! Licensed under the Apache-2.0 license

use std::fmt;
use std::str::FromStr;

/// One step of a path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Step {
    /// Named field access (`.name`)
    Property(String),
    /// Bracketed access (`[0]` or `[key]`)
    Index(Index),
    /// Empty brackets (`[]`): the container itself rather than an element
    WholeArray,
}

/// Bracket contents, classified at parse time
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Index {
    /// Non-negative integer position
    Position(usize),
    /// Any other key; only resolves against objects
    Key(String),
}

impl Index {
    /// Classify raw bracket contents
    pub fn classify(raw: &str) -> Self {
        match raw.parse::<usize>() {
            Ok(position) => Index::Position(position),
            Err(_) => Index::Key(raw.to_string()),
        }
    }
}

impl Step {
    /// Whether a container created for this step should be an array
    pub fn wants_array(&self) -> bool {
        matches!(self, Step::Index(Index::Position(_)) | Step::WholeArray)
    }
}

/// A compiled path
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Path {
    steps: Vec<Step>,
}

impl Path {
    /// Create a path from already-built steps
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    /// Parse a path string; never fails
    pub fn parse(input: &str) -> Self {
        super::parser::parse(input)
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Whether any step is a whole-array marker
    pub fn has_whole_array(&self) -> bool {
        self.steps.iter().any(|step| matches!(step, Step::WholeArray))
    }
}

impl FromStr for Path {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Path::parse(s))
    }
}

impl From<&str> for Path {
    fn from(s: &str) -> Self {
        Path::parse(s)
    }
}

impl From<Vec<Step>> for Path {
    fn from(steps: Vec<Step>) -> Self {
        Path::new(steps)
    }
}

impl fmt::Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Index::Position(position) => write!(f, "{}", position),
            Index::Key(key) => write!(f, "{}", key),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Property(name) => write!(f, "{}", name),
            Step::Index(index) => write!(f, "[{}]", index),
            Step::WholeArray => write!(f, "[]"),
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 && matches!(step, Step::Property(_)) {
                write!(f, ".")?;
            }
            write!(f, "{}", step)?;
        }
        Ok(())
    }
}
