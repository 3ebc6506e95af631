//! Named mapper lookup
//!
//! Copyright (c) 2025 LLM Mapper Team
//! Licensed under the Apache-2.0 license

use super::mapper::PathMapper;
use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Mappers keyed by their schema name
#[derive(Debug, Clone, Default)]
pub struct MapperRegistry {
    mappers: BTreeMap<String, Arc<PathMapper>>,
}

impl MapperRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `mapper` under its own name, replacing any previous entry
    pub fn register(&mut self, mapper: PathMapper) -> Arc<PathMapper> {
        let mapper = Arc::new(mapper);
        self.mappers.insert(mapper.name().to_string(), Arc::clone(&mapper));
        mapper
    }

    pub fn get(&self, name: &str) -> Result<Arc<PathMapper>> {
        self.mappers
            .get(name)
            .cloned()
            .ok_or_else(|| Error::UnknownMapper { name: name.to_string() })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.mappers.contains_key(name)
    }

    /// Registered names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.mappers.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<PathMapper>> {
        self.mappers.values()
    }

    pub fn len(&self) -> usize {
        self.mappers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::MapperBuilder;

    #[test]
    fn test_unknown_mapper_is_an_error() {
        let registry = MapperRegistry::new();
        assert!(matches!(registry.get("nope"), Err(Error::UnknownMapper { .. })));
    }

    #[test]
    fn test_register_replaces_same_name() {
        let mut registry = MapperRegistry::new();
        registry.register(MapperBuilder::new("m").map("a", "a").build());
        registry.register(MapperBuilder::new("m").map("a", "a").map("b", "b").build());
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("m").unwrap().len(), 2);
    }

    #[test]
    fn test_names_are_sorted() {
        let mut registry = MapperRegistry::new();
        registry.register(MapperBuilder::new("zeta").build());
        registry.register(MapperBuilder::new("alpha").build());
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["alpha", "zeta"]);
        assert!(registry.contains("zeta"));
    }
}
