// Copyright 2025 Apache Doris Community
// Licensed under the Apache License, Version 2.0

//! Parameter descriptors and the per-statement property type cache

use dao_common::{DaoError, DataType, Result};
use dashmap::DashMap;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

use crate::resolver::PropertyPathResolver;

/// A declared statement parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDescriptor {
    /// Zero-based position in the statement signature
    pub position: usize,

    /// Parameter name (unique within the statement)
    pub name: String,

    /// Declared type
    pub data_type: DataType,
}

impl ParameterDescriptor {
    pub fn new(position: usize, name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            position,
            name: name.into(),
            data_type,
        }
    }
}

/// Parameters of one statement plus a lazily filled cache of resolved
/// property types.
///
/// Registration goes through `&mut self`, so it must finish before the
/// context is shared. Lookups take `&self` and may race freely: cached types
/// are pure functions of the declarations, so concurrent misses on the same
/// key may recompute but always store the same value.
pub struct ParameterDescriptorContext {
    resolver: Arc<dyn PropertyPathResolver>,
    parameter_descriptors: Vec<ParameterDescriptor>,
    parameter_index: HashMap<String, usize>,
    /// "name" or "name.path" -> resolved type
    cache: DashMap<String, DataType>,
}

impl ParameterDescriptorContext {
    pub fn new(resolver: Arc<dyn PropertyPathResolver>) -> Self {
        Self {
            resolver,
            parameter_descriptors: Vec::new(),
            parameter_index: HashMap::new(),
            cache: DashMap::new(),
        }
    }

    /// Register a parameter
    pub fn add_parameter_descriptor(&mut self, name: impl Into<String>, descriptor: ParameterDescriptor) -> Result<()> {
        let name = name.into();
        if self.parameter_index.contains_key(&name) {
            return Err(DaoError::DuplicateParameter(name));
        }
        self.parameter_index.insert(name, self.parameter_descriptors.len());
        self.parameter_descriptors.push(descriptor);
        Ok(())
    }

    /// Type reachable from parameter `parameter_name` through `property_path`.
    /// An empty path asks for the parameter's own type.
    pub fn get_property_type(&self, parameter_name: &str, property_path: &str) -> Result<DataType> {
        let key = Self::cache_key(parameter_name, property_path);
        if let Some(cached) = self.cache.get(&key) {
            trace!(key = %key, "property type cache hit");
            return Ok(cached.value().clone());
        }

        let descriptor = self.get_parameter_descriptor(parameter_name).ok_or_else(|| {
            DaoError::ParameterNotFound(parameter_name.to_string())
        })?;
        let resolved = if property_path.is_empty() {
            descriptor.data_type.clone()
        } else {
            self.resolver.resolve(&descriptor.data_type, property_path)?
        };

        // First insert wins; a losing writer computed the same value anyway
        let stored = self.cache.entry(key).or_insert(resolved);
        Ok(stored.value().clone())
    }

    pub fn get_parameter_descriptor(&self, name: &str) -> Option<&ParameterDescriptor> {
        self.parameter_index
            .get(name)
            .map(|&idx| &self.parameter_descriptors[idx])
    }

    /// Descriptors in declaration order
    pub fn parameter_descriptors(&self) -> &[ParameterDescriptor] {
        &self.parameter_descriptors
    }

    /// Number of resolved entries currently cached
    pub fn cached_entries(&self) -> usize {
        self.cache.len()
    }

    fn cache_key(parameter_name: &str, property_path: &str) -> String {
        if property_path.is_empty() {
            parameter_name.to_string()
        } else {
            format!("{}.{}", parameter_name, property_path)
        }
    }
}

impl fmt::Debug for ParameterDescriptorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParameterDescriptorContext")
            .field("parameter_descriptors", &self.parameter_descriptors)
            .field("cached_entries", &self.cache.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{StructSchema, TypeRegistry};
    use crate::resolver::SchemaPathResolver;

    fn context() -> ParameterDescriptorContext {
        let registry = Arc::new(TypeRegistry::new());
        registry.register(StructSchema::new("UserQuery").with_field("ids", DataType::list(DataType::BigInt)));
        let mut ctx = ParameterDescriptorContext::new(Arc::new(SchemaPathResolver::new(registry)));
        ctx.add_parameter_descriptor("q", ParameterDescriptor::new(0, "q", DataType::structure("UserQuery")))
            .unwrap();
        ctx.add_parameter_descriptor("limit", ParameterDescriptor::new(1, "limit", DataType::Int))
            .unwrap();
        ctx
    }

    #[test]
    fn test_own_type_and_path() {
        let ctx = context();
        assert_eq!(ctx.get_property_type("limit", "").unwrap(), DataType::Int);
        assert_eq!(
            ctx.get_property_type("q", "ids").unwrap(),
            DataType::list(DataType::BigInt)
        );
        assert_eq!(ctx.cached_entries(), 2);
    }

    #[test]
    fn test_duplicate_parameter() {
        let mut ctx = context();
        let result = ctx.add_parameter_descriptor("q", ParameterDescriptor::new(2, "q", DataType::Int));
        assert!(matches!(result, Err(DaoError::DuplicateParameter(_))));
        assert_eq!(ctx.parameter_descriptors().len(), 2);
    }

    #[test]
    fn test_failed_lookup_not_cached() {
        let ctx = context();
        assert!(ctx.get_property_type("q", "name").is_err());
        assert!(ctx.get_property_type("nobody", "").is_err());
        assert_eq!(ctx.cached_entries(), 0);
    }
}
