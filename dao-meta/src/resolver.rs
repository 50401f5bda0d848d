// Copyright 2025 Apache Doris Community
// Licensed under the Apache License, Version 2.0

//! Property path resolution
//!
//! Answers "what type is reachable from a declared type by following a dotted
//! path of field accesses". Struct layouts come from the `TypeRegistry`, so
//! resolution is a metadata lookup rather than runtime introspection.

use dao_common::constants::PROPERTY_PATH_SEPARATOR;
use dao_common::{DaoError, DataType, Result};
use std::sync::Arc;

use crate::registry::TypeRegistry;

/// Resolve the type reached by following `path` from `declared`.
///
/// Implementations must be pure: the same inputs always give the same output.
pub trait PropertyPathResolver: Send + Sync {
    fn resolve(&self, declared: &DataType, path: &str) -> Result<DataType>;
}

/// Resolver backed by registered struct schemas
#[derive(Debug, Clone)]
pub struct SchemaPathResolver {
    registry: Arc<TypeRegistry>,
}

impl SchemaPathResolver {
    pub fn new(registry: Arc<TypeRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<TypeRegistry> {
        &self.registry
    }
}

impl PropertyPathResolver for SchemaPathResolver {
    fn resolve(&self, declared: &DataType, path: &str) -> Result<DataType> {
        let mut current = declared.clone();
        for segment in path.split(PROPERTY_PATH_SEPARATOR) {
            if segment.is_empty() {
                return Err(DaoError::PropertyPath(format!("empty segment in path {}", path)));
            }
            let struct_name = current.struct_name().ok_or_else(|| {
                DaoError::PropertyPath(format!(
                    "property {} of path {} cannot be read from type {}",
                    segment, path, current
                ))
            })?;
            let schema = self.registry.get(struct_name)?;
            let field = schema.field(segment).ok_or_else(|| {
                DaoError::PropertyPath(format!(
                    "property {} of path {} not found in {}",
                    segment, path, schema.name
                ))
            })?;
            current = field.data_type.clone();
        }
        Ok(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::StructSchema;

    fn resolver() -> SchemaPathResolver {
        let registry = Arc::new(TypeRegistry::new());
        registry.register(
            StructSchema::new("UserQuery")
                .with_field("ids", DataType::list(DataType::BigInt))
                .with_field("owner", DataType::structure("Owner")),
        );
        registry.register(StructSchema::new("Owner").with_field("name", DataType::String));
        SchemaPathResolver::new(registry)
    }

    #[test]
    fn test_resolve_nested() {
        let resolver = resolver();
        let declared = DataType::structure("UserQuery");

        assert_eq!(
            resolver.resolve(&declared, "ids").unwrap(),
            DataType::list(DataType::BigInt)
        );
        assert_eq!(resolver.resolve(&declared, "owner.name").unwrap(), DataType::String);
    }

    #[test]
    fn test_resolve_errors() {
        let resolver = resolver();
        let declared = DataType::structure("UserQuery");

        assert!(matches!(resolver.resolve(&declared, "age"), Err(DaoError::PropertyPath(_))));
        assert!(matches!(resolver.resolve(&declared, "owner..name"), Err(DaoError::PropertyPath(_))));
        assert!(matches!(resolver.resolve(&declared, "ids.len"), Err(DaoError::PropertyPath(_))));
        assert!(matches!(resolver.resolve(&DataType::Int, "x"), Err(DaoError::PropertyPath(_))));
        assert!(matches!(
            resolver.resolve(&DataType::structure("Missing"), "x"),
            Err(DaoError::TypeNotFound(_))
        ));
    }
}
