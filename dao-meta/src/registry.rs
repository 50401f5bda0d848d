// Copyright 2025 Apache Doris Community
// Licensed under the Apache License, Version 2.0

//! Struct schema registry

use dao_common::{DaoError, DataType, Result};
use dashmap::DashMap;
use std::sync::Arc;

/// A named field of a struct
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    pub name: String,
    pub data_type: DataType,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// Declared layout of a struct type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructSchema {
    pub name: String,
    pub fields: Vec<FieldDef>,
}

impl StructSchema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Add a field
    pub fn with_field(mut self, name: impl Into<String>, data_type: DataType) -> Self {
        self.fields.push(FieldDef::new(name, data_type));
        self
    }

    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Registry of struct schemas (struct name -> schema)
#[derive(Debug, Default)]
pub struct TypeRegistry {
    structs: DashMap<String, Arc<StructSchema>>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a struct schema, replacing any previous one with the same name
    pub fn register(&self, schema: StructSchema) -> Arc<StructSchema> {
        let schema = Arc::new(schema);
        tracing::debug!(name = %schema.name, fields = schema.fields.len(), "struct schema registered");
        self.structs.insert(schema.name.clone(), Arc::clone(&schema));
        schema
    }

    /// Get a struct schema by name
    pub fn get(&self, name: &str) -> Result<Arc<StructSchema>> {
        self.structs
            .get(name)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| DaoError::TypeNotFound(format!("struct {} is not registered", name)))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.structs.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.structs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.structs.is_empty()
    }
}
