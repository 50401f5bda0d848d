// Copyright 2025 Apache Doris Community
// Licensed under the Apache License, Version 2.0

//! Row mapping strategies

use dao_common::utils::normalize_name;
use dao_common::{DaoError, DataType, Result, Value};
use dao_meta::StructSchema;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::result::{ColumnInfo, Row};

/// Converts one raw row into an element value
pub trait RowMapper: Send + Sync {
    fn map_row(&self, columns: &[ColumnInfo], row: Row) -> Result<Value>;
}

/// Maps a one-column row to a single value of the element type
#[derive(Debug, Clone)]
pub struct SingleColumnRowMapper {
    required_type: DataType,
}

impl SingleColumnRowMapper {
    pub fn new(required_type: DataType) -> Self {
        Self { required_type }
    }
}

impl RowMapper for SingleColumnRowMapper {
    fn map_row(&self, columns: &[ColumnInfo], row: Row) -> Result<Value> {
        if columns.len() != 1 {
            return Err(DaoError::IncorrectColumnCount {
                expected: 1,
                actual: columns.len(),
            });
        }
        let value = row.values.into_iter().next().unwrap_or(Value::Null);
        value.coerce(&self.required_type)
    }
}

/// Maps columns onto the fields of a registered struct by name.
///
/// Names are compared after lowercasing and dropping underscores, so the
/// column `user_name` fills the field `userName`. Columns without a field are
/// ignored; fields without a column stay null.
#[derive(Debug, Clone)]
pub struct StructRowMapper {
    schema: Arc<StructSchema>,
    /// normalized name -> field index
    field_index: HashMap<String, usize>,
}

impl StructRowMapper {
    pub fn new(schema: Arc<StructSchema>) -> Self {
        let field_index = schema
            .fields
            .iter()
            .enumerate()
            .map(|(idx, field)| (normalize_name(&field.name), idx))
            .collect();
        Self { schema, field_index }
    }

    pub fn schema(&self) -> &StructSchema {
        &self.schema
    }
}

impl RowMapper for StructRowMapper {
    fn map_row(&self, columns: &[ColumnInfo], row: Row) -> Result<Value> {
        let mut fields: BTreeMap<String, Value> = self
            .schema
            .fields
            .iter()
            .map(|field| (field.name.clone(), Value::Null))
            .collect();

        for (column, value) in columns.iter().zip(row.values) {
            let Some(&idx) = self.field_index.get(&normalize_name(&column.name)) else {
                continue;
            };
            let field = &self.schema.fields[idx];
            let value = if field.data_type.is_single_column() {
                value.coerce(&field.data_type).map_err(|e| {
                    DaoError::TypeMismatch(format!("column {} -> {}.{}: {}", column.name, self.schema.name, field.name, e))
                })?
            } else {
                value
            };
            fields.insert(field.name.clone(), value);
        }

        Ok(Value::Struct(fields))
    }
}
