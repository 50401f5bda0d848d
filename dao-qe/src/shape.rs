// Copyright 2025 Apache Doris Community
// Licensed under the Apache License, Version 2.0

//! Result shape inspection
//!
//! Runs once per statement at registration. Decides the container shape and
//! element type from the declared return type, picks the row mapper, and
//! rejects scalar contracts for templates with multi-value expansion.

use dao_common::{DaoError, DataType, Result};
use dao_meta::TypeRegistry;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::mapper::{RowMapper, SingleColumnRowMapper, StructRowMapper};
use crate::template::Placeholder;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResultShape {
    Scalar,
    List,
    Set,
    Array,
}

impl fmt::Display for ResultShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultShape::Scalar => write!(f, "scalar"),
            ResultShape::List => write!(f, "list"),
            ResultShape::Set => write!(f, "set"),
            ResultShape::Array => write!(f, "array"),
        }
    }
}

/// Shape, element type and row mapper fixed for a statement
#[derive(Clone)]
pub struct ReturnContract {
    pub shape: ResultShape,
    pub element_type: DataType,
    pub row_mapper: Arc<dyn RowMapper>,
}

impl fmt::Debug for ReturnContract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReturnContract")
            .field("shape", &self.shape)
            .field("element_type", &self.element_type)
            .finish_non_exhaustive()
    }
}

pub struct ResultShapeInspector<'a> {
    registry: &'a TypeRegistry,
}

impl<'a> ResultShapeInspector<'a> {
    pub fn new(registry: &'a TypeRegistry) -> Self {
        Self { registry }
    }

    pub fn inspect(&self, return_type: &DataType, iterable_parameters: &[Placeholder]) -> Result<ReturnContract> {
        let (shape, element_type) = match return_type {
            DataType::List(e) => (ResultShape::List, e.as_ref().clone()),
            DataType::Set(e) => (ResultShape::Set, e.as_ref().clone()),
            DataType::Array(e) => (ResultShape::Array, e.as_ref().clone()),
            other => (ResultShape::Scalar, other.clone()),
        };

        if shape == ResultShape::Scalar && !iterable_parameters.is_empty() {
            let names: Vec<String> = iterable_parameters.iter().map(|p| p.to_string()).collect();
            return Err(DaoError::IncompatibleReturnShape(format!(
                "statement expands {} into an IN clause, so the return type must be a list, set or array, but was {}",
                names.join(", "),
                return_type
            )));
        }

        let row_mapper: Arc<dyn RowMapper> = match &element_type {
            DataType::Struct(name) => Arc::new(StructRowMapper::new(self.registry.get(name)?)),
            t if t.is_single_column() => Arc::new(SingleColumnRowMapper::new(t.clone())),
            t => {
                return Err(DaoError::UnsupportedReturnType(format!(
                    "element type {} of {} cannot be mapped from a row",
                    t, return_type
                )))
            }
        };

        Ok(ReturnContract {
            shape,
            element_type,
            row_mapper,
        })
    }
}
