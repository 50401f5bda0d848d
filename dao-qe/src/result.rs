// Copyright 2025 Apache Doris Community
// Licensed under the Apache License, Version 2.0

//! Raw result sets and shaped query output

use dao_common::Value;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::shape::ResultShape;

/// Result set returned by a data source
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RowSet {
    pub columns: Vec<ColumnInfo>,
    pub rows: Vec<Row>,
}

impl RowSet {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(ColumnInfo::new).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row
    pub fn with_row(mut self, values: Vec<Value>) -> Self {
        self.rows.push(Row { values });
        self
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Column metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub name: String,
}

impl ColumnInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Row of data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub values: Vec<Value>,
}

/// Mapped result of a query, shaped by the statement's return contract
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutput {
    Scalar(Value),
    List(Vec<Value>),
    Set(HashSet<Value>),
    Array(Box<[Value]>),
}

impl QueryOutput {
    pub fn shape(&self) -> ResultShape {
        match self {
            QueryOutput::Scalar(_) => ResultShape::Scalar,
            QueryOutput::List(_) => ResultShape::List,
            QueryOutput::Set(_) => ResultShape::Set,
            QueryOutput::Array(_) => ResultShape::Array,
        }
    }

    /// Number of mapped values (a scalar counts as one, even when null)
    pub fn len(&self) -> usize {
        match self {
            QueryOutput::Scalar(_) => 1,
            QueryOutput::List(values) => values.len(),
            QueryOutput::Set(values) => values.len(),
            QueryOutput::Array(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_scalar(self) -> Option<Value> {
        match self {
            QueryOutput::Scalar(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_list(self) -> Option<Vec<Value>> {
        match self {
            QueryOutput::List(values) => Some(values),
            _ => None,
        }
    }

    pub fn into_set(self) -> Option<HashSet<Value>> {
        match self {
            QueryOutput::Set(values) => Some(values),
            _ => None,
        }
    }

    pub fn into_array(self) -> Option<Box<[Value]>> {
        match self {
            QueryOutput::Array(values) => Some(values),
            _ => None,
        }
    }
}
