// Copyright 2025 Apache Doris Community
// Licensed under the Apache License, Version 2.0

//! Static data types declared by statement parameters and return contracts

use serde::{Deserialize, Serialize};
use std::fmt;

/// Data type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    Boolean,
    Int,
    BigInt,
    Double,
    String,
    Binary,
    DateTime,
    List(Box<DataType>),
    Set(Box<DataType>),
    Array(Box<DataType>),
    /// Reference to a struct registered in the type registry
    Struct(String),
}

impl DataType {
    pub fn list(element: DataType) -> Self {
        DataType::List(Box::new(element))
    }

    pub fn set(element: DataType) -> Self {
        DataType::Set(Box::new(element))
    }

    pub fn array(element: DataType) -> Self {
        DataType::Array(Box::new(element))
    }

    pub fn structure(name: impl Into<String>) -> Self {
        DataType::Struct(name.into())
    }

    /// True for types that map to exactly one column
    pub fn is_single_column(&self) -> bool {
        !self.is_iterable() && !matches!(self, DataType::Struct(_))
    }

    pub fn is_iterable(&self) -> bool {
        matches!(self, DataType::List(_) | DataType::Set(_) | DataType::Array(_))
    }

    pub fn element_type(&self) -> Option<&DataType> {
        match self {
            DataType::List(e) | DataType::Set(e) | DataType::Array(e) => Some(e),
            _ => None,
        }
    }

    pub fn struct_name(&self) -> Option<&str> {
        match self {
            DataType::Struct(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Boolean => write!(f, "boolean"),
            DataType::Int => write!(f, "int"),
            DataType::BigInt => write!(f, "bigint"),
            DataType::Double => write!(f, "double"),
            DataType::String => write!(f, "string"),
            DataType::Binary => write!(f, "binary"),
            DataType::DateTime => write!(f, "datetime"),
            DataType::List(e) => write!(f, "List<{}>", e),
            DataType::Set(e) => write!(f, "Set<{}>", e),
            DataType::Array(e) => write!(f, "{}[]", e),
            DataType::Struct(name) => write!(f, "{}", name),
        }
    }
}
