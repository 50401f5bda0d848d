// Copyright 2025 Apache Doris Community
// Licensed under the Apache License, Version 2.0

//! Runtime values bound to statements and produced by row mapping

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

use crate::constants::PROPERTY_PATH_SEPARATOR;
use crate::error::{DaoError, Result};
use crate::types::DataType;

static NULL: Value = Value::Null;

/// Cell value
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Value {
    Null,
    Boolean(bool),
    Int(i32),
    BigInt(i64),
    Double(f64),
    String(String),
    Binary(Vec<u8>),
    DateTime(String),
    List(Vec<Value>),
    Struct(BTreeMap<String, Value>),
}

impl Value {
    /// Build a struct value from (field, value) pairs
    pub fn structure<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Value::Struct(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        match self {
            Value::Struct(fields) => fields.get(name),
            _ => None,
        }
    }

    /// Follow a dotted property path through nested struct values.
    ///
    /// A null intermediate yields `Null`; a missing field or a non-struct
    /// intermediate is an error.
    pub fn property(&self, path: &str) -> Result<&Value> {
        if path.is_empty() {
            return Ok(self);
        }
        let mut current = self;
        for segment in path.split(PROPERTY_PATH_SEPARATOR) {
            current = match current {
                Value::Null => return Ok(&NULL),
                Value::Struct(fields) => fields.get(segment).ok_or_else(|| {
                    DaoError::PropertyPath(format!("property {} not found in value at path {}", segment, path))
                })?,
                other => {
                    return Err(DaoError::PropertyPath(format!(
                        "cannot read property {} of {} at path {}",
                        segment,
                        other.kind(),
                        path
                    )))
                }
            };
        }
        Ok(current)
    }

    /// Short name of the variant, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Int(_) => "int",
            Value::BigInt(_) => "bigint",
            Value::Double(_) => "double",
            Value::String(_) => "string",
            Value::Binary(_) => "binary",
            Value::DateTime(_) => "datetime",
            Value::List(_) => "list",
            Value::Struct(_) => "struct",
        }
    }

    /// Convert to the given single-column type without losing information
    pub fn coerce(self, target: &DataType) -> Result<Value> {
        let value = match (self, target) {
            (Value::Null, _) => Value::Null,
            (v @ Value::Boolean(_), DataType::Boolean) => v,
            (v @ Value::Int(_), DataType::Int) => v,
            (Value::Int(i), DataType::BigInt) => Value::BigInt(i as i64),
            (Value::Int(i), DataType::Double) => Value::Double(i as f64),
            (v @ Value::BigInt(_), DataType::BigInt) => v,
            (Value::BigInt(i), DataType::Int) => i32::try_from(i)
                .map(Value::Int)
                .map_err(|_| DaoError::TypeMismatch(format!("bigint {} out of int range", i)))?,
            (Value::BigInt(i), DataType::Double) => Value::Double(i as f64),
            (v @ Value::Double(_), DataType::Double) => v,
            (v @ Value::String(_), DataType::String) => v,
            (Value::DateTime(s), DataType::String) => Value::String(s),
            (v @ Value::DateTime(_), DataType::DateTime) => v,
            (Value::String(s), DataType::DateTime) => Value::DateTime(s),
            (v @ Value::Binary(_), DataType::Binary) => v,
            (v, target) => {
                return Err(DaoError::TypeMismatch(format!(
                    "cannot convert {} to {}",
                    v.kind(),
                    target
                )))
            }
        };
        Ok(value)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::BigInt(a), Value::BigInt(b)) => a == b,
            (Value::Double(a), Value::Double(b)) => a.to_bits() == b.to_bits(),
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Binary(a), Value::Binary(b)) => a == b,
            (Value::DateTime(a), Value::DateTime(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Struct(a), Value::Struct(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Null => {}
            Value::Boolean(b) => b.hash(state),
            Value::Int(i) => i.hash(state),
            Value::BigInt(i) => i.hash(state),
            Value::Double(d) => d.to_bits().hash(state),
            Value::String(s) | Value::DateTime(s) => s.hash(state),
            Value::Binary(b) => b.hash(state),
            Value::List(items) => items.hash(state),
            Value::Struct(fields) => fields.hash(state),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::BigInt(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_property_path() {
        let query = Value::structure([
            ("ids", Value::from(vec![1i64, 2, 3])),
            ("owner", Value::structure([("name", Value::from("ash"))])),
            ("parent", Value::Null),
        ]);

        assert_eq!(query.property("").unwrap(), &query);
        assert_eq!(query.property("owner.name").unwrap(), &Value::from("ash"));
        assert_eq!(query.property("ids").unwrap().as_list().unwrap().len(), 3);
        assert_eq!(query.property("parent.name").unwrap(), &Value::Null);
        assert!(matches!(query.property("missing"), Err(DaoError::PropertyPath(_))));
        assert!(matches!(query.property("owner.name.len"), Err(DaoError::PropertyPath(_))));
    }

    #[test]
    fn test_coerce() {
        assert_eq!(Value::Int(7).coerce(&DataType::BigInt).unwrap(), Value::BigInt(7));
        assert_eq!(Value::BigInt(7).coerce(&DataType::Int).unwrap(), Value::Int(7));
        assert_eq!(Value::BigInt(3).coerce(&DataType::Double).unwrap(), Value::Double(3.0));
        assert_eq!(Value::Null.coerce(&DataType::String).unwrap(), Value::Null);
        assert!(Value::BigInt(i64::MAX).coerce(&DataType::Int).is_err());
        assert!(Value::from("x").coerce(&DataType::Int).is_err());
    }

    #[test]
    fn test_hash_dedup() {
        let mut set = HashSet::new();
        set.insert(Value::Double(1.5));
        set.insert(Value::Double(1.5));
        set.insert(Value::structure([("id", Value::BigInt(1))]));
        set.insert(Value::structure([("id", Value::BigInt(1))]));
        set.insert(Value::Int(1));
        assert_eq!(set.len(), 3);
    }
}
