// Copyright 2025 Apache Doris Community
// Licensed under the Apache License, Version 2.0

//! Per-invocation runtime context and rendered statements

use dao_common::{DaoError, Result, Value};
use dao_meta::ParameterDescriptorContext;
use std::sync::Arc;

/// Rendered statement text plus its ordered bind values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SqlDescriptor {
    sql: String,
    args: Vec<Value>,
}

impl SqlDescriptor {
    pub fn new(sql: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            sql: sql.into(),
            args,
        }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn args(&self) -> &[Value] {
        &self.args
    }

    pub fn push_sql(&mut self, fragment: &str) {
        self.sql.push_str(fragment);
    }

    pub fn push_arg(&mut self, value: Value) {
        self.args.push(value);
    }

    pub fn set_sql(&mut self, sql: impl Into<String>) {
        self.sql = sql.into();
    }

    pub fn set_args(&mut self, args: Vec<Value>) {
        self.args = args;
    }
}

/// Argument values of one call plus the statement being rendered for it
#[derive(Debug)]
pub struct RuntimeContext {
    parameters: Arc<ParameterDescriptorContext>,
    values: Vec<Value>,
    sql_descriptor: SqlDescriptor,
    use_master: bool,
}

impl RuntimeContext {
    /// Bind `values` positionally to the declared parameters
    pub fn new(parameters: Arc<ParameterDescriptorContext>, values: Vec<Value>) -> Result<Self> {
        let expected = parameters.parameter_descriptors().len();
        if values.len() != expected {
            return Err(DaoError::Binding(format!(
                "expected {} arguments, got {}",
                expected,
                values.len()
            )));
        }
        Ok(Self {
            parameters,
            values,
            sql_descriptor: SqlDescriptor::default(),
            use_master: false,
        })
    }

    /// Route this call to the master data source
    pub fn with_use_master(mut self, use_master: bool) -> Self {
        self.use_master = use_master;
        self
    }

    pub fn use_master(&self) -> bool {
        self.use_master
    }

    pub fn parameters(&self) -> &ParameterDescriptorContext {
        &self.parameters
    }

    /// Value of parameter `name`, projected through `property_path`
    pub fn get_property_value(&self, name: &str, property_path: &str) -> Result<&Value> {
        let descriptor = self
            .parameters
            .get_parameter_descriptor(name)
            .ok_or_else(|| DaoError::ParameterNotFound(name.to_string()))?;
        let value = self.values.get(descriptor.position).ok_or_else(|| {
            DaoError::Binding(format!("no argument at position {} for :{}", descriptor.position, name))
        })?;
        value.property(property_path)
    }

    pub fn sql_descriptor(&self) -> &SqlDescriptor {
        &self.sql_descriptor
    }

    pub fn sql_descriptor_mut(&mut self) -> &mut SqlDescriptor {
        &mut self.sql_descriptor
    }

    /// Move the rendered statement out, leaving an empty one behind
    pub fn take_sql_descriptor(&mut self) -> SqlDescriptor {
        std::mem::take(&mut self.sql_descriptor)
    }
}
