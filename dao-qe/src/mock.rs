// Copyright 2025 Apache Doris Community
// Licensed under the Apache License, Version 2.0

//! Mock data source for testing
//!
//! Answers queries from a handler closure and records every statement it
//! receives, so tests can assert on rendered SQL and bind values without a
//! real database.

use dao_common::{DaoError, Result, Value};
use parking_lot::Mutex;

use crate::context::SqlDescriptor;
use crate::datasource::DataSource;
use crate::result::RowSet;

type Handler = Box<dyn Fn(&str, &[Value]) -> Result<RowSet> + Send + Sync>;

pub struct MockDataSource {
    name: String,
    handler: Handler,
    calls: Mutex<Vec<SqlDescriptor>>,
}

impl MockDataSource {
    /// Answer every query with `handler`
    pub fn with_handler<F>(name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&str, &[Value]) -> Result<RowSet> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            handler: Box::new(handler),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Answer every query with a copy of `rows`
    pub fn with_rows(name: impl Into<String>, rows: RowSet) -> Self {
        Self::with_handler(name, move |_, _| Ok(rows.clone()))
    }

    /// Fail every query with a data source error
    pub fn failing(name: impl Into<String>, message: impl Into<String>) -> Self {
        let message = message.into();
        Self::with_handler(name, move |_, _| Err(DaoError::DataSource(message.clone())))
    }

    /// Statements received so far
    pub fn calls(&self) -> Vec<SqlDescriptor> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn last_call(&self) -> Option<SqlDescriptor> {
        self.calls.lock().last().cloned()
    }
}

impl DataSource for MockDataSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn query(&self, sql: &str, args: &[Value]) -> Result<RowSet> {
        self.calls.lock().push(SqlDescriptor::new(sql, args.to_vec()));
        (self.handler)(sql, args)
    }
}

impl std::fmt::Debug for MockDataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockDataSource")
            .field("name", &self.name)
            .field("calls", &self.call_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_calls() {
        let ds = MockDataSource::with_rows("db", RowSet::new(["n"]).with_row(vec![Value::Int(1)]));

        let rows = ds.query("SELECT ?", &[Value::Int(5)]).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(ds.call_count(), 1);
        assert_eq!(ds.last_call().unwrap(), SqlDescriptor::new("SELECT ?", vec![Value::Int(5)]));
    }

    #[test]
    fn test_failing() {
        let ds = MockDataSource::failing("db", "connection refused");
        assert!(matches!(ds.query("SELECT 1", &[]), Err(DaoError::DataSource(_))));
        assert_eq!(ds.call_count(), 1);
    }
}
