// Copyright 2025 Apache Doris Community
// Licensed under the Apache License, Version 2.0

//! Data source contracts and read/write routing

use dao_common::{DaoError, Result, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::context::RuntimeContext;
use crate::result::RowSet;

/// Executes a rendered query and returns its raw rows.
///
/// Timeouts and cancellation are the data source's job; report them as
/// `DaoError::Timeout`.
pub trait DataSource: Send + Sync {
    fn name(&self) -> &str;

    fn query(&self, sql: &str, args: &[Value]) -> Result<RowSet>;
}

/// Chooses the data source for one call
pub trait DataSourceProvider: Send + Sync {
    fn data_source(&self, context: &RuntimeContext) -> Result<Arc<dyn DataSource>>;
}

/// Always hands out the same data source
#[derive(Clone)]
pub struct SimpleDataSourceProvider {
    data_source: Arc<dyn DataSource>,
}

impl SimpleDataSourceProvider {
    pub fn new(data_source: Arc<dyn DataSource>) -> Self {
        Self { data_source }
    }
}

impl DataSourceProvider for SimpleDataSourceProvider {
    fn data_source(&self, _context: &RuntimeContext) -> Result<Arc<dyn DataSource>> {
        Ok(Arc::clone(&self.data_source))
    }
}

/// Sends reads to slaves in round-robin order, or to the master when the
/// call asks for it or no slave is configured
pub struct MasterSlaveDataSourceProvider {
    master: Arc<dyn DataSource>,
    slaves: Vec<Arc<dyn DataSource>>,
    next_slave: AtomicUsize,
}

impl MasterSlaveDataSourceProvider {
    pub fn new(master: Arc<dyn DataSource>, slaves: Vec<Arc<dyn DataSource>>) -> Self {
        Self {
            master,
            slaves,
            next_slave: AtomicUsize::new(0),
        }
    }

    pub fn master(&self) -> &Arc<dyn DataSource> {
        &self.master
    }

    pub fn slave_count(&self) -> usize {
        self.slaves.len()
    }
}

impl DataSourceProvider for MasterSlaveDataSourceProvider {
    fn data_source(&self, context: &RuntimeContext) -> Result<Arc<dyn DataSource>> {
        if context.use_master() || self.slaves.is_empty() {
            return Ok(Arc::clone(&self.master));
        }
        let idx = self.next_slave.fetch_add(1, Ordering::Relaxed) % self.slaves.len();
        self.slaves
            .get(idx)
            .cloned()
            .ok_or_else(|| DaoError::DataSource(format!("slave {} unavailable", idx)))
    }
}
