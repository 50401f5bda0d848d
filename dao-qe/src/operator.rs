// Copyright 2025 Apache Doris Community
// Licensed under the Apache License, Version 2.0

//! Query operator
//!
//! Per call: bind arguments -> render -> intercept -> execute -> map -> record.
//! Only the execute+map window is timed; every call that reaches it records
//! exactly one success or failure.

use dao_common::utils::format_nanos;
use dao_common::{DaoError, EmptyScalarPolicy, EngineConfig, Result, Value};
use dao_meta::ParameterDescriptorContext;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, error, warn};

use crate::context::{RuntimeContext, SqlDescriptor};
use crate::datasource::{DataSource, DataSourceProvider};
use crate::interceptor::InterceptorChain;
use crate::result::{QueryOutput, RowSet};
use crate::shape::{ResultShape, ReturnContract};
use crate::stats::{ExecutionTimer, StatsCounter};
use crate::template::Template;

/// Execution-ready form of one declared query statement.
///
/// Immutable after construction apart from its internal caches and counters,
/// so one instance is shared by all concurrent callers.
pub struct QueryOperator {
    pub(crate) name: String,
    pub(crate) template: Arc<dyn Template>,
    pub(crate) parameters: Arc<ParameterDescriptorContext>,
    pub(crate) contract: ReturnContract,
    pub(crate) use_master: bool,
    pub(crate) interceptors: Arc<InterceptorChain>,
    pub(crate) data_sources: Arc<dyn DataSourceProvider>,
    pub(crate) stats: Arc<StatsCounter>,
    pub(crate) config: Arc<EngineConfig>,
}

impl QueryOperator {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shape(&self) -> ResultShape {
        self.contract.shape
    }

    pub fn contract(&self) -> &ReturnContract {
        &self.contract
    }

    pub fn parameters(&self) -> &Arc<ParameterDescriptorContext> {
        &self.parameters
    }

    pub fn stats(&self) -> &Arc<StatsCounter> {
        &self.stats
    }

    /// Run the statement with positional argument values
    pub fn execute(&self, values: Vec<Value>) -> Result<QueryOutput> {
        let context = RuntimeContext::new(Arc::clone(&self.parameters), values)?
            .with_use_master(self.use_master);
        self.execute_context(context)
    }

    /// Run the statement with a prepared context
    pub fn execute_context(&self, mut context: RuntimeContext) -> Result<QueryOutput> {
        self.template.render(&mut context)?;
        let mut sql_descriptor = context.take_sql_descriptor();
        self.interceptors.intercept(&mut sql_descriptor, &context)?;

        let data_source = self.data_sources.data_source(&context)?;
        debug!(
            statement = %self.name,
            data_source = data_source.name(),
            sql = sql_descriptor.sql(),
            args = sql_descriptor.args().len(),
            "dispatching query"
        );

        self.execute_from_db(data_source.as_ref(), &sql_descriptor)
    }

    fn execute_from_db(&self, data_source: &dyn DataSource, sql_descriptor: &SqlDescriptor) -> Result<QueryOutput> {
        let stats = self.config.stats_enabled.then(|| self.stats.as_ref());
        let timer = ExecutionTimer::start(stats);

        let outcome = data_source
            .query(sql_descriptor.sql(), sql_descriptor.args())
            .and_then(|rows| self.map_rows(rows));

        match outcome {
            Ok(output) => {
                let nanos = timer.finish_ok();
                self.log_if_slow(nanos, sql_descriptor);
                Ok(output)
            }
            Err(e) => {
                let nanos = timer.finish_err();
                error!(
                    statement = %self.name,
                    elapsed = %format_nanos(nanos),
                    error = %e,
                    "query failed"
                );
                Err(e)
            }
        }
    }

    fn map_rows(&self, row_set: RowSet) -> Result<QueryOutput> {
        let RowSet { columns, rows } = row_set;
        let mapper = &self.contract.row_mapper;

        let output = match self.contract.shape {
            ResultShape::Scalar => {
                if rows.len() > 1 {
                    return Err(DaoError::IncorrectResultSize {
                        expected: 1,
                        actual: rows.len(),
                    });
                }
                match rows.into_iter().next() {
                    Some(row) => QueryOutput::Scalar(mapper.map_row(&columns, row)?),
                    None => match self.config.empty_scalar_policy {
                        EmptyScalarPolicy::Null => QueryOutput::Scalar(Value::Null),
                        EmptyScalarPolicy::Error => {
                            return Err(DaoError::IncorrectResultSize { expected: 1, actual: 0 })
                        }
                    },
                }
            }
            ResultShape::List => QueryOutput::List(
                rows.into_iter()
                    .map(|row| mapper.map_row(&columns, row))
                    .collect::<Result<Vec<_>>>()?,
            ),
            ResultShape::Set => QueryOutput::Set(
                rows.into_iter()
                    .map(|row| mapper.map_row(&columns, row))
                    .collect::<Result<HashSet<_>>>()?,
            ),
            ResultShape::Array => QueryOutput::Array(
                rows.into_iter()
                    .map(|row| mapper.map_row(&columns, row))
                    .collect::<Result<Vec<_>>>()?
                    .into_boxed_slice(),
            ),
        };
        Ok(output)
    }

    fn log_if_slow(&self, nanos: u64, sql_descriptor: &SqlDescriptor) {
        let threshold_ms = self.config.slow_query_threshold_ms;
        if threshold_ms > 0 && nanos / 1_000_000 >= threshold_ms {
            warn!(
                statement = %self.name,
                elapsed = %format_nanos(nanos),
                sql = sql_descriptor.sql(),
                "slow query"
            );
        }
    }
}

impl std::fmt::Debug for QueryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryOperator")
            .field("name", &self.name)
            .field("contract", &self.contract)
            .field("use_master", &self.use_master)
            .finish_non_exhaustive()
    }
}
