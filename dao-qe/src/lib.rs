// Copyright 2025 Apache Doris Community
// Licensed under the Apache License, Version 2.0

//! Query Execution Engine
//!
//! Registers query statements and executes them: renders templates against
//! call arguments, runs interceptors, dispatches to a data source, maps rows
//! into the declared result shape and records timing statistics.

pub mod context;
pub mod template;
pub mod interceptor;
pub mod datasource;
pub mod mapper;
pub mod shape;
pub mod stats;
pub mod result;
pub mod operator;
pub mod factory;
pub mod mock;

pub use context::{RuntimeContext, SqlDescriptor};
pub use template::{NamedTemplate, Placeholder, Template};
pub use interceptor::{Interceptor, InterceptorChain};
pub use datasource::{DataSource, DataSourceProvider, MasterSlaveDataSourceProvider, SimpleDataSourceProvider};
pub use mapper::{RowMapper, SingleColumnRowMapper, StructRowMapper};
pub use shape::{ResultShape, ResultShapeInspector, ReturnContract};
pub use stats::{ExecutionTimer, OperatorStats, StatsCounter, StatsRegistry};
pub use result::{ColumnInfo, QueryOutput, Row, RowSet};
pub use operator::QueryOperator;
pub use factory::{OperatorFactory, StatementDefinition};
