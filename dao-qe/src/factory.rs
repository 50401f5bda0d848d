// Copyright 2025 Apache Doris Community
// Licensed under the Apache License, Version 2.0

//! Statement registration

use dao_common::{DataType, EngineConfig, Result};
use dao_meta::{
    ParameterDescriptor, ParameterDescriptorContext, PropertyPathResolver, SchemaPathResolver,
    TypeRegistry,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use crate::datasource::DataSourceProvider;
use crate::interceptor::InterceptorChain;
use crate::operator::QueryOperator;
use crate::shape::ResultShapeInspector;
use crate::stats::StatsRegistry;
use crate::template::Template;

/// Declaration of one query statement
#[derive(Clone)]
pub struct StatementDefinition {
    pub name: String,
    pub parameters: Vec<(String, DataType)>,
    pub return_type: DataType,
    pub template: Arc<dyn Template>,
    pub use_master: bool,
}

impl StatementDefinition {
    pub fn new(name: impl Into<String>, template: Arc<dyn Template>, return_type: DataType) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            return_type,
            template,
            use_master: false,
        }
    }

    /// Append a parameter
    pub fn with_parameter(mut self, name: impl Into<String>, data_type: DataType) -> Self {
        self.parameters.push((name.into(), data_type));
        self
    }

    /// Always read from the master data source
    pub fn with_use_master(mut self, use_master: bool) -> Self {
        self.use_master = use_master;
        self
    }
}

/// Turns statement definitions into shareable operators
pub struct OperatorFactory {
    registry: Arc<TypeRegistry>,
    resolver: Arc<dyn PropertyPathResolver>,
    interceptors: Arc<InterceptorChain>,
    data_sources: Arc<dyn DataSourceProvider>,
    stats: Arc<StatsRegistry>,
    config: Arc<EngineConfig>,
}

impl OperatorFactory {
    pub fn new(registry: Arc<TypeRegistry>, data_sources: Arc<dyn DataSourceProvider>) -> Self {
        let resolver = Arc::new(SchemaPathResolver::new(Arc::clone(&registry)));
        Self {
            registry,
            resolver,
            interceptors: Arc::new(InterceptorChain::new()),
            data_sources,
            stats: Arc::new(StatsRegistry::new()),
            config: Arc::new(EngineConfig::default()),
        }
    }

    pub fn with_resolver(mut self, resolver: Arc<dyn PropertyPathResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn with_interceptors(mut self, interceptors: InterceptorChain) -> Self {
        self.interceptors = Arc::new(interceptors);
        self
    }

    pub fn with_stats_registry(mut self, stats: Arc<StatsRegistry>) -> Self {
        self.stats = stats;
        self
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = Arc::new(config);
        self
    }

    pub fn stats_registry(&self) -> &Arc<StatsRegistry> {
        &self.stats
    }

    pub fn type_registry(&self) -> &Arc<TypeRegistry> {
        &self.registry
    }

    /// Register a query statement.
    ///
    /// Fails without producing an operator when a parameter is declared twice,
    /// the return type cannot be mapped, or a multi-value expansion is paired
    /// with a scalar return type.
    pub fn create_query_operator(&self, definition: StatementDefinition) -> Result<QueryOperator> {
        let start = Instant::now();

        let mut parameters = ParameterDescriptorContext::new(Arc::clone(&self.resolver));
        for (position, (name, data_type)) in definition.parameters.iter().enumerate() {
            parameters.add_parameter_descriptor(
                name.clone(),
                ParameterDescriptor::new(position, name.clone(), data_type.clone()),
            )?;
        }

        let contract = ResultShapeInspector::new(&self.registry)
            .inspect(&definition.return_type, definition.template.iterable_parameters())?;

        let stats = self.stats.counter(&definition.name);
        stats.record_init(u64::try_from(start.elapsed().as_nanos()).unwrap_or(u64::MAX));

        info!(
            statement = %definition.name,
            shape = %contract.shape,
            element = %contract.element_type,
            parameters = definition.parameters.len(),
            "query operator created"
        );

        Ok(QueryOperator {
            name: definition.name,
            template: definition.template,
            parameters: Arc::new(parameters),
            contract,
            use_master: definition.use_master,
            interceptors: Arc::clone(&self.interceptors),
            data_sources: Arc::clone(&self.data_sources),
            stats,
            config: Arc::clone(&self.config),
        })
    }
}
