// Copyright 2025 Apache Doris Community
// Licensed under the Apache License, Version 2.0

//! Interception of rendered statements before execution

use dao_common::Result;
use std::sync::Arc;

use crate::context::{RuntimeContext, SqlDescriptor};

/// Observes or rewrites a rendered statement
pub trait Interceptor: Send + Sync {
    fn intercept(&self, sql_descriptor: &mut SqlDescriptor, context: &RuntimeContext) -> Result<()>;
}

/// Ordered list of interceptors; the first error stops the chain
#[derive(Default, Clone)]
pub struct InterceptorChain {
    interceptors: Vec<Arc<dyn Interceptor>>,
}

impl InterceptorChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_interceptor(&mut self, interceptor: Arc<dyn Interceptor>) {
        self.interceptors.push(interceptor);
    }

    pub fn with_interceptor(mut self, interceptor: Arc<dyn Interceptor>) -> Self {
        self.add_interceptor(interceptor);
        self
    }

    pub fn intercept(&self, sql_descriptor: &mut SqlDescriptor, context: &RuntimeContext) -> Result<()> {
        for interceptor in &self.interceptors {
            interceptor.intercept(sql_descriptor, context)?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }
}

impl std::fmt::Debug for InterceptorChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InterceptorChain")
            .field("interceptors", &self.interceptors.len())
            .finish()
    }
}
