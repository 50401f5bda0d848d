// Copyright 2025 Apache Doris Community
// Licensed under the Apache License, Version 2.0

//! Configuration management for statement operators

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::{DEFAULT_LOG_LEVEL, DEFAULT_SLOW_QUERY_THRESHOLD_MS, LOG_LEVELS};
use crate::error::DaoError;

/// What a scalar query returns when the data source yields no rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyScalarPolicy {
    /// Fail with `IncorrectResultSize`
    Error,
    /// Return `Value::Null`
    Null,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Behavior of scalar queries over an empty result
    pub empty_scalar_policy: EmptyScalarPolicy,

    /// Executions slower than this are logged at warn (0 disables)
    pub slow_query_threshold_ms: u64,

    /// Record execution statistics
    pub stats_enabled: bool,

    /// Log level
    pub log_level: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            empty_scalar_policy: EmptyScalarPolicy::Error,
            slow_query_threshold_ms: DEFAULT_SLOW_QUERY_THRESHOLD_MS,
            stats_enabled: true,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl EngineConfig {
    pub fn from_file(path: impl AsRef<Path>) -> crate::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "engine config loaded");
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> crate::Result<Self> {
        let config: EngineConfig = toml::from_str(content)
            .map_err(|e| DaoError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> crate::Result<()> {
        if !LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(DaoError::Config(format!(
                "log_level must be one of {:?}, got {}",
                LOG_LEVELS, self.log_level
            )));
        }
        Ok(())
    }
}
