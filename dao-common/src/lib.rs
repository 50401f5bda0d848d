// Copyright 2025 Apache Doris Community
// Licensed under the Apache License, Version 2.0

//! Common utilities and foundational types for the statement operator
//!
//! This module provides:
//! - Error types and result handling
//! - Configuration management
//! - Logging bootstrap
//! - Static data types and runtime values
//! - Utility functions
//! - Constants

pub mod error;
pub mod config;
pub mod types;
pub mod value;
pub mod utils;
pub mod constants;
pub mod logging;

pub use error::{DaoError, Result};
pub use config::{EngineConfig, EmptyScalarPolicy};
pub use types::DataType;
pub use value::Value;
