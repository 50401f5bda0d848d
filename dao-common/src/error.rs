// Copyright 2025 Apache Doris Community
// Licensed under the Apache License, Version 2.0

//! Error types for statement registration and execution

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DaoError {
    #[error("Parameter not found: parameter :{0} is not readable")]
    ParameterNotFound(String),

    #[error("Duplicate parameter: {0}")]
    DuplicateParameter(String),

    #[error("Property path error: {0}")]
    PropertyPath(String),

    #[error("Type not found: {0}")]
    TypeNotFound(String),

    #[error("Incompatible return shape: {0}")]
    IncompatibleReturnShape(String),

    #[error("Unsupported return type: {0}")]
    UnsupportedReturnType(String),

    #[error("Incorrect result size: expected {expected}, actual {actual}")]
    IncorrectResultSize { expected: usize, actual: usize },

    #[error("Incorrect column count: expected {expected}, actual {actual}")]
    IncorrectColumnCount { expected: usize, actual: usize },

    #[error("Parameter is not iterable: {0}")]
    NotIterableParameter(String),

    #[error("Binding error: {0}")]
    Binding(String),

    #[error("Type mismatch: {0}")]
    TypeMismatch(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("Interceptor error: {0}")]
    Interceptor(String),

    #[error("Data source error: {0}")]
    DataSource(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DaoError>;
