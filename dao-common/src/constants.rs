// Copyright 2025 Apache Doris Community
// Licensed under the Apache License, Version 2.0

//! Constants used throughout the statement operator

/// Separator between segments of a property path
pub const PROPERTY_PATH_SEPARATOR: char = '.';

/// Prefix that introduces a named placeholder in a template
pub const PLACEHOLDER_PREFIX: char = ':';

/// Positional bind marker emitted by rendering
pub const BIND_MARKER: &str = "?";

/// Rendered in place of an empty multi-value expansion
pub const EMPTY_EXPANSION: &str = "NULL";

/// Default slow query threshold (milliseconds)
pub const DEFAULT_SLOW_QUERY_THRESHOLD_MS: u64 = 1000;

/// Default log filter
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Log levels accepted by the configuration
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];
