// Copyright 2025 Apache Doris Community
// Licensed under the Apache License, Version 2.0

//! Utility functions

/// Normalize a column or field name for name-based matching.
///
/// Lowercases and drops underscores so `user_name` matches `userName`.
pub fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Split `name.a.b` into (`name`, `a.b`)
pub fn split_property_path(full: &str) -> (&str, &str) {
    match full.split_once(crate::constants::PROPERTY_PATH_SEPARATOR) {
        Some((name, path)) => (name, path),
        None => (full, ""),
    }
}

/// Format nanoseconds as a human readable duration
pub fn format_nanos(nanos: u64) -> String {
    const UNITS: &[(&str, u64)] = &[("s", 1_000_000_000), ("ms", 1_000_000), ("us", 1_000)];

    for (unit, scale) in UNITS {
        if nanos >= *scale {
            return format!("{:.2} {}", nanos as f64 / *scale as f64, unit);
        }
    }
    format!("{} ns", nanos)
}
