// Copyright 2025 Apache Doris Community
// Licensed under the Apache License, Version 2.0

//! Logging bootstrap

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `log_level`. Returns false when a global
/// subscriber was already installed.
pub fn init_logging(log_level: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_twice() {
        let _ = init_logging("debug");
        // Second install always reports the existing subscriber
        assert!(!init_logging("info"));
        tracing::info!(component = "dao-common", "logging initialized");
    }
}
