// Copyright 2025 Apache Doris Community
// Licensed under the Apache License, Version 2.0

//! Execution statistics

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Per-statement counters, safe to bump from any thread
#[derive(Debug, Default)]
pub struct StatsCounter {
    init_count: AtomicU64,
    total_init_nanos: AtomicU64,
    execute_success_count: AtomicU64,
    total_execute_success_nanos: AtomicU64,
    execute_exception_count: AtomicU64,
    total_execute_exception_nanos: AtomicU64,
}

impl StatsCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_init(&self, nanos: u64) {
        self.init_count.fetch_add(1, Ordering::Relaxed);
        self.total_init_nanos.fetch_add(nanos, Ordering::Relaxed);
    }

    pub fn record_success(&self, nanos: u64) {
        self.execute_success_count.fetch_add(1, Ordering::Relaxed);
        self.total_execute_success_nanos.fetch_add(nanos, Ordering::Relaxed);
    }

    pub fn record_failure(&self, nanos: u64) {
        self.execute_exception_count.fetch_add(1, Ordering::Relaxed);
        self.total_execute_exception_nanos.fetch_add(nanos, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> OperatorStats {
        OperatorStats {
            init_count: self.init_count.load(Ordering::Relaxed),
            total_init_nanos: self.total_init_nanos.load(Ordering::Relaxed),
            execute_success_count: self.execute_success_count.load(Ordering::Relaxed),
            total_execute_success_nanos: self.total_execute_success_nanos.load(Ordering::Relaxed),
            execute_exception_count: self.execute_exception_count.load(Ordering::Relaxed),
            total_execute_exception_nanos: self.total_execute_exception_nanos.load(Ordering::Relaxed),
        }
    }

    pub fn reset(&self) {
        for counter in [
            &self.init_count,
            &self.total_init_nanos,
            &self.execute_success_count,
            &self.total_execute_success_nanos,
            &self.execute_exception_count,
            &self.total_execute_exception_nanos,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
    }
}

/// Point-in-time copy of a `StatsCounter`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorStats {
    pub init_count: u64,
    pub total_init_nanos: u64,
    pub execute_success_count: u64,
    pub total_execute_success_nanos: u64,
    pub execute_exception_count: u64,
    pub total_execute_exception_nanos: u64,
}

impl OperatorStats {
    pub fn execute_count(&self) -> u64 {
        self.execute_success_count + self.execute_exception_count
    }

    pub fn average_execute_success_nanos(&self) -> u64 {
        average(self.total_execute_success_nanos, self.execute_success_count)
    }

    pub fn average_execute_exception_nanos(&self) -> u64 {
        average(self.total_execute_exception_nanos, self.execute_exception_count)
    }

    pub fn execute_exception_rate(&self) -> f64 {
        match self.execute_count() {
            0 => 0.0,
            n => self.execute_exception_count as f64 / n as f64,
        }
    }
}

fn average(total: u64, count: u64) -> u64 {
    if count == 0 {
        0
    } else {
        total / count
    }
}

/// Process-wide stats, one counter per statement name
#[derive(Debug, Default)]
pub struct StatsRegistry {
    counters: DashMap<String, Arc<StatsCounter>>,
}

impl StatsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counter for `statement`, created on first use
    pub fn counter(&self, statement: &str) -> Arc<StatsCounter> {
        if let Some(counter) = self.counters.get(statement) {
            return Arc::clone(counter.value());
        }
        Arc::clone(
            self.counters
                .entry(statement.to_string())
                .or_default()
                .value(),
        )
    }

    pub fn get(&self, statement: &str) -> Option<OperatorStats> {
        self.counters.get(statement).map(|c| c.value().snapshot())
    }

    pub fn snapshot_all(&self) -> BTreeMap<String, OperatorStats> {
        self.counters
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().snapshot()))
            .collect()
    }

    pub fn reset(&self) {
        for entry in self.counters.iter() {
            entry.value().reset();
        }
    }
}

/// Times the execute+map window and records exactly one outcome.
///
/// Dropping the timer without calling `finish_ok` records a failure, which
/// also covers unwinding out of the guarded block.
#[must_use = "dropping the timer immediately records a failure"]
pub struct ExecutionTimer<'a> {
    stats: Option<&'a StatsCounter>,
    start: Instant,
    finished: bool,
}

impl<'a> ExecutionTimer<'a> {
    /// Start timing; with `None` the elapsed time is measured but not recorded
    pub fn start(stats: Option<&'a StatsCounter>) -> Self {
        Self {
            stats,
            start: Instant::now(),
            finished: false,
        }
    }

    pub fn elapsed_nanos(&self) -> u64 {
        u64::try_from(self.start.elapsed().as_nanos()).unwrap_or(u64::MAX)
    }

    /// Record success and return the elapsed nanoseconds
    pub fn finish_ok(mut self) -> u64 {
        self.finish(true)
    }

    /// Record failure and return the elapsed nanoseconds
    pub fn finish_err(mut self) -> u64 {
        self.finish(false)
    }

    fn finish(&mut self, success: bool) -> u64 {
        let nanos = self.elapsed_nanos();
        self.finished = true;
        if let Some(stats) = self.stats {
            if success {
                stats.record_success(nanos);
            } else {
                stats.record_failure(nanos);
            }
        }
        nanos
    }
}

impl Drop for ExecutionTimer<'_> {
    fn drop(&mut self) {
        if !self.finished {
            self.finish(false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_records_once() {
        let stats = StatsCounter::new();

        let timer = ExecutionTimer::start(Some(&stats));
        timer.finish_ok();
        let timer = ExecutionTimer::start(Some(&stats));
        timer.finish_err();
        {
            let _timer = ExecutionTimer::start(Some(&stats));
        }

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.execute_success_count, 1);
        assert_eq!(snapshot.execute_exception_count, 2);
        assert_eq!(snapshot.execute_count(), 3);
    }

    #[test]
    fn test_timer_records_failure_on_panic() {
        let stats = StatsCounter::new();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _timer = ExecutionTimer::start(Some(&stats));
            panic!("mapper blew up");
        }));
        assert!(result.is_err());
        assert_eq!(stats.snapshot().execute_exception_count, 1);
        assert_eq!(stats.snapshot().execute_success_count, 0);
    }

    #[test]
    fn test_timer_without_stats() {
        let timer = ExecutionTimer::start(None);
        let _ = timer.finish_ok();
    }

    #[test]
    fn test_averages() {
        let stats = StatsCounter::new();
        stats.record_success(100);
        stats.record_success(300);
        stats.record_failure(50);

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.average_execute_success_nanos(), 200);
        assert_eq!(snapshot.average_execute_exception_nanos(), 50);
        assert!((snapshot.execute_exception_rate() - 1.0 / 3.0).abs() < 1e-9);

        stats.reset();
        assert_eq!(stats.snapshot(), OperatorStats::default());
    }

    #[test]
    fn test_registry_counters_are_shared() {
        let registry = StatsRegistry::new();
        registry.counter("find").record_success(10);
        registry.counter("find").record_failure(20);
        registry.counter("count").record_init(5);

        assert_eq!(registry.get("find").unwrap().execute_count(), 2);
        assert_eq!(registry.get("count").unwrap().init_count, 1);
        assert!(registry.get("missing").is_none());
        assert_eq!(registry.snapshot_all().len(), 2);
    }

    #[test]
    fn test_concurrent_increments() {
        let stats = StatsCounter::new();
        std::thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    for _ in 0..1000 {
                        stats.record_success(1);
                    }
                });
            }
        });
        let snapshot = stats.snapshot();
        assert_eq!(snapshot.execute_success_count, 8000);
        assert_eq!(snapshot.total_execute_success_nanos, 8000);
    }
}
