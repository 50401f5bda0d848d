// Copyright 2025 Apache Doris Community
// Licensed under the Apache License, Version 2.0

//! Many callers sharing one operator

use dao_common::{DaoError, DataType, Result, Value};
use dao_meta::{PropertyPathResolver, SchemaPathResolver, StructSchema, TypeRegistry};
use dao_qe::mock::MockDataSource;
use dao_qe::{NamedTemplate, OperatorFactory, RowSet, SimpleDataSourceProvider, StatementDefinition};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

struct CountingResolver {
    inner: SchemaPathResolver,
    calls: AtomicUsize,
}

impl PropertyPathResolver for CountingResolver {
    fn resolve(&self, declared: &DataType, path: &str) -> Result<DataType> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.resolve(declared, path)
    }
}

fn registry() -> Arc<TypeRegistry> {
    let registry = Arc::new(TypeRegistry::new());
    registry.register(
        StructSchema::new("OrderQuery")
            .with_field("ids", DataType::list(DataType::BigInt))
            .with_field("owner", DataType::structure("Owner")),
    );
    registry.register(StructSchema::new("Owner").with_field("name", DataType::String));
    registry
}

#[test]
fn test_parallel_calls_share_cache_and_stats() {
    let registry = registry();
    let resolver = Arc::new(CountingResolver {
        inner: SchemaPathResolver::new(Arc::clone(&registry)),
        calls: AtomicUsize::new(0),
    });

    // Every fifth call fails at the data source
    let ds = Arc::new(MockDataSource::with_handler("orders", |_, args| {
        if args.contains(&Value::BigInt(0)) {
            return Err(DaoError::DataSource("deadlock detected".to_string()));
        }
        let mut rows = RowSet::new(["id"]);
        for arg in args.iter().filter(|a| matches!(a, Value::BigInt(_))) {
            rows = rows.with_row(vec![arg.clone()]);
        }
        Ok(rows)
    }));

    let factory = OperatorFactory::new(Arc::clone(&registry), Arc::new(SimpleDataSourceProvider::new(ds.clone())))
        .with_resolver(resolver.clone());
    let operator = factory
        .create_query_operator(
            StatementDefinition::new(
                "orders",
                Arc::new(
                    NamedTemplate::parse("SELECT id FROM orders WHERE owner = :q.owner.name AND id IN (:q.ids)")
                        .unwrap(),
                ),
                DataType::list(DataType::BigInt),
            )
            .with_parameter("q", DataType::structure("OrderQuery")),
        )
        .unwrap();
    assert_eq!(operator.parameters().cached_entries(), 0);

    let outcomes: Vec<std::result::Result<usize, String>> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..50i64)
            .map(|i| {
                let operator = &operator;
                s.spawn(move || {
                    let first = if i % 5 == 0 { 0 } else { i };
                    let q = Value::structure([
                        ("ids", Value::from(vec![first, i + 100])),
                        ("owner", Value::structure([("name", Value::from("ash"))])),
                    ]);
                    operator
                        .execute(vec![q])
                        .map(|output| output.len())
                        .map_err(|e| e.to_string())
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let failures = outcomes.iter().filter(|o| o.is_err()).count();
    assert_eq!(failures, 10);
    assert!(outcomes.iter().flatten().all(|&len| len == 2));

    // Both lazily resolved paths are cached exactly once
    assert_eq!(operator.parameters().cached_entries(), 2);
    assert_eq!(
        operator.parameters().get_property_type("q", "owner.name").unwrap(),
        DataType::String
    );
    assert_eq!(
        operator.parameters().get_property_type("q", "ids").unwrap(),
        DataType::list(DataType::BigInt)
    );
    let calls = resolver.calls.load(Ordering::SeqCst);
    assert!(calls >= 2 && calls <= 100);

    // Every call that reached the data source recorded exactly one outcome
    let stats = operator.stats().snapshot();
    assert_eq!(stats.execute_success_count, 40);
    assert_eq!(stats.execute_exception_count, 10);
    assert_eq!(stats.execute_count(), 50);
    assert_eq!(ds.call_count(), 50);
}
