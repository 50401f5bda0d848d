// Copyright 2025 Apache Doris Community
// Licensed under the Apache License, Version 2.0

//! Integration tests for the parameter descriptor context

use dao_common::{DaoError, DataType, Result};
use dao_meta::{
    ParameterDescriptor, ParameterDescriptorContext, PropertyPathResolver, SchemaPathResolver,
    StructSchema, TypeRegistry,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Wraps the schema resolver and counts how often it is consulted
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
        StructSchema::new("UserQuery")
            .with_field("ids", DataType::list(DataType::BigInt))
            .with_field("owner", DataType::structure("Owner")),
    );
    registry.register(
        StructSchema::new("Owner")
            .with_field("name", DataType::String)
            .with_field("tags", DataType::set(DataType::String)),
    );
    registry
}

fn counting_context() -> (Arc<CountingResolver>, ParameterDescriptorContext) {
    let resolver = Arc::new(CountingResolver {
        inner: SchemaPathResolver::new(registry()),
        calls: AtomicUsize::new(0),
    });
    let mut ctx = ParameterDescriptorContext::new(resolver.clone());
    ctx.add_parameter_descriptor("q", ParameterDescriptor::new(0, "q", DataType::structure("UserQuery")))
        .unwrap();
    ctx.add_parameter_descriptor("status", ParameterDescriptor::new(1, "status", DataType::Int))
        .unwrap();
    (resolver, ctx)
}

#[test]
fn test_second_lookup_is_memoized() {
    let (resolver, ctx) = counting_context();

    let first = ctx.get_property_type("q", "owner.name").unwrap();
    assert_eq!(resolver.calls.load(Ordering::SeqCst), 1);

    let second = ctx.get_property_type("q", "owner.name").unwrap();
    assert_eq!(first, second);
    assert_eq!(resolver.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_empty_path_never_consults_resolver() {
    let (resolver, ctx) = counting_context();

    assert_eq!(ctx.get_property_type("status", "").unwrap(), DataType::Int);
    assert_eq!(ctx.get_property_type("q", "").unwrap(), DataType::structure("UserQuery"));
    assert_eq!(resolver.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_unknown_parameter_always_fails() {
    let (resolver, ctx) = counting_context();

    for path in ["", "ids", "owner.name", "does.not.exist"] {
        let result = ctx.get_property_type("missing", path);
        assert!(
            matches!(result, Err(DaoError::ParameterNotFound(ref name)) if name == "missing"),
            "path {:?} gave {:?}",
            path,
            result
        );
    }
    assert_eq!(resolver.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_bad_path_propagates_property_path_error() {
    let (_, ctx) = counting_context();

    assert!(matches!(ctx.get_property_type("q", "owner.age"), Err(DaoError::PropertyPath(_))));
    assert!(matches!(ctx.get_property_type("status", "value"), Err(DaoError::PropertyPath(_))));
}

#[test]
fn test_descriptors_keep_declaration_order() {
    let (_, ctx) = counting_context();

    let names: Vec<&str> = ctx.parameter_descriptors().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["q", "status"]);
    assert_eq!(ctx.get_parameter_descriptor("status").unwrap().position, 1);
}

#[test]
fn test_concurrent_lookups_agree() {
    let (resolver, ctx) = counting_context();
    let ctx = Arc::new(ctx);
    let paths = ["ids", "owner.name", "owner.tags", ""];

    let results: Vec<DataType> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..50)
            .map(|i| {
                let ctx = Arc::clone(&ctx);
                let path = paths[i % paths.len()];
                s.spawn(move || ctx.get_property_type("q", path).unwrap())
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for (i, resolved) in results.iter().enumerate() {
        let expected = match paths[i % paths.len()] {
            "ids" => DataType::list(DataType::BigInt),
            "owner.name" => DataType::String,
            "owner.tags" => DataType::set(DataType::String),
            _ => DataType::structure("UserQuery"),
        };
        assert_eq!(resolved, &expected);
    }

    assert_eq!(ctx.cached_entries(), paths.len());
    // Racing misses may recompute, but never more than once per thread
    let calls = resolver.calls.load(Ordering::SeqCst);
    assert!(calls >= 3 && calls <= 50);

    // Everything is cached now
    ctx.get_property_type("q", "owner.tags").unwrap();
    assert_eq!(resolver.calls.load(Ordering::SeqCst), calls);
}
