//! Benchmarks for schema inference and validation
//!
//! Run with: cargo bench -p shapecheck-core

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use serde_json::{Value, json};
use shapecheck_core::diagnostics::diagnose;
use shapecheck_core::inference::{SchemaInferrer, detect_format};
use shapecheck_core::validation::SchemaValidator;

/// Generate an API-style response with `count` items
fn generate_response(count: usize) -> Value {
    let items: Vec<Value> = (0..count)
        .map(|i| {
            json!({
                "id": i,
                "email": format!("user{}@example.com", i),
                "name": format!("User {}", i),
                "active": i % 2 == 0,
                "createdAt": "2024-01-15T10:30:00Z",
                "ip": format!("192.168.{}.{}", i % 256, (i * 3) % 256),
                "nickname": if i % 3 == 0 { Value::Null } else { json!("nick") },
                "tags": ["a", "b"],
                "address": {"city": "Berlin", "zip": format!("{:05}", i)}
            })
        })
        .collect();

    json!({"total": count, "items": items})
}

/// Benchmark format detection for various string patterns
fn bench_format_detection(c: &mut Criterion) {
    let mut group = c.benchmark_group("format_detection");

    let test_cases = vec![
        ("email", "user@example.com"),
        ("uuid", "550e8400-e29b-41d4-a716-446655440000"),
        ("uri", "https://example.com/path"),
        ("ipv4", "192.168.1.1"),
        ("ipv6", "2001:db8::1"),
        ("hostname", "api.example.com"),
        ("date", "2024-01-15"),
        ("datetime", "2024-01-15T10:30:00Z"),
        ("plain_string", "hello world"),
    ];

    for (name, value) in test_cases {
        group.bench_with_input(BenchmarkId::new("detect", name), &value, |b, value| {
            b.iter(|| black_box(detect_format(value)));
        });
    }

    group.finish();
}

/// Benchmark schema inference with varying item counts
fn bench_schema_inference(c: &mut Criterion) {
    let mut group = c.benchmark_group("schema_inference");
    let inferrer = SchemaInferrer::new();

    for count in [10, 100, 500].iter() {
        let response = generate_response(*count);
        group.throughput(Throughput::Elements(*count as u64));

        group.bench_with_input(
            BenchmarkId::new("infer_document", count),
            &response,
            |b, response| {
                b.iter(|| black_box(inferrer.infer_document(response)));
            },
        );
    }

    group.finish();
}

/// Benchmark validation plus diagnostics against an inferred schema
fn bench_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("validation");

    let response = generate_response(100);
    let schema = SchemaInferrer::new().infer_document(&response);
    let Ok(validator) = SchemaValidator::new(&schema) else {
        return;
    };

    let mut drifted = response.clone();
    if let Some(items) = drifted["items"].as_array_mut() {
        for item in items.iter_mut().step_by(10) {
            item["id"] = json!("not-a-number");
        }
    }

    group.bench_function("valid", |b| {
        b.iter(|| black_box(validator.validate(&response)));
    });

    group.bench_function("drifted", |b| {
        b.iter(|| {
            let report = validator.validate(&drifted);
            black_box(diagnose(&drifted, &report.mismatches))
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_format_detection,
    bench_schema_inference,
    bench_validation
);
criterion_main!(benches);
