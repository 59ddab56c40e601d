//! Validation run benchmarks
//!
//! Measures full engine runs over form-like payloads.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rulekit::prelude::*;

fn signup_validation() -> Validation {
    let mut validation = Validation::new();
    validation
        .set_rule("username", "required|alphaNumber|minLength:3|maxLength:20")
        .set_rule("email", "required|email")
        .set_rule("password", "required|minLength:8|specialChar:1")
        .set_rule("confirmPassword", "equals:password")
        .set_rule("age", "optional|int|between:18,120")
        .set_rule("website", "optional|url")
        .set_labels([("confirmPassword", "Confirm Password"), ("password", "Password")]);
    validation
}

/// Benchmark a realistic form in passing and failing variants
fn bench_signup_form(c: &mut Criterion) {
    let mut group = c.benchmark_group("signup_form");
    let validation = signup_validation();

    let valid = json!({
        "username": "ada1815",
        "email": "ada@example.com",
        "password": "s3cret!pass",
        "confirmPassword": "s3cret!pass",
        "age": 36,
        "website": "https://example.com"
    });
    let invalid = json!({
        "username": "a",
        "email": "not-an-email",
        "password": "short",
        "confirmPassword": "other",
        "age": 12
    });

    group.bench_function("valid", |b| {
        b.iter(|| validation.check(black_box(&valid)).unwrap())
    });

    group.bench_function("invalid", |b| {
        b.iter(|| validation.check(black_box(&invalid)).unwrap())
    });

    group.bench_function("invalid_with_messages", |b| {
        b.iter(|| {
            let report = validation.check(black_box(&invalid)).unwrap();
            validation.messages_for(&report)
        })
    });

    group.finish();
}

/// Benchmark validate_only against sparse payloads
fn bench_partial_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("partial_update");
    let validation = signup_validation();

    for fields in [1usize, 3, 6] {
        let keys = ["username", "email", "password", "confirmPassword", "age", "website"];
        let data: serde_json::Map<String, Value> = keys
            .iter()
            .take(fields)
            .map(|key| (key.to_string(), json!("value")))
            .collect();
        let data = Value::Object(data);

        group.bench_with_input(BenchmarkId::from_parameter(fields), &data, |b, data| {
            b.iter(|| validation.check_only(black_box(data)).unwrap())
        });
    }

    group.finish();
}

/// Benchmark nested field paths
fn bench_nested_paths(c: &mut Criterion) {
    let mut validation = Validation::new();
    validation
        .set_rule("user[address][city]", "required|latin")
        .set_rule("user[tags][0]", "required|in:admin,editor");
    let data = json!({
        "user": {
            "address": { "city": "London" },
            "tags": ["admin"]
        }
    });

    c.bench_function("nested_paths", |b| {
        b.iter(|| validation.check(black_box(&data)).unwrap())
    });
}

criterion_group!(benches, bench_signup_form, bench_partial_update, bench_nested_paths);
criterion_main!(benches);
