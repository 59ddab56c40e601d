//! Rule-spec parsing benchmarks
//!
//! Measures splitting, escaping and argument extraction of rule specs.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rulekit::validate::grammar::{escape_spec_arg, extract_rules, parse_rule};
use rulekit::Rules;

/// Benchmark single rule tokens
fn bench_parse_rule(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_rule");

    group.bench_function("no_args", |b| b.iter(|| parse_rule(black_box("required"))));

    group.bench_function("two_args", |b| {
        b.iter(|| parse_rule(black_box("between:10,100")))
    });

    group.bench_function("escaped_args", |b| {
        b.iter(|| parse_rule(black_box(r"in:a\,b,c\,d,e\\,f")))
    });

    group.finish();
}

/// Benchmark full specs of growing length
fn bench_extract_rules(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_rules");

    for count in [1usize, 5, 20] {
        let spec = (0..count)
            .map(|i| format!("minLength:{i}|regex:^a\\|b$"))
            .collect::<Vec<_>>()
            .join("|");
        group.throughput(Throughput::Bytes(spec.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &spec, |b, spec| {
            b.iter(|| extract_rules(black_box(spec)))
        });
    }

    group.finish();
}

/// Benchmark spec construction
fn bench_builder(c: &mut Criterion) {
    let mut group = c.benchmark_group("builder");

    group.bench_function("fluent_spec", |b| {
        b.iter(|| {
            Rules::new()
                .optional()
                .min_length(black_box(5))
                .in_list(black_box(&["a,b", "c|d", "e"]))
                .to_string()
        })
    });

    group.bench_function("escape_arg", |b| {
        b.iter(|| escape_spec_arg(black_box("a,b|c,d|e,f")))
    });

    group.finish();
}

criterion_group!(benches, bench_parse_rule, bench_extract_rules, bench_builder);
criterion_main!(benches);
