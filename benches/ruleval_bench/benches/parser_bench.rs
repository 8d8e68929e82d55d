//! Rule parsing benchmarks
//!
//! Measures how long it takes to turn rule strings into descriptors.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ruleval::parser::{parse_rule_set, parse_rule_spec, RuleSpec};
use serde_json::json;

fn bench_single_field(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_field");

    let specs = [
        ("simple", RuleSpec::from("required")),
        ("piped", RuleSpec::from("required|string|min:3|max:50")),
        ("params", RuleSpec::from("required_if:type,admin,owner|in:a,b,c,d,e,f")),
        ("regex", RuleSpec::from("required|regex:/^[A-Z]{2},[0-9]{4}$/i")),
        (
            "list",
            RuleSpec::from(vec!["required", "string", "min:3", "max:50"]),
        ),
    ];

    for (name, spec) in &specs {
        group.bench_with_input(BenchmarkId::from_parameter(name), spec, |b, spec| {
            b.iter(|| parse_rule_spec(black_box(spec)))
        });
    }

    group.finish();
}

fn bench_rule_table(c: &mut Criterion) {
    let table = json!({
        "name": "required|string|min:3|max:50",
        "email": "required|email",
        "age": "nullable|integer|between:18,120",
        "password": "required|min:8|confirmed",
        "role": ["required", "in:admin,editor,viewer"],
        "starts_at": "required|date|after:2000-01-01",
        "ends_at": "required|date|after:starts_at",
    });

    c.bench_function("parse_rule_set", |b| {
        b.iter(|| parse_rule_set(black_box(table.clone())))
    });
}

criterion_group!(benches, bench_single_field, bench_rule_table);
criterion_main!(benches);
