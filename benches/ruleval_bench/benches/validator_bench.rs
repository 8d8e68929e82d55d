//! Validation throughput benchmarks
//!
//! Compares building a session per record against reusing one session with
//! `set_data`.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ruleval::{record, Record, Validator};
use serde_json::json;

const RULES: [(&str, &str); 6] = [
    ("name", "required|string|min:3|max:50"),
    ("email", "required|email"),
    ("age", "nullable|integer|between:18,120"),
    ("password", "required|min:8|confirmed"),
    ("role", "required|in:admin,editor,viewer"),
    ("ends_at", "required|date|after:starts_at"),
];

fn user(i: usize) -> Record {
    let valid = i % 3 != 0;
    record(json!({
        "name": if valid { format!("user{i}") } else { String::new() },
        "email": format!("user{i}@example.com"),
        "age": 18 + (i % 80),
        "password": "correct horse",
        "password_confirmation": if valid { "correct horse" } else { "battery staple" },
        "role": if valid { "editor" } else { "root" },
        "starts_at": "2024-01-01",
        "ends_at": "2024-06-30",
    }))
}

fn bench_single_record(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate_record");

    for (label, i) in [("valid", 1), ("invalid", 3)] {
        let data = user(i);
        group.bench_with_input(BenchmarkId::from_parameter(label), &data, |b, data| {
            b.iter(|| {
                let mut validator = Validator::new(data.clone(), RULES);
                black_box(validator.passes())
            })
        });
    }

    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate_batch");

    for size in [10usize, 100, 1000] {
        let records: Vec<Record> = (0..size).map(user).collect();
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("new_session", size), &records, |b, records| {
            b.iter(|| {
                records
                    .iter()
                    .filter(|data| {
                        let mut validator = Validator::new((*data).clone(), RULES);
                        matches!(validator.passes(), Ok(true))
                    })
                    .count()
            })
        });

        group.bench_with_input(BenchmarkId::new("set_data", size), &records, |b, records| {
            let mut validator = Validator::new(Record::new(), RULES);
            b.iter(|| {
                records
                    .iter()
                    .filter(|data| {
                        validator.set_data((*data).clone());
                        matches!(validator.passes(), Ok(true))
                    })
                    .count()
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_single_record, bench_batch);
criterion_main!(benches);
