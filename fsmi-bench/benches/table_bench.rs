//! Description parsing and table construction benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fsmi_core::{parse_table, LoadOptions, Table, Tuple};

/// A ring of `states` states, each accepting every lowercase letter.
fn ring_description(states: i32) -> String {
    let mut text = String::new();
    for state in 0..states {
        for (i, symbol) in ('a'..='z').enumerate() {
            let next = (state + i as i32) % states;
            text.push_str(&format!("{} {} {}{} {}\n", state, symbol, symbol, state, next));
        }
    }
    text
}

fn bench_parse_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_table");

    for states in [10, 100, 1000] {
        let text = ring_description(states);
        group.throughput(Throughput::Bytes(text.len() as u64));

        group.bench_with_input(BenchmarkId::new("lenient", states), &text, |b, text| {
            b.iter(|| black_box(parse_table(text, LoadOptions::default()).unwrap()))
        });

        group.bench_with_input(BenchmarkId::new("strict", states), &text, |b, text| {
            b.iter(|| black_box(parse_table(text, LoadOptions::strict()).unwrap()))
        });
    }

    group.finish();
}

fn bench_from_tuples(c: &mut Criterion) {
    let tuples: Vec<Tuple> = (0..1000)
        .flat_map(|state| {
            ('a'..='e').map(move |symbol| Tuple::new(state, symbol.to_string(), "o", state + 1))
        })
        .collect();

    c.bench_function("from_tuples_5000", |b| {
        b.iter(|| black_box(Table::from_tuples(tuples.clone())))
    });
}

criterion_group!(benches, bench_parse_table, bench_from_tuples);
criterion_main!(benches);
