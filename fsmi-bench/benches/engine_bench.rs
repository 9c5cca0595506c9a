//! Execution engine benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fsmi_core::{execute, symbols, Engine, Table, Tuple};

fn ring_table(states: i32) -> Table {
    Table::from_tuples((0..states).flat_map(|state| {
        ('a'..='z').enumerate().map(move |(i, symbol)| {
            Tuple::new(state, symbol.to_string(), "x", (state + i as i32) % states)
        })
    }))
}

fn input(len: usize) -> String {
    ('a'..='z').cycle().take(len).collect()
}

fn bench_execute(c: &mut Criterion) {
    let mut group = c.benchmark_group("execute");

    for states in [10, 1000] {
        let table = ring_table(states);
        let line = input(10_000);
        group.throughput(Throughput::Elements(line.len() as u64));

        group.bench_with_input(BenchmarkId::new("ring", states), &line, |b, line| {
            b.iter(|| {
                let mut emitted = 0usize;
                let summary = execute(&table, symbols(line), |o| {
                    emitted += o.len();
                    Ok(())
                })
                .unwrap();
                black_box((summary, emitted))
            })
        });
    }

    group.finish();
}

fn bench_step(c: &mut Criterion) {
    let table = ring_table(100);

    c.bench_function("step_first_match", |b| {
        b.iter(|| {
            let mut engine = Engine::new(&table).unwrap();
            black_box(engine.step('a').unwrap())
        })
    });

    c.bench_function("step_last_match", |b| {
        b.iter(|| {
            let mut engine = Engine::new(&table).unwrap();
            black_box(engine.step('z').unwrap())
        })
    });

    // Dangling destinations keep the run at the initial state
    let dangling = Table::from_tuples(
        ('a'..='z').map(|symbol| Tuple::new(0, symbol.to_string(), "x", -1)),
    );
    let line = input(10_000);
    c.bench_function("execute_dangling", |b| {
        b.iter(|| black_box(execute(&dangling, symbols(&line), |_| Ok(())).unwrap()))
    });
}

criterion_group!(benches, bench_execute, bench_step);
criterion_main!(benches);
