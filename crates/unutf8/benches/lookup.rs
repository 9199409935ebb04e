use std::fmt::Write;
use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use unutf8::opt::Options;
use unutf8::CodePointTable;

pub fn run_benchmarks(c: &mut Criterion) {
    // A synthetic table with every third code present.
    let mut source = String::new();
    for index in 0_u32..4_096 {
        writeln!(source, "{:X} SYNTHETIC NAME {}", 3 * index, index)
            .expect("writing to a string does not fail");
    }

    let table = CodePointTable::parse(&Options::default(), source.as_bytes())
        .expect("synthetic table is well-formed");

    let mut group = c.benchmark_group("table-lookup");

    group.bench_function("hit", |b| b.iter(|| table.lookup(black_box(3 * 2_048))));

    group.bench_function("miss", |b| b.iter(|| table.lookup(black_box(3 * 2_048 + 1))));

    group.finish();
}

criterion_group!(benches, run_benchmarks);
criterion_main!(benches);
