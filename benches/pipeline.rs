//! Benchmarks for tagvalue pipeline throughput.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use fix_highlow_reporter::Pipeline;

/// Generate `count` well-formed order messages across a handful of
/// accounts, with some ignored fields mixed in.
fn create_test_input(count: usize) -> Vec<u8> {
    let accounts = ["ACME", "FOO", "BAR", "BAZ", "QUX"];
    let mut input = Vec::with_capacity(count * 40);

    for i in 0..count {
        let account = accounts[i % accounts.len()];
        let whole = 100 + (i % 50);
        let frac = i % 100;
        let line = format!("8=FIX.4.2|1={account}|35=D|54=1|44={whole}.{frac:02}\n");
        input.extend_from_slice(line.as_bytes());
    }

    input
}

fn bench_pipeline(c: &mut Criterion) {
    let input = create_test_input(10_000);

    let mut group = c.benchmark_group("pipeline");
    group.throughput(Throughput::Elements(10_000));

    group.bench_function("run_orders", |b| {
        b.iter(|| {
            let mut diag = Vec::new();
            let summary = Pipeline::new(black_box(&input[..]), &mut diag)
                .run()
                .unwrap();
            black_box(summary.accounts.len())
        })
    });

    group.finish();
}

fn bench_purge_heavy(c: &mut Criterion) {
    // Every other message lacks the order-placement type.
    let mut input = Vec::new();
    for i in 0..10_000 {
        let line = if i % 2 == 0 {
            format!("1=ACME|35=D|44={}.5\n", 100 + (i % 20))
        } else {
            format!("1=ACME|35=8|44={}.5\n", 100 + (i % 20))
        };
        input.extend_from_slice(line.as_bytes());
    }

    let mut group = c.benchmark_group("pipeline");
    group.throughput(Throughput::Elements(10_000));

    group.bench_function("run_half_purged", |b| {
        b.iter(|| {
            let mut diag = Vec::new();
            let summary = Pipeline::new(black_box(&input[..]), &mut diag)
                .run()
                .unwrap();
            black_box(summary.stats.messages_purged)
        })
    });

    group.finish();
}

criterion_group!(benches, bench_pipeline, bench_purge_heavy);
criterion_main!(benches);
