use criterion::{criterion_group, criterion_main, Criterion};
use santa_core::{GroupSize, RngHandle, TrialCount};
use santa_prob::{enumerate, simulate, Procedure};

fn bench_exact(c: &mut Criterion) {
    let group = GroupSize::new(8).unwrap();
    c.bench_function("exact_ordered_n8", |b| {
        b.iter(|| enumerate(group, Procedure::Ordered).unwrap())
    });
}

fn bench_monte_carlo(c: &mut Criterion) {
    let group = GroupSize::new(20).unwrap();
    let trials = TrialCount::new(10_000).unwrap();
    c.bench_function("monte_carlo_n20_10k", |b| {
        b.iter(|| {
            let mut rng = RngHandle::from_seed(7);
            simulate(group, trials, Procedure::Ordered, &mut rng).unwrap()
        })
    });
}

criterion_group!(benches, bench_exact, bench_monte_carlo);
criterion_main!(benches);
