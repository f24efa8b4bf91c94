//! Benchmarks for breakpoint dispatch.
//!
//! These benchmarks measure:
//! - Fan-out of a single threshold crossing to many subscribers
//! - The cost of attaching and detaching the listeners on the first and last
//!   subscription
//!
//! Run with: cargo bench --bench dispatch

use std::hint::black_box;
use std::rc::Rc;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use floem_responsive::{GridBreakpoints, ResponsiveObserver, SimulatedViewport};

fn bench_fan_out(c: &mut Criterion) {
    let mut group = c.benchmark_group("fan_out");

    for subscribers in [1, 10, 100, 1000] {
        let viewport = SimulatedViewport::new(800.0);
        let observer =
            ResponsiveObserver::new(Rc::new(viewport.clone()), &GridBreakpoints::default());
        for _ in 0..subscribers {
            observer.subscribe(|screens| {
                black_box(screens);
            });
        }

        group.bench_with_input(
            BenchmarkId::from_parameter(subscribers),
            &subscribers,
            |b, _| {
                let mut wide = false;
                b.iter(|| {
                    wide = !wide;
                    viewport.resize(if wide { 1000.0 } else { 800.0 });
                });
            },
        );
    }

    group.finish();
}

fn bench_register_cycle(c: &mut Criterion) {
    let viewport = SimulatedViewport::new(800.0);
    let observer = ResponsiveObserver::new(Rc::new(viewport), &GridBreakpoints::default());

    c.bench_function("subscribe_unsubscribe_first", |b| {
        b.iter(|| {
            let token = observer.subscribe(|screens| {
                black_box(screens);
            });
            observer.unsubscribe(black_box(token));
        });
    });
}

criterion_group!(benches, bench_fan_out, bench_register_cycle);
criterion_main!(benches);
