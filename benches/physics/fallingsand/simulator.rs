use criterion::{black_box, criterion_group, BatchSize, Criterion};
use granular_sand::{GranularSimulator, NormalizedPoint, SimulatorBuilder};

/// The default sized grid with its top third full of falling sand
fn get_busy_simulator() -> GranularSimulator {
    let mut sim = SimulatorBuilder::new().seed(7).build().unwrap();
    for i in 0..20 {
        let x = (i as f32 + 0.5) / 20.0;
        for j in 0..10 {
            let y = j as f32 / 30.0;
            sim.deposit(NormalizedPoint::new(x, y), 6);
        }
    }
    sim
}

fn bench_step_busy(c: &mut Criterion) {
    c.bench_function("step_busy_grid", |b| {
        b.iter_batched(
            get_busy_simulator,
            |mut sim| {
                black_box(sim.step());
            },
            BatchSize::LargeInput,
        )
    });
}

fn bench_step_empty(c: &mut Criterion) {
    let mut sim = GranularSimulator::new(200, 350).unwrap();
    c.bench_function("step_empty_grid", |b| b.iter(|| black_box(sim.step())));
}

fn bench_deposit(c: &mut Criterion) {
    let mut sim = GranularSimulator::new(200, 350).unwrap();
    c.bench_function("deposit_radius_8", |b| {
        b.iter(|| {
            sim.clear();
            black_box(sim.deposit(NormalizedPoint::new(0.5, 0.5), 8));
        })
    });
}

criterion_group!(benches, bench_step_busy, bench_step_empty, bench_deposit);
