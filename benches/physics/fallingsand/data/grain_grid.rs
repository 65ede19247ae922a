use criterion::{black_box, criterion_group, Criterion};
use granular_sand::physics::fallingsand::data::grain_grid::GrainGrid;
use granular_sand::physics::fallingsand::util::color::GrainColor;
use granular_sand::physics::fallingsand::util::units::FallVelocity;
use granular_sand::RawImage;

/// A default sized grid with every other cell full
fn get_checkered_grid() -> GrainGrid {
    let mut grid = GrainGrid::try_new_empty(200, 350).unwrap();
    for idx in (0..grid.total_size()).step_by(2) {
        grid.spawn(idx, FallVelocity(1.0), GrainColor::SAND);
    }
    grid
}

fn bench_draw_into(c: &mut Criterion) {
    let grid = get_checkered_grid();
    let mut image = RawImage::new_blank(grid.get_width(), grid.get_height());
    c.bench_function("grain_grid_draw_into", |b| {
        b.iter(|| grid.draw_into(black_box(&mut image)))
    });
}

fn bench_count_occupied(c: &mut Criterion) {
    let grid = get_checkered_grid();
    c.bench_function("grain_grid_count_occupied", |b| {
        b.iter(|| black_box(grid.count_occupied()))
    });
}

criterion_group!(benches, bench_draw_into, bench_count_occupied);
