use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use gridlight::core::{Grid, IntensityFilter, RayTracer};
use gridlight::engine::{build_cave, Character, GameObject, InputState, RayEmitter};
use gridlight::render::{PixelBuffer, Rgb, ShadowShader};
use gridlight::types::ShadowQuality;

const W: usize = 1280;
const H: usize = 720;

fn cave_grid() -> Grid {
    let mut grid = Grid::for_image(W, H).unwrap();
    build_cave(&mut grid);
    grid
}

fn demo_character() -> Character {
    let mut character = Character::new(W as f32 * 0.25, H as f32 * 0.55, (W as f32, H as f32), 12345);
    character.update(Duration::from_millis(16), &InputState::default());
    character
}

fn bench_cast(c: &mut Criterion) {
    let tracer = RayTracer::new(12345);
    let mut grid = cave_grid();
    let mut character = demo_character();

    c.bench_function("cast_6000_rays", |b| {
        b.iter(|| {
            let rays = character.emit();
            tracer.cast(&mut grid, black_box(rays));
            grid.reset_intensities();
        })
    });
}

fn bench_cast_serial(c: &mut Criterion) {
    let tracer = RayTracer::new(12345);
    let mut grid = cave_grid();
    let mut character = demo_character();

    c.bench_function("cast_6000_rays_serial", |b| {
        b.iter(|| {
            let rays = character.emit();
            tracer.cast_serial(&mut grid, black_box(rays));
            grid.reset_intensities();
        })
    });
}

fn bench_filter_update(c: &mut Criterion) {
    let tracer = RayTracer::new(12345);
    let mut grid = cave_grid();
    let mut character = demo_character();

    tracer.cast(&mut grid, character.emit());
    let mut filter = IntensityFilter::new(grid.rows(), grid.cols());

    c.bench_function("filter_update", |b| {
        b.iter(|| {
            filter.update(black_box(&grid));
        })
    });
}

fn bench_shading(c: &mut Criterion) {
    let tracer = RayTracer::new(12345);
    let mut grid = cave_grid();
    let mut character = demo_character();

    tracer.cast(&mut grid, character.emit());
    let mut filter = IntensityFilter::new(grid.rows(), grid.cols());
    filter.update(&grid);

    let shader = ShadowShader::new();
    let background = PixelBuffer::filled(W, H, Rgb::new(60, 70, 90));
    let mut frame = PixelBuffer::new(W, H);

    c.bench_function("mesh_shade_1280x720", |b| {
        b.iter(|| {
            shader
                .render(ShadowQuality::Mesh, &mut frame, &background, &filter)
                .unwrap();
        })
    });

    c.bench_function("smooth_shade_1280x720", |b| {
        b.iter(|| {
            shader
                .render(ShadowQuality::Smooth, &mut frame, &background, &filter)
                .unwrap();
        })
    });
}

criterion_group!(
    benches,
    bench_cast,
    bench_cast_serial,
    bench_filter_update,
    bench_shading
);
criterion_main!(benches);
