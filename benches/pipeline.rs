//! Benchmarks for the artgrid pipeline.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use artgrid::types::{BigBlockSpec, Chaos, GridSpec, PaletteStore, Seed};
use artgrid::{generate_characters, render_png, render_svg, CharacterSpec, GridRequest};

fn request(rows: u32, cols: u32, cell_size: u32) -> GridRequest {
    GridRequest {
        grid: GridSpec::new(rows, cols, cell_size),
        palette: 0,
        styles: Vec::new(),
        chaos: Chaos::new(0.5),
        seed: Seed::fixed(42),
        big_block: BigBlockSpec::default(),
    }
}

// -- Grid benchmarks --

fn bench_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid");
    let store = PaletteStore::builtin();

    let small = request(4, 4, 80);
    let default = request(6, 6, 100);

    group.bench_function("png_4x4", |b| {
        b.iter(|| render_png(black_box(&small), &store).unwrap())
    });

    group.bench_function("png_6x6", |b| {
        b.iter(|| render_png(black_box(&default), &store).unwrap())
    });

    group.bench_function("svg_6x6", |b| {
        b.iter(|| render_svg(black_box(&default), &store).unwrap().artifact.to_string())
    });

    group.finish();
}

// -- Rotated and faded motifs --

fn bench_rotated_styles(c: &mut Criterion) {
    let mut group = c.benchmark_group("rotated");
    let store = PaletteStore::builtin();

    let mut request = request(6, 6, 100);
    request.styles = ["cross", "rotated_shape", "letter_block"]
        .map(String::from)
        .to_vec();
    request.chaos = Chaos::new(1.0);

    group.bench_function("png_6x6_chaos_1", |b| {
        b.iter(|| render_png(black_box(&request), &store).unwrap())
    });

    group.finish();
}

// -- Character sheets --

fn bench_characters(c: &mut Criterion) {
    let spec = CharacterSpec {
        count: 10,
        ..CharacterSpec::default()
    };

    c.bench_function("characters_10", |b| {
        b.iter(|| generate_characters(black_box(&spec), Seed::fixed(1)).unwrap().to_string())
    });
}

criterion_group!(benches, bench_grid, bench_rotated_styles, bench_characters);
criterion_main!(benches);
