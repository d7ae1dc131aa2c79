//! Benches generating noise fields of various sizes and octave counts.
#![expect(
    missing_docs,
    reason = "Its a benchmark and cirterion macros don't add docs."
)]

use bevy_math::UVec2;
use criterion::{measurement::WallTime, *};
use octave_field::prelude::*;

const SIZE: u32 = 512;

criterion_main!(benches);
criterion_group!(benches, stages, entry_points);

fn stages(c: &mut Criterion) {
    let mut group = c.benchmark_group("stages");
    group.warm_up_time(core::time::Duration::from_millis(500));
    group.measurement_time(core::time::Duration::from_secs(4));

    let size = UVec2::splat(SIZE);
    group.bench_function("base", |bencher| {
        let mut rng = NoiseRng(0);
        bencher.iter(|| QuantizedValue::default().generate(black_box(size), &mut rng));
    });

    let field = NoiseField::random(size, &mut NoiseRng(0)).unwrap();
    group.bench_function("smooth linear", |bencher| {
        bencher.iter(|| field.smooth(black_box(Octave(2))));
    });
    let smoothstep = field.clone().with_curve(Smoothstep);
    group.bench_function("smooth smoothstep", |bencher| {
        bencher.iter(|| smoothstep.smooth(black_box(Octave(2))));
    });

    let octaves = field.octaves(6).unwrap();
    group.bench_function("blend 6 octaves", |bencher| {
        bencher.iter(|| blend_octaves(black_box(&octaves), &Persistence::new(0.5, 1.0)));
    });
}

fn entry_points(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    group.warm_up_time(core::time::Duration::from_millis(500));
    group.measurement_time(core::time::Duration::from_secs(4));

    persistence(&mut group, 1);
    persistence(&mut group, 4);
    persistence(&mut group, 8);

    group.bench_function("prominence 4 octaves", |bencher| {
        let mut rng = NoiseRng(0);
        bencher.iter(|| {
            generate_noise_with_prominence(SIZE, SIZE, 4, black_box(&[8.0f32, 4.0, 2.0, 1.0][..]), &mut rng)
        });
    });
}

fn persistence(group: &mut BenchmarkGroup<WallTime>, octaves: u32) {
    let octaves = black_box(octaves);
    group.bench_function(format!("persistence {octaves} octaves"), |bencher| {
        let mut rng = NoiseRng(0);
        bencher.iter(|| generate_noise(SIZE, SIZE, octaves, 0.5, 1.0, &mut rng));
    });
}
