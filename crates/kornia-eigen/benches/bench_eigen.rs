use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use kornia_eigen::eigen::{smallest_eigenpair3, symmetric_eigen2, symmetric_eigen3};
use kornia_eigen::inverse::{invert3x3, invert3x3_symmetric};
use kornia_eigen::umeyama::umeyama3;
use kornia_eigen::{Affine3, Mat2, Mat3, Vec3};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::hint::black_box;

fn bench_eigen(c: &mut Criterion) {
    let mut group = c.benchmark_group("eigen");

    let m2 = Mat2::symmetric(4.0f64, -1.5, 0.5);
    let m3 = Mat3::symmetric(4.0f64, 1.0, 0.5, 3.0, 0.25, 2.0);
    let m3_f32 = Mat3::symmetric(4.0f32, 1.0, 0.5, 3.0, 0.25, 2.0);

    group.bench_function(BenchmarkId::new("symmetric_eigen2", "f64"), |b| {
        b.iter(|| symmetric_eigen2(black_box(&m2)))
    });

    group.bench_function(BenchmarkId::new("symmetric_eigen3", "f64"), |b| {
        b.iter(|| symmetric_eigen3(black_box(&m3)))
    });

    group.bench_function(BenchmarkId::new("symmetric_eigen3", "f32"), |b| {
        b.iter(|| symmetric_eigen3(black_box(&m3_f32)))
    });

    group.bench_function(BenchmarkId::new("smallest_eigenpair3", "f64"), |b| {
        b.iter(|| smallest_eigenpair3(black_box(&m3)))
    });

    group.bench_function(BenchmarkId::new("invert3x3_symmetric", "f64"), |b| {
        b.iter(|| invert3x3_symmetric(black_box(&m3)))
    });

    group.bench_function(BenchmarkId::new("invert3x3", "f64"), |b| {
        b.iter(|| invert3x3(black_box(&m3)))
    });

    group.finish();
}

fn bench_umeyama(c: &mut Criterion) {
    let mut group = c.benchmark_group("umeyama");
    let mut rng = StdRng::seed_from_u64(0);
    let pose = Affine3::from_translation_euler(1.0, -2.0, 0.5, 0.3, -0.2, 1.1);

    for n in [10, 100, 1000] {
        let src = (0..n)
            .map(|_| {
                Vec3::new(
                    rng.random_range(-1.0..1.0),
                    rng.random_range(-1.0..1.0),
                    rng.random_range(-1.0..1.0),
                )
            })
            .collect::<Vec<_>>();
        let dst = src
            .iter()
            .map(|&p| pose.transform_point(p))
            .collect::<Vec<_>>();

        group.bench_with_input(BenchmarkId::new("umeyama3", n), &n, |b, _| {
            b.iter(|| umeyama3(black_box(&src), black_box(&dst), true))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_eigen, bench_umeyama);
criterion_main!(benches);
