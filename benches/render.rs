#[macro_use]
extern crate criterion;
extern crate escapade;
extern crate num;

use criterion::Criterion;
use escapade::{rules, Fractal, Pixel};
use num::Complex;

fn mandelbrot(c: &mut Criterion) {
    let fractal = Fractal::builder().width(32).depth(200).build().unwrap();
    c.bench_function("escape time 64x64", move |b| b.iter(|| fractal.render()));
}

fn orbit_trap(c: &mut Criterion) {
    let fractal = Fractal::builder()
        .width(32)
        .depth(200)
        .trap(rules::point_trap(Complex::new(0.25, 0.0)))
        .build()
        .unwrap();
    c.bench_function("orbit trap 64x64", move |b| b.iter(|| fractal.render()));
}

fn single_pixel(c: &mut Criterion) {
    let fractal = Fractal::builder().depth(10_000).build().unwrap();
    c.bench_function("interior pixel", move |b| {
        b.iter(|| fractal.sample(Pixel(0, 0)))
    });
}

criterion_group!(benches, mandelbrot, orbit_trap, single_pixel);
criterion_main!(benches);
