// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

#[macro_use]
extern crate criterion;
extern crate buddhabrot;
extern crate rand;

use buddhabrot::sampler;
use buddhabrot::{stretch, Fractal, Histogram, IterationBand, PlaneMapper, TrajectoryAccumulator, ViewWindow};
use criterion::Criterion;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn accumulate(c: &mut Criterion) {
    let plane = PlaneMapper::new(400, ViewWindow::default()).unwrap();
    let seeds = sampler::generate(
        1000,
        plane.window(),
        Fractal::Quadratic,
        StdRng::seed_from_u64(1),
    )
    .unwrap();
    c.bench_function("accumulate 1000 quadratic orbits", move |b| {
        let mut histogram = Histogram::new(plane.width(), plane.height());
        let mut orbits = TrajectoryAccumulator::new(&plane, Fractal::Quadratic, IterationBand::new(0, 1000));
        b.iter(|| {
            for seed in &seeds {
                orbits.accumulate(*seed, &mut histogram);
            }
        })
    });
}

fn contrast(c: &mut Criterion) {
    let cells: Vec<u32> = (0..400 * 400).map(|i| (i * 7919 % 1013) as u32).collect();
    let histogram = Histogram::from_cells(400, 400, cells);
    c.bench_function("stretch 400x400", move |b| b.iter(|| stretch(&histogram, 3.0)));
}

criterion_group!(benches, accumulate, contrast);
criterion_main!(benches);
