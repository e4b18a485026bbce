// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The multi-threaded render.  Each worker owns a random stream and a
//! canvas-sized histogram; it samples seeds, plots their orbits into
//! its own histogram, and hands the histogram back when it is done.
//! Nothing is shared mutably while the workers run.  Once every worker
//! has been joined the partial histograms are summed on the calling
//! thread.

extern crate crossbeam;

use config::RenderConfig;
use crossbeam::thread::ScopedJoinHandle;
use errors::{ConfigError, RenderError};
use histogram::Histogram;
use num::Complex;
use planes::PlaneMapper;
use rand::rngs::StdRng;
use rand::SeedableRng;
use sampler::Samples;
use std::time::Instant;
use trajectory::{Fate, TrajectoryAccumulator};

// Spreads worker indices across the seed space so neighbouring seeds
// do not hand out overlapping streams.
const STREAM_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// The random stream for worker `worker`.  With a seed the stream is
/// reproducible; without one it comes from the operating system.
pub fn worker_rng(seed: Option<u64>, worker: usize) -> StdRng {
    match seed {
        Some(seed) => {
            StdRng::seed_from_u64(seed.wrapping_add((worker as u64).wrapping_mul(STREAM_STRIDE)))
        }
        None => StdRng::from_entropy(),
    }
}

/// How many of `total` samples worker `worker` of `threads` draws.
/// The remainder goes one apiece to the first workers.
pub fn share(total: usize, threads: usize, worker: usize) -> usize {
    total / threads + if worker < total % threads { 1 } else { 0 }
}

/// The Renderer contains the parameters by which a buddhabrot is
/// generated.  Once set, this object should not be mutable.
#[derive(Debug)]
pub struct Renderer {
    config: RenderConfig,
    plane: PlaneMapper,
}

impl Renderer {
    /// Validates the configuration; nothing is sampled until
    /// `render()`.
    pub fn new(config: RenderConfig) -> Result<Renderer, ConfigError> {
        let plane = config.validate()?;
        Ok(Renderer { config, plane })
    }

    /// The configuration this renderer was built with.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// The canvas.
    pub fn plane(&self) -> &PlaneMapper {
        &self.plane
    }

    /// Draw `config.samples` seeds, split between `config.threads`
    /// workers, and return the merged histogram.
    pub fn render(&self) -> Result<Histogram, RenderError> {
        let threads = self.config.threads;
        let samples = self.config.samples;
        info!(
            "calculate | {} threads | {}x{} | band ({}, {}) | {} samples of {}",
            threads,
            self.plane.width(),
            self.plane.height(),
            self.config.band.min,
            self.config.band.max,
            samples,
            self.config.fractal
        );
        self.in_parallel(|worker| {
            let count = share(samples, threads, worker);
            let seeds = Samples::over(
                self.plane.window(),
                self.config.fractal,
                worker_rng(self.config.seed, worker),
            )
            .take(count);
            self.plot_all(worker, count, seeds)
        })
    }

    /// Plot a batch of seeds the caller already has.  Worker `t` takes
    /// seeds t, t + W, t + 2W, ... for W workers.  Seeds inside the
    /// map's rejection set are skipped; `config.samples` is ignored.
    pub fn render_seeds(&self, seeds: &[Complex<f64>]) -> Result<Histogram, RenderError> {
        let threads = self.config.threads;
        let fractal = self.config.fractal;
        info!(
            "calculate | {} threads | {}x{} | {} given seeds",
            threads,
            self.plane.width(),
            self.plane.height(),
            seeds.len()
        );
        self.in_parallel(|worker| {
            let count = share(seeds.len(), threads, worker);
            let mine = seeds
                .iter()
                .skip(worker)
                .step_by(threads)
                .cloned()
                .filter(|c| !fractal.is_rejected(c));
            self.plot_all(worker, count, mine)
        })
    }

    /// Run `job` once per worker on scoped threads, then sum what
    /// they return.
    fn in_parallel<F>(&self, job: F) -> Result<Histogram, RenderError>
    where
        F: Fn(usize) -> Histogram + Sync,
    {
        let start = Instant::now();
        let job = &job;
        let partials = crossbeam::scope(|spawner| {
            let handles: Vec<ScopedJoinHandle<Histogram>> = (0..self.config.threads)
                .map(|worker| spawner.spawn(move |_| job(worker)))
                .collect();
            handles
                .into_iter()
                .map(|handle| handle.join())
                .collect::<Result<Vec<Histogram>, _>>()
        });

        let partials = match partials {
            Ok(Ok(partials)) => partials,
            _ => return Err(RenderError::WorkerPanicked),
        };

        let merged = Histogram::merge_all(self.plane.width(), self.plane.height(), partials);
        let elapsed = start.elapsed();
        info!(
            "calculate | finished in {}.{:02}s",
            elapsed.as_secs(),
            elapsed.subsec_millis() / 10
        );
        Ok(merged)
    }

    /// One worker's whole share: a private histogram, and every seed
    /// in `seeds` plotted into it.  `count` is only used for progress.
    fn plot_all<I>(&self, worker: usize, count: usize, seeds: I) -> Histogram
    where
        I: Iterator<Item = Complex<f64>>,
    {
        let mut histogram = Histogram::new(self.plane.width(), self.plane.height());
        let mut accumulator =
            TrajectoryAccumulator::new(&self.plane, self.config.fractal, self.config.band);
        let every = ::std::cmp::max(count / 100, 1);
        let mut plotted = 0;
        for (i, seed) in seeds.enumerate() {
            if worker == 0 && i % every == 0 {
                debug!("calculate | {}%", 100 * i / ::std::cmp::max(count, 1));
            }
            if let Fate::Plotted(_) = accumulator.accumulate(seed, &mut histogram) {
                plotted += 1;
            }
        }
        debug!(
            "calculate | worker {} plotted {} of {} orbits",
            worker, plotted, count
        );
        histogram
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fractal::Fractal;
    use planes::ViewWindow;
    use trajectory::IterationBand;

    fn config(threads: usize, seed: Option<u64>) -> RenderConfig {
        RenderConfig {
            width: 48,
            window: ViewWindow::new((-2.0, 2.0), (-1.5, 1.5)),
            band: IterationBand::new(2, 200),
            samples: 4000,
            threads,
            percentile: 3.0,
            fractal: Fractal::Quadratic,
            seed,
        }
    }

    #[test]
    fn shares_cover_the_total() {
        for &(total, threads) in &[(10, 3), (2, 5), (0, 4), (1000, 7)] {
            let sum: usize = (0..threads).map(|t| share(total, threads, t)).sum();
            assert_eq!(sum, total);
        }
        assert_eq!(share(10, 3, 0), 4);
        assert_eq!(share(10, 3, 2), 3);
    }

    #[test]
    fn renderer_rejects_bad_config() {
        let bad = RenderConfig {
            samples: 0,
            ..config(2, None)
        };
        assert_eq!(Renderer::new(bad).unwrap_err(), ConfigError::ZeroSamples);
    }

    #[test]
    fn render_fills_a_canvas_sized_histogram() {
        let renderer = Renderer::new(config(3, Some(42))).unwrap();
        let histogram = renderer.render().unwrap();
        assert_eq!(histogram.width(), 48);
        assert_eq!(histogram.height(), 36);
        assert!(histogram.total() > 0);
    }

    #[test]
    fn seeded_render_is_reproducible() {
        let a = Renderer::new(config(4, Some(7))).unwrap().render().unwrap();
        let b = Renderer::new(config(4, Some(7))).unwrap().render().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_differ() {
        let a = Renderer::new(config(2, Some(1))).unwrap().render().unwrap();
        let b = Renderer::new(config(2, Some(2))).unwrap().render().unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn fixed_seeds_render_the_same_on_any_worker_count() {
        let seeds = ::sampler::generate(
            3000,
            &ViewWindow::new((-2.0, 2.0), (-1.5, 1.5)),
            Fractal::Quadratic,
            StdRng::seed_from_u64(5),
        )
        .unwrap();
        let one = Renderer::new(config(1, None)).unwrap().render_seeds(&seeds).unwrap();
        let three = Renderer::new(config(3, None)).unwrap().render_seeds(&seeds).unwrap();
        let many = Renderer::new(config(16, None)).unwrap().render_seeds(&seeds).unwrap();
        assert_eq!(one, three);
        assert_eq!(one, many);
    }

    #[test]
    fn rejected_seeds_are_never_plotted() {
        // A window so small that -0.1, deep inside the cardioid, steps
        // off it on the second iteration.
        let config = RenderConfig {
            window: ViewWindow::new((-0.12, -0.095), (-0.01, 0.01)),
            band: IterationBand::new(0, 50),
            ..config(2, None)
        };
        let seed = Complex::new(-0.1, 0.0);
        assert!(config.fractal.is_rejected(&seed));

        let renderer = Renderer::new(config).unwrap();
        let mut direct = Histogram::new(renderer.plane().width(), renderer.plane().height());
        let mut accumulator =
            TrajectoryAccumulator::new(renderer.plane(), Fractal::Quadratic, IterationBand::new(0, 50));
        assert_eq!(accumulator.accumulate(seed, &mut direct), Fate::Plotted(1));

        let histogram = renderer.render_seeds(&[seed, seed, seed]).unwrap();
        assert_eq!(histogram.total(), 0);
    }
}
