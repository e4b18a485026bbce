// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seed generation by rejection sampling.  Candidates are drawn
//! uniformly over the view window, one independent draw per axis, and
//! redrawn until they fall outside every region the chosen map is
//! known never to escape from.

use errors::ConfigError;
use fractal::Fractal;
use num::Complex;
use planes::ViewWindow;
use rand::distributions::{Distribution, Uniform};
use rand::Rng;

/// An endless stream of accepted seeds.  Owns its random source, so
/// each worker gets a stream nobody else draws from.
pub struct Samples<R: Rng> {
    re: Uniform<f64>,
    im: Uniform<f64>,
    fractal: Fractal,
    rng: R,
}

impl<R: Rng> Samples<R> {
    /// A stream over `window`, which must be valid.
    pub fn new(window: &ViewWindow, fractal: Fractal, rng: R) -> Result<Self, ConfigError> {
        window.validate()?;
        Ok(Samples::over(window, fractal, rng))
    }

    // For windows a `PlaneMapper` has already validated.
    pub(crate) fn over(window: &ViewWindow, fractal: Fractal, rng: R) -> Self {
        Samples {
            re: Uniform::new(window.real.0, window.real.1),
            im: Uniform::new(window.imag.0, window.imag.1),
            fractal,
            rng,
        }
    }

    fn candidate(&mut self) -> Complex<f64> {
        Complex::new(self.re.sample(&mut self.rng), self.im.sample(&mut self.rng))
    }
}

impl<R: Rng> Iterator for Samples<R> {
    type Item = Complex<f64>;

    fn next(&mut self) -> Option<Complex<f64>> {
        loop {
            let c = self.candidate();
            if !self.fractal.is_rejected(&c) {
                return Some(c);
            }
        }
    }
}

/// Exactly `count` accepted seeds drawn from `rng`.
pub fn generate<R: Rng>(
    count: usize,
    window: &ViewWindow,
    fractal: Fractal,
    rng: R,
) -> Result<Vec<Complex<f64>>, ConfigError> {
    Ok(Samples::new(window, fractal, rng)?.take(count).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn generate_yields_exactly_count() {
        let seeds = generate(
            1234,
            &ViewWindow::default(),
            Fractal::Quadratic,
            StdRng::seed_from_u64(7),
        )
        .unwrap();
        assert_eq!(seeds.len(), 1234);
    }

    #[test]
    fn seeds_avoid_the_rejection_set_and_stay_in_window() {
        let window = ViewWindow::new((-2.0, 1.0), (-1.5, 1.5));
        for &fractal in &Fractal::ALL {
            let seeds = generate(5000, &window, fractal, StdRng::seed_from_u64(11)).unwrap();
            for c in &seeds {
                assert!(!fractal.is_rejected(c));
                assert!(window.contains(c));
            }
        }
    }

    #[test]
    fn window_mostly_inside_the_cardioid_still_fills() {
        let window = ViewWindow::new((-0.5, 0.5), (-0.2, 0.2));
        let seeds = generate(100, &window, Fractal::Quadratic, StdRng::seed_from_u64(3)).unwrap();
        assert_eq!(seeds.len(), 100);
        assert!(seeds.iter().all(|c| !in_cardioid_or_disk(c)));
    }

    fn in_cardioid_or_disk(c: &Complex<f64>) -> bool {
        ::fractal::in_cardioid(c) || ::fractal::in_period2_disk(c)
    }

    #[test]
    fn same_seed_same_stream() {
        let a = generate(50, &ViewWindow::default(), Fractal::Cubic, StdRng::seed_from_u64(99));
        let b = generate(50, &ViewWindow::default(), Fractal::Cubic, StdRng::seed_from_u64(99));
        assert_eq!(a.unwrap(), b.unwrap());
    }

    #[test]
    fn degenerate_window_is_an_error() {
        let flat = ViewWindow::new((1.0, 1.0), (-1.0, 1.0));
        match generate(10, &flat, Fractal::Quadratic, StdRng::seed_from_u64(1)) {
            Err(ConfigError::DegenerateInterval { axis, .. }) => assert_eq!(axis, "real"),
            other => panic!("expected a degenerate interval, got {:?}", other),
        }
        let reversed = ViewWindow::new((-1.0, 1.0), (2.0, -2.0));
        assert!(Samples::new(&reversed, Fractal::Cubic, StdRng::seed_from_u64(1)).is_err());
    }
}
