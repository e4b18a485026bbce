// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Following a single seed's orbit and, if it leaves the canvas at
//! an interesting moment, crediting every pixel it passed through.

use errors::ConfigError;
use fractal::Fractal;
use histogram::Histogram;
use num::Complex;
use planes::PlaneMapper;

// Longer orbits grow the scratch list on demand.
const MAX_PREALLOCATED: usize = 1 << 16;

/// The escape iterations whose orbits are worth plotting.  An orbit
/// that escapes at iteration `i` counts only if `min < i < max`; `max`
/// is also the iteration limit.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct IterationBand {
    /// Orbits escaping at or before this iteration are too short.
    pub min: usize,
    /// Orbits still on the canvas at this iteration are treated as
    /// bounded.
    pub max: usize,
}

impl IterationBand {
    /// Constructor.  Does not validate; see `validate()`.
    pub fn new(min: usize, max: usize) -> IterationBand {
        IterationBand { min, max }
    }

    /// `min` must be below `max`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min >= self.max {
            return Err(ConfigError::EmptyBand(self.min, self.max));
        }
        Ok(())
    }

    /// Strict membership, at both ends.
    #[inline]
    pub fn contains(&self, escape: usize) -> bool {
        self.min < escape && escape < self.max
    }
}

impl Default for IterationBand {
    fn default() -> IterationBand {
        IterationBand::new(0, 1000)
    }
}

/// What became of an orbit.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Fate {
    /// Still on the canvas after the full iteration budget.
    Bounded,
    /// Left the canvas outside the band; nothing was plotted.
    Discarded(usize),
    /// Left the canvas inside the band; every visited pixel got one
    /// more count.
    Plotted(usize),
}

/// Plots orbits into a histogram.  Keeps a scratch list of the pixels
/// the current orbit has visited so the hot loop does not allocate
/// once it has warmed up.
pub struct TrajectoryAccumulator<'a> {
    plane: &'a PlaneMapper,
    fractal: Fractal,
    band: IterationBand,
    visited: Vec<usize>,
}

impl<'a> TrajectoryAccumulator<'a> {
    /// An accumulator for orbits of `fractal` on `plane`.
    pub fn new(plane: &'a PlaneMapper, fractal: Fractal, band: IterationBand) -> Self {
        TrajectoryAccumulator {
            plane,
            fractal,
            band,
            visited: Vec::with_capacity(band.max.saturating_add(1).min(MAX_PREALLOCATED)),
        }
    }

    /// Follow `seed` from z = 0 for up to `band.max` + 1 steps.  The
    /// first step whose image falls off the canvas is the escape
    /// iteration; if that iteration is in the band, the histogram gets
    /// one count at every pixel recorded before it.
    pub fn accumulate(&mut self, seed: Complex<f64>, histogram: &mut Histogram) -> Fate {
        self.visited.clear();
        let mut z: Complex<f64> = Complex { re: 0.0, im: 0.0 };
        for i in 0..=self.band.max {
            z = self.fractal.iterate(z, seed);
            match self.plane.point_to_offset(&z) {
                Some(offset) => self.visited.push(offset),
                None => {
                    if !self.band.contains(i) {
                        return Fate::Discarded(i);
                    }
                    for &offset in &self.visited {
                        histogram.increment(offset);
                    }
                    return Fate::Plotted(i);
                }
            }
        }
        Fate::Bounded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planes::ViewWindow;

    fn plane10() -> PlaneMapper {
        PlaneMapper::new(10, ViewWindow::new((-2.0, 2.0), (-2.0, 2.0))).unwrap()
    }

    #[test]
    fn band_is_strict_at_both_ends() {
        let band = IterationBand::new(0, 50);
        assert!(!band.contains(0));
        assert!(band.contains(1));
        assert!(band.contains(49));
        assert!(!band.contains(50));
        assert_eq!(
            IterationBand::new(5, 5).validate(),
            Err(ConfigError::EmptyBand(5, 5))
        );
        assert!(IterationBand::new(6, 5).validate().is_err());
    }

    #[test]
    fn fixed_point_at_origin_is_bounded() {
        let plane = plane10();
        assert_eq!(plane.height(), 10);
        let mut acc = TrajectoryAccumulator::new(&plane, Fractal::Quadratic, IterationBand::new(0, 50));
        let mut h = Histogram::new(10, 10);
        assert_eq!(acc.accumulate(Complex::new(0.0, 0.0), &mut h), Fate::Bounded);
        assert_eq!(h.total(), 0);
    }

    #[test]
    fn immediate_escape_is_not_in_band() {
        let plane = plane10();
        let mut acc = TrajectoryAccumulator::new(&plane, Fractal::Quadratic, IterationBand::new(0, 50));
        let mut h = Histogram::new(10, 10);
        // z1 = 2 maps to column 10, one past the edge.
        assert_eq!(acc.accumulate(Complex::new(2.0, 0.0), &mut h), Fate::Discarded(0));
        assert_eq!(h.total(), 0);
    }

    #[test]
    fn escape_at_one_credits_the_first_pixel() {
        let plane = plane10();
        let mut acc = TrajectoryAccumulator::new(&plane, Fractal::Quadratic, IterationBand::new(0, 50));
        let mut h = Histogram::new(10, 10);
        // z1 = 1.5 (column 9), z2 = 3.75, off the canvas.
        assert_eq!(acc.accumulate(Complex::new(1.5, 0.0), &mut h), Fate::Plotted(1));
        assert_eq!(h.get(9, 5), 1);
        assert_eq!(h.total(), 1);
    }

    #[test]
    fn every_visit_before_escape_is_counted() {
        let plane = plane10();
        let mut acc = TrajectoryAccumulator::new(&plane, Fractal::Quadratic, IterationBand::new(0, 50));
        let mut h = Histogram::new(10, 10);
        // Creeps past the cardioid's cusp and escapes after eleven steps.
        let fate = acc.accumulate(Complex::new(0.3, 0.0), &mut h);
        match fate {
            Fate::Plotted(i) => assert_eq!(h.total(), i as u64),
            other => panic!("expected the orbit to be plotted, got {:?}", other),
        }
    }

    #[test]
    fn escape_past_band_is_discarded_whole() {
        let plane = plane10();
        let mut acc = TrajectoryAccumulator::new(&plane, Fractal::Quadratic, IterationBand::new(3, 50));
        let mut h = Histogram::new(10, 10);
        assert_eq!(acc.accumulate(Complex::new(1.5, 0.0), &mut h), Fate::Discarded(1));
        assert_eq!(h.total(), 0);
    }

    #[test]
    fn histogram_never_decreases() {
        let plane = plane10();
        let mut acc = TrajectoryAccumulator::new(&plane, Fractal::Cubic, IterationBand::new(0, 200));
        let mut h = Histogram::new(10, 10);
        let mut previous = h.clone();
        for i in 0..400 {
            let c = Complex::new(-1.0 + (i as f64) / 200.0, 0.5 - (i as f64) / 400.0);
            acc.accumulate(c, &mut h);
            for (now, then) in h.cells().iter().zip(previous.cells()) {
                assert!(now >= then);
            }
            previous = h.clone();
        }
    }
}
