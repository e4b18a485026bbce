// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contrast stretching.  The raw counts of a Buddhabrot are wildly
//! skewed: a few pixels near the real axis collect orders of magnitude
//! more visits than the faint outer filaments.  Rather than clip, we
//! normalize the counts to [0, 1], find the value at a high
//! percentile, and bend the whole range with an asinh (or sinh) curve
//! whose scale is chosen from that value.
//!
//! Cells that were never visited stay exactly zero.

use histogram::Histogram;
use planes::linmap;
use std::fmt;

/// A row-major grid of intensities, normally in [0, 1].
#[derive(Clone, Debug, PartialEq)]
pub struct Intensity {
    width: usize,
    height: usize,
    values: Vec<f64>,
}

impl Intensity {
    /// Wraps a row-major buffer of exactly `width * height` values.
    pub fn from_values(width: usize, height: usize, values: Vec<f64>) -> Intensity {
        assert!(values.len() == width * height);
        Intensity {
            width,
            height,
            values,
        }
    }

    /// Columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// All values, row after row.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// The value at column `x` of row `y`.
    pub fn get(&self, x: usize, y: usize) -> f64 {
        self.values[y * self.width + x]
    }

    /// The brightest value, or 0 for an empty grid.
    pub fn max(&self) -> f64 {
        self.values.iter().cloned().fold(0.0, f64::max)
    }
}

/// The tone curve applied to every visited cell.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Curve {
    /// Lifts the dim end; used when the pivot is below one half.
    Asinh,
    /// Pushes the dim end down; used when the pivot is above one half.
    Sinh,
}

impl Curve {
    /// `curve(scale * x) / curve(scale)`.  The sinh ratio is taken as
    /// exp(a(x - 1)) (1 - exp(-2ax)) / (1 - exp(-2a)) so it stays finite
    /// for scales where sinh itself overflows.
    #[inline]
    fn ratio(self, x: f64, scale: f64) -> f64 {
        match self {
            Curve::Asinh => (scale * x).asinh() / scale.asinh(),
            Curve::Sinh => {
                (scale * (x - 1.0)).exp() * (1.0 - (-2.0 * scale * x).exp())
                    / (1.0 - (-2.0 * scale).exp())
            }
        }
    }
}

/// What the stretch did.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum StretchOutcome {
    /// Every visited cell was remapped through `curve(scale * x) / curve(scale)`.
    Stretched {
        /// The normalized value found at the requested percentile.
        pivot: f64,
        /// The curve chosen for that pivot.
        curve: Curve,
        /// The curve's scale factor.
        scale: f64,
    },
    /// Left linear: the pivot was exactly one half, or no stretch was
    /// asked for.
    Linear,
    /// The pivot was zero, so there is nothing to calibrate against.
    /// The data is returned normalized but otherwise untouched.
    TooDark,
    /// The pivot was the brightest value, so no finite curve bends it
    /// to one half.  The data is returned normalized but otherwise
    /// untouched.
    Saturated,
    /// Every cell held the same count; normalization is undefined.
    Flat,
}

impl fmt::Display for StretchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            StretchOutcome::Stretched { pivot, curve, scale } => write!(
                f,
                "stretched with {:?}, pivot {:.4}, scale {:.4}",
                curve, pivot, scale
            ),
            StretchOutcome::Linear => f.write_str("left linear"),
            StretchOutcome::TooDark => f.write_str("cannot stretch (image might be too dark)"),
            StretchOutcome::Saturated => {
                f.write_str("cannot stretch (image might be too bright)")
            }
            StretchOutcome::Flat => f.write_str("cannot normalize a flat histogram"),
        }
    }
}

/// The result of a stretch: the new grid, and how it was made.
#[derive(Clone, Debug)]
pub struct Stretched {
    /// The stretched (or merely normalized) intensities.
    pub image: Intensity,
    /// Whether the curve was applied, and if not, why not.
    pub outcome: StretchOutcome,
}

/// Map the histogram linearly onto [0, 1] using its global minimum
/// and maximum.  Returns None when those are equal.
pub fn normalize(histogram: &Histogram) -> Option<Intensity> {
    let (min, max) = histogram.min_max()?;
    if min == max {
        return None;
    }
    let from = (f64::from(min), f64::from(max));
    let values = histogram
        .cells()
        .iter()
        .map(|&c| linmap(f64::from(c), from, (0.0, 1.0)))
        .collect();
    Some(Intensity::from_values(
        histogram.width(),
        histogram.height(),
        values,
    ))
}

/// The calibration point: sort every value and take the one at rank
/// floor(N * (100 - percentile) / 100), clamped to the last.  For small
/// percentiles this is a bright value, not the median.
pub fn pivot(values: &[f64], percentile: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(::std::cmp::Ordering::Equal));
    let rank = ((sorted.len() as f64) * (100.0 - percentile) / 100.0).floor();
    let rank = if rank > 0.0 { rank as usize } else { 0 };
    sorted[rank.min(sorted.len() - 1)]
}

/// The curve and scale that bend `pivot` toward one half.
pub fn curve_for(pivot: f64) -> (Curve, f64) {
    if pivot < 0.5 {
        let p2 = pivot * pivot;
        (Curve::Asinh, (1.0 - 4.0 * p2).sqrt() / (2.0 * p2))
    } else {
        let q2 = (1.0 - pivot) * (1.0 - pivot);
        (Curve::Sinh, (1.0 - 4.0 * q2).sqrt() / (2.0 * q2))
    }
}

/// Normalize and stretch a histogram.  A percentile of 0 asks for the
/// linear normalization only.  Never fails: when the curve cannot be
/// applied the normalized data comes back with an outcome saying why.
pub fn stretch(histogram: &Histogram, percentile: f64) -> Stretched {
    let mut image = match normalize(histogram) {
        Some(image) => image,
        None => {
            let lit = histogram.min_max().map_or(false, |(_, max)| max > 0);
            warn!("stretch | every cell holds the same count; nothing to normalize");
            let values = vec![if lit { 1.0 } else { 0.0 }; histogram.cells().len()];
            return Stretched {
                image: Intensity::from_values(histogram.width(), histogram.height(), values),
                outcome: StretchOutcome::Flat,
            };
        }
    };

    if percentile == 0.0 {
        return Stretched {
            image,
            outcome: StretchOutcome::Linear,
        };
    }

    let pivot = pivot(&image.values, percentile);
    if pivot == 0.0 {
        warn!(
            "stretch | cannot stretch with percentile = {} (image might be too dark)",
            percentile
        );
        return Stretched {
            image,
            outcome: StretchOutcome::TooDark,
        };
    }
    if pivot >= 1.0 {
        warn!(
            "stretch | cannot stretch with percentile = {} (image might be too bright)",
            percentile
        );
        return Stretched {
            image,
            outcome: StretchOutcome::Saturated,
        };
    }
    if pivot == 0.5 {
        return Stretched {
            image,
            outcome: StretchOutcome::Linear,
        };
    }

    let (curve, scale) = curve_for(pivot);
    for x in image.values.iter_mut().filter(|x| **x != 0.0) {
        *x = curve.ratio(*x, scale);
    }
    debug!(
        "stretch | percentile {} pivot {} curve {:?} scale {}",
        percentile, pivot, curve, scale
    );
    Stretched {
        image,
        outcome: StretchOutcome::Stretched {
            pivot,
            curve,
            scale,
        },
    }
}
