// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error types for configuring and running a render.

use std::io;

/// Everything that can be wrong with a render's parameters.  All of
/// these are detected before a single sample is drawn.
#[derive(Debug, Fail, PartialEq)]
pub enum ConfigError {
    /// An interval of the view window has no width, or runs backwards.
    #[fail(
        display = "The {} interval [{}, {}] must have a lower bound below its upper bound.",
        axis, low, high
    )]
    DegenerateInterval {
        /// "real" or "imaginary"
        axis: &'static str,
        /// Lower bound as given.
        low: f64,
        /// Upper bound as given.
        high: f64,
    },

    /// An interval bound is NaN or infinite.
    #[fail(display = "The {} interval has a bound that is not a finite number.", _0)]
    NonFiniteInterval(&'static str),

    /// The canvas has no columns.
    #[fail(display = "The canvas width must be at least one pixel.")]
    ZeroWidth,

    /// The derived canvas height rounds to zero rows.
    #[fail(
        display = "A canvas {} pixels wide over this window has no rows; widen the canvas or the imaginary interval.",
        _0
    )]
    ZeroHeight(usize),

    /// Nothing to sample.
    #[fail(display = "The sample count must be at least one.")]
    ZeroSamples,

    /// Nobody to do the work.
    #[fail(display = "The worker count must be at least one.")]
    ZeroThreads,

    /// The iteration band is empty.
    #[fail(
        display = "The iteration band minimum ({}) must be below its maximum ({}).",
        _0, _1
    )]
    EmptyBand(usize, usize),

    /// The stretch percentile is not a percentage.
    #[fail(display = "The percentile {} must be between 0 and 100.", _0)]
    BadPercentile(f64),

    /// A map family this crate does not know.
    #[fail(display = "Unknown fractal '{}'; expected 'quadratic' or 'cubic'.", _0)]
    UnknownFractal(String),

    /// A bit depth the output format cannot carry.
    #[fail(display = "A {}-bit image cannot be written as {}.", _0, _1)]
    UnsupportedDepth(u8, String),
}

/// Failures while rendering or writing results.
#[derive(Debug, Fail)]
pub enum RenderError {
    /// The render was misconfigured.
    #[fail(display = "{}", _0)]
    Config(#[cause] ConfigError),

    /// Writing output failed.
    #[fail(display = "I/O error: {}", _0)]
    Io(#[cause] io::Error),

    /// A worker thread panicked before handing back its histogram.
    #[fail(display = "A render worker panicked.")]
    WorkerPanicked,
}

impl From<ConfigError> for RenderError {
    fn from(err: ConfigError) -> RenderError {
        RenderError::Config(err)
    }
}

impl From<io::Error> for RenderError {
    fn from(err: io::Error) -> RenderError {
        RenderError::Io(err)
    }
}
