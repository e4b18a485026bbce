#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Buddhabrot renderer
//!
//! The Buddhabrot (and the Nebulabrot) are variants of the Mandelbrot
//! set that explore "what's in the black heart" of the Mandelbrot.
//! The Mandelbrot takes a point on the complex plane and repeatedly
//! multiplies it by itself, measuring how quickly that number goes to
//! infinity.  This "velocity" is the number used to render the image.
//!
//! The Buddhabrot instead asks where a point *goes* on its way out.
//! Each iteration creates a new complex number that itself may be used
//! as a coordinate on the complex plane.  By mapping that coordinate to
//! the nearest integral pixel and incrementing that pixel by one, we
//! can plot the "orbit" of a point.  Plot the orbits of enough random
//! points and the density of their paths becomes the image.
//!
//! The pipeline here is:
//!
//! 1. Draw random seeds over the view window, throwing away any that
//!    land in regions of the map known never to escape (`sampler`,
//!    `fractal`).
//! 2. Iterate each seed; if its orbit leaves the canvas within the
//!    configured iteration band, add one to every pixel it visited
//!    (`trajectory`).  Each worker thread does this into its own
//!    histogram, and the histograms are summed at the end
//!    (`renderer`, `histogram`).
//! 3. Normalize the counts and bend them with an asinh curve so the
//!    faint filaments show up next to the bright core (`stretch`).
//! 4. Write pixels (`raster`).

extern crate crossbeam;
#[macro_use]
extern crate failure;
extern crate image;
extern crate itertools;
#[macro_use]
extern crate log;
extern crate num;
extern crate num_cpus;
extern crate rand;

pub mod config;
pub mod errors;
pub mod fractal;
pub mod histogram;
pub mod planes;
pub mod raster;
pub mod renderer;
pub mod sampler;
pub mod stretch;
pub mod trajectory;

pub use config::RenderConfig;
pub use errors::{ConfigError, RenderError};
pub use fractal::Fractal;
pub use histogram::Histogram;
pub use planes::{PlaneMapper, ViewWindow};
pub use renderer::Renderer;
pub use stretch::{stretch, Intensity, StretchOutcome, Stretched};
pub use trajectory::{IterationBand, TrajectoryAccumulator};
