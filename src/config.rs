// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Everything a render needs to know up front.

use errors::ConfigError;
use fractal::Fractal;
use planes::{PlaneMapper, ViewWindow};
use trajectory::IterationBand;

/// The parameters of one render.  Once validated, this should not be
/// mutated.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
    /// Canvas width in pixels; the height follows from the window.
    pub width: usize,
    /// The region of the complex plane sampled and drawn.
    pub window: ViewWindow,
    /// Which escape iterations get plotted.
    pub band: IterationBand,
    /// How many seeds to draw across all workers.
    pub samples: usize,
    /// How many workers to split the samples between.
    pub threads: usize,
    /// How much of the bright end the stretch calibrates against; 0
    /// leaves the histogram linear.
    pub percentile: f64,
    /// The map family.
    pub fractal: Fractal,
    /// Seeds every worker's random stream; None draws from entropy.
    pub seed: Option<u64>,
}

impl Default for RenderConfig {
    fn default() -> RenderConfig {
        RenderConfig {
            width: 800,
            window: ViewWindow::default(),
            band: IterationBand::default(),
            samples: 1_000_000,
            threads: ::num_cpus::get(),
            percentile: 3.0,
            fractal: Fractal::default(),
            seed: None,
        }
    }
}

impl RenderConfig {
    /// Check every parameter, failing on the first problem found.
    /// Returns the plane mapper the render will use.
    pub fn validate(&self) -> Result<PlaneMapper, ConfigError> {
        let plane = PlaneMapper::new(self.width, self.window)?;
        self.band.validate()?;
        if self.samples == 0 {
            return Err(ConfigError::ZeroSamples);
        }
        if self.threads == 0 {
            return Err(ConfigError::ZeroThreads);
        }
        validate_percentile(self.percentile)?;
        Ok(plane)
    }

    /// The canvas height for this configuration.
    pub fn height(&self) -> usize {
        self.window.canvas_height(self.width)
    }

    /// A sample count expressed as a fraction of the canvas's pixels.
    pub fn samples_for_density(&self, density: f64) -> usize {
        (density * (self.width * self.height()) as f64).round().max(0.0) as usize
    }

    /// A file name that records how the image was made.
    pub fn default_file_name(&self) -> String {
        format!(
            "buddhabrot_{}_{}x{}_k{}_n{}_p{}.png",
            self.fractal,
            self.width,
            self.height(),
            self.band.min,
            self.band.max,
            self.samples
        )
    }
}

/// A percentile is a number from 0 to 100 inclusive.
pub fn validate_percentile(percentile: f64) -> Result<(), ConfigError> {
    if percentile >= 0.0 && percentile <= 100.0 {
        Ok(())
    } else {
        Err(ConfigError::BadPercentile(percentile))
    }
}
