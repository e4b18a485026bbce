// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the PlaneMapper struct, which describes a relationship
//! between a rectangle on the integral plane with an origin at 0,0,
//! and a window on the complex plane given as a real interval and an
//! imaginary interval.  The same affine map is used to sample seeds,
//! to follow orbits, and to place pixels, so all three agree on where
//! a complex number lands.
use errors::ConfigError;
use num::Complex;

/// A linear map of `value` from the interval `from` onto the interval
/// `to`.  Nothing is clamped; values outside `from` land outside `to`.
#[inline]
pub fn linmap(value: f64, from: (f64, f64), to: (f64, f64)) -> f64 {
    to.0 + (value - from.0) * (to.1 - to.0) / (from.1 - from.0)
}

/// The region of the complex plane that is both sampled and rendered:
/// a closed real interval and a closed imaginary interval.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ViewWindow {
    /// (low, high) along the real axis.
    pub real: (f64, f64),
    /// (low, high) along the imaginary axis.
    pub imag: (f64, f64),
}

impl ViewWindow {
    /// Constructor.  Does not validate; see `validate()`.
    pub fn new(real: (f64, f64), imag: (f64, f64)) -> ViewWindow {
        ViewWindow { real, imag }
    }

    /// Both intervals must be finite and run strictly upward.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for &(axis, (low, high)) in &[("real", self.real), ("imaginary", self.imag)] {
            if !low.is_finite() || !high.is_finite() {
                return Err(ConfigError::NonFiniteInterval(axis));
            }
            if low >= high {
                return Err(ConfigError::DegenerateInterval { axis, low, high });
            }
        }
        Ok(())
    }

    /// The number of canvas rows for a canvas `width` columns wide,
    /// keeping the window's aspect ratio.
    pub fn canvas_height(&self, width: usize) -> usize {
        let ratio = ((self.imag.1 - self.imag.0) / (self.real.1 - self.real.0)).abs();
        ((width as f64) * ratio).round() as usize
    }

    /// True if the point lies inside the closed window.
    pub fn contains(&self, point: &Complex<f64>) -> bool {
        point.re >= self.real.0
            && point.re <= self.real.1
            && point.im >= self.imag.0
            && point.im <= self.imag.1
    }
}

impl Default for ViewWindow {
    fn default() -> ViewWindow {
        ViewWindow::new((-2.0, 2.0), (-2.0, 2.0))
    }
}

/// Describes the x, y of a pixel on the canvas: column, then row.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// Contains the definitions of two planes: an integral cartesian
/// plane, and a window on the complex plane.  Maps points from one to
/// the other.
#[derive(Clone, Debug)]
pub struct PlaneMapper {
    width: usize,
    height: usize,
    window: ViewWindow,
}

impl PlaneMapper {
    /// Constructor.  Takes the canvas width and the complex window;
    /// the canvas height follows from the window's aspect ratio.
    pub fn new(width: usize, window: ViewWindow) -> Result<PlaneMapper, ConfigError> {
        window.validate()?;
        if width == 0 {
            return Err(ConfigError::ZeroWidth);
        }
        let height = window.canvas_height(width);
        if height == 0 {
            return Err(ConfigError::ZeroHeight(width));
        }
        Ok(PlaneMapper {
            width,
            height,
            window,
        })
    }

    /// Canvas columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Canvas rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The complex window this canvas covers.
    pub fn window(&self) -> &ViewWindow {
        &self.window
    }

    /// The total number of points in the integral grid.  Used to
    /// calculate memory needs.
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    /// Describes that the integral plane is of a size.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Given a complex number, the nearest pixel on the canvas, or
    /// None if that pixel falls off the canvas.
    pub fn point_to_pixel(&self, point: &Complex<f64>) -> Option<Pixel> {
        let x = linmap(point.re, self.window.real, (0.0, self.width as f64)).round();
        let y = linmap(point.im, self.window.imag, (0.0, self.height as f64)).round();
        // NaN fails both comparisons and so falls off the canvas.
        if x >= 0.0 && x < self.width as f64 && y >= 0.0 && y < self.height as f64 {
            Some(Pixel(x as usize, y as usize))
        } else {
            None
        }
    }

    /// Given a pixel on the canvas, the complex number it was mapped
    /// from, by running the same affine map backwards.
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        Complex::new(
            linmap(pixel.0 as f64, (0.0, self.width as f64), self.window.real),
            linmap(pixel.1 as f64, (0.0, self.height as f64), self.window.imag),
        )
    }

    /// The pixel a point lands on, as a row-major offset into a
    /// canvas-sized buffer.
    #[inline]
    pub fn point_to_offset(&self, point: &Complex<f64>) -> Option<usize> {
        self.point_to_pixel(point)
            .map(|Pixel(x, y)| y * self.width + x)
    }
}
