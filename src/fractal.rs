// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The map families we know how to render.  Each family carries both
//! its iteration function and the set of closed-form regions of its
//! parameter plane known never to escape; the two are always chosen
//! together.

use errors::ConfigError;
use num::Complex;
use std::fmt;
use std::str::FromStr;

const D4: f64 = 1.0 / 4.0;
const D16: f64 = D4 / 4.0;

// A disk inscribed in each period-3 bulb, at -0.1226 +/- 0.7449i.
// The bulbs are not round; a wider disk pokes out near im = +/-0.65.
const P3_RE: f64 = -0.1226;
const P3_IM: f64 = 0.7449;
const P3_R: f64 = 0.09;

// The period-4 bulb hanging off the period-2 disk.
const P42_RE: f64 = -1.309;
const P42_R: f64 = 0.058;

// The period-1 component of z^3 + c is bounded by a nephroid whose
// cusps sit at +/- 2a on the real axis, with a = 1 / (3 * sqrt(3)).
// 4a^2 and 108a^4 both come out to 4/27.
const NEPHROID_4A2: f64 = 4.0 / 27.0;
const NEPHROID_108A4: f64 = 4.0 / 27.0;

/// A polynomial escape map together with its matching rejection set.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Fractal {
    /// z -> z^2 + c, the classic Buddhabrot.
    Quadratic,
    /// z -> z^3 + c.
    Cubic,
}

impl Fractal {
    /// Every family, in the order the command line lists them.
    pub const ALL: [Fractal; 2] = [Fractal::Quadratic, Fractal::Cubic];

    /// One step of the map.
    #[inline]
    pub fn iterate(self, z: Complex<f64>, c: Complex<f64>) -> Complex<f64> {
        match self {
            Fractal::Quadratic => z * z + c,
            Fractal::Cubic => z * z * z + c,
        }
    }

    /// True if `c` lies in one of this family's regions that provably
    /// never escape, so that iterating it would be wasted work.
    pub fn is_rejected(self, c: &Complex<f64>) -> bool {
        match self {
            Fractal::Quadratic => {
                in_cardioid(c) || in_period2_disk(c) || in_period3_bulb(c) || in_period4_bulb(c)
            }
            Fractal::Cubic => in_nephroid(c),
        }
    }

    /// The name used on the command line and in file names.
    pub fn name(self) -> &'static str {
        match self {
            Fractal::Quadratic => "quadratic",
            Fractal::Cubic => "cubic",
        }
    }
}

impl Default for Fractal {
    fn default() -> Fractal {
        Fractal::Quadratic
    }
}

impl fmt::Display for Fractal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Fractal {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Fractal, ConfigError> {
        Fractal::ALL
            .iter()
            .cloned()
            .find(|f| f.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownFractal(s.to_string()))
    }
}

/// The main cardioid of the Mandelbrot set.
pub fn in_cardioid(c: &Complex<f64>) -> bool {
    let y = c.im * c.im;
    let q = (c.re - D4) * (c.re - D4) + y;
    q * (q + c.re - D4) < y * D4
}

/// The period-2 disk, |c + 1| < 1/4.
pub fn in_period2_disk(c: &Complex<f64>) -> bool {
    (c.re + 1.0) * (c.re + 1.0) + c.im * c.im < D16
}

/// Either of the two period-3 bulbs above and below the cardioid.
pub fn in_period3_bulb(c: &Complex<f64>) -> bool {
    let dy = c.im.abs() - P3_IM;
    (c.re - P3_RE) * (c.re - P3_RE) + dy * dy < P3_R * P3_R
}

/// The period-4 bulb to the left of the period-2 disk.
pub fn in_period4_bulb(c: &Complex<f64>) -> bool {
    (c.re - P42_RE) * (c.re - P42_RE) + c.im * c.im < P42_R * P42_R
}

/// The nephroid bounding the main component of z^3 + c.
pub fn in_nephroid(c: &Complex<f64>) -> bool {
    let s = c.re * c.re + c.im * c.im - NEPHROID_4A2;
    s * s * s < NEPHROID_108A4 * c.im * c.im
}
