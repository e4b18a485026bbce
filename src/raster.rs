// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Turning grids into pixels: 8-bit gray, 16-bit levels, the
//! comma-separated level grid other tools read, and the image files
//! themselves.

use errors::{ConfigError, RenderError};
use histogram::Histogram;
use image::png::PNGEncoder;
use image::pnm::PNMEncoder;
use image::pnm::{PNMSubtype, SampleEncoding};
use image::ColorType;
use itertools::Itertools;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use stretch::Intensity;

/// Scale `values` from [0, max] onto [0, top], rounding to nearest.
/// An all-zero (or empty) input stays all zero.
fn scale(values: &[f64], top: f64) -> Vec<f64> {
    let max = values.iter().cloned().fold(0.0, f64::max);
    if max <= 0.0 {
        return vec![0.0; values.len()];
    }
    values.iter().map(|v| (top * v / max).round()).collect()
}

/// One byte per pixel: round(255 * v / max).
pub fn to_gray8(image: &Intensity) -> Vec<u8> {
    scale(image.values(), 255.0)
        .into_iter()
        .map(|v| v as u8)
        .collect()
}

/// One 16-bit level per pixel: round(65535 * v / max).
pub fn to_gray16(image: &Intensity) -> Vec<u16> {
    scale(image.values(), 65535.0)
        .into_iter()
        .map(|v| v as u16)
        .collect()
}

/// The raw counts scaled from [0, max] onto 16-bit levels, for tools
/// that want the histogram rather than the stretched image.
pub fn histogram_levels(histogram: &Histogram) -> Vec<u16> {
    let counts: Vec<f64> = histogram.cells().iter().map(|&c| f64::from(c)).collect();
    scale(&counts, 65535.0)
        .into_iter()
        .map(|v| v as u16)
        .collect()
}

/// Write `levels` as text: one line per row, cells separated by
/// commas.
pub fn write_grid<W: Write>(levels: &[u16], width: usize, mut out: W) -> io::Result<()> {
    for row in levels.chunks(width) {
        writeln!(out, "{}", row.iter().join(","))?;
    }
    out.flush()
}

/// The bytes of an RGBA image in which every pixel is gray and fully
/// opaque.
pub fn gray_to_rgba(gray: &[u8]) -> Vec<u8> {
    gray.iter().flat_map(|&g| vec![g, g, g, 255]).collect()
}

/// True if the path names a PNG file.
fn is_png(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map_or(false, |e| e.eq_ignore_ascii_case("png"))
}

/// Check that an image of `depth` bits can be written to `path`
/// before anything is rendered.
pub fn validate_depth(path: &Path, depth: u8) -> Result<(), ConfigError> {
    match (depth, is_png(path)) {
        (8, _) | (16, true) => Ok(()),
        (16, false) => Err(ConfigError::UnsupportedDepth(depth, "a PGM graymap".to_string())),
        _ => Err(ConfigError::UnsupportedDepth(depth, "an image".to_string())),
    }
}

/// Write the image.  `.png` files are written as 8-bit RGBA (gray
/// replicated, fully opaque) or 16-bit grayscale; anything else is
/// written as an 8-bit binary PGM graymap.
pub fn write_image(path: &Path, image: &Intensity, depth: u8) -> Result<(), RenderError> {
    validate_depth(path, depth)?;
    let (width, height) = (image.width() as u32, image.height() as u32);
    let output = BufWriter::new(File::create(path)?);
    if is_png(path) {
        let encoder = PNGEncoder::new(output);
        if depth == 16 {
            let bytes: Vec<u8> = to_gray16(image)
                .iter()
                .flat_map(|level| vec![(level >> 8) as u8, (level & 0xff) as u8])
                .collect();
            encoder.encode(&bytes, width, height, ColorType::Gray(16))?;
        } else {
            let rgba = gray_to_rgba(&to_gray8(image));
            encoder.encode(&rgba, width, height, ColorType::RGBA(8))?;
        }
    } else {
        let mut encoder =
            PNMEncoder::new(output).with_subtype(PNMSubtype::Graymap(SampleEncoding::Binary));
        encoder.encode(&to_gray8(image)[..], width, height, ColorType::Gray(8))?;
    }
    info!("saved to '{}'", path.display());
    Ok(())
}
