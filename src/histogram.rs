// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The count grid that orbits are plotted into.  Each worker owns one
//! outright; when they are all done, they are summed into one.

use itertools::Itertools;

/// A row-major grid of visit counts, `height` rows of `width` cells.
/// Counts only ever go up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Histogram {
    width: usize,
    height: usize,
    cells: Vec<u32>,
}

impl Histogram {
    /// A zero-filled grid.
    pub fn new(width: usize, height: usize) -> Histogram {
        Histogram {
            width,
            height,
            cells: vec![0 as u32; width * height],
        }
    }

    /// Wraps an existing row-major buffer.  The buffer must hold
    /// exactly `width * height` cells.
    pub fn from_cells(width: usize, height: usize, cells: Vec<u32>) -> Histogram {
        assert!(cells.len() == width * height);
        Histogram {
            width,
            height,
            cells,
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

    /// All cells, row after row.
    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    /// The count at column `x` of row `y`.
    pub fn get(&self, x: usize, y: usize) -> u32 {
        self.cells[y * self.width + x]
    }

    /// Each row as a slice.
    pub fn rows(&self) -> ::std::slice::Chunks<u32> {
        self.cells.chunks(self.width)
    }

    /// Add one to the cell at a row-major offset.  Saturates rather
    /// than wrapping.
    #[inline]
    pub fn increment(&mut self, offset: usize) {
        let cell = &mut self.cells[offset];
        *cell = cell.saturating_add(1);
    }

    /// The smallest and largest counts, or None for an empty grid.
    pub fn min_max(&self) -> Option<(u32, u32)> {
        self.cells.iter().cloned().minmax().into_option()
    }

    /// Sum of every cell.
    pub fn total(&self) -> u64 {
        self.cells.iter().map(|&c| u64::from(c)).sum()
    }

    /// Elementwise sum of another grid of the same shape into this one.
    pub fn merge(&mut self, other: &Histogram) {
        assert!(self.width == other.width && self.height == other.height);
        for (mine, theirs) in self.cells.iter_mut().zip(other.cells.iter()) {
            *mine = mine.saturating_add(*theirs);
        }
    }

    /// Given a collection of partial grids, sum them into a single
    /// grid.  An empty collection yields a zero grid.
    pub fn merge_all<I>(width: usize, height: usize, partials: I) -> Histogram
    where
        I: IntoIterator<Item = Histogram>,
    {
        partials
            .into_iter()
            .fold(Histogram::new(width, height), |mut acc, partial| {
                acc.merge(&partial);
                acc
            })
    }
}
