//! Contains [`NoiseGrid`], the 2d field every stage of generation reads and produces.

use alloc::{vec, vec::Vec};
use core::slice::ChunksExact;

use bevy_math::UVec2;

use crate::error::NoiseError;

/// A `width` by `height` field of `f32` values.
///
/// Values are stored row-major: the cell at column `i` and row `j` lives at index `j * width + i`.
/// Both dimensions are always at least 1.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serialize", serde(try_from = "UncheckedGrid"))]
pub struct NoiseGrid {
    size: UVec2,
    values: Vec<f32>,
}

/// The serialized form of a [`NoiseGrid`], checked on the way in.
#[cfg(feature = "serialize")]
#[derive(serde::Deserialize)]
struct UncheckedGrid {
    size: UVec2,
    values: Vec<f32>,
}

#[cfg(feature = "serialize")]
impl TryFrom<UncheckedGrid> for NoiseGrid {
    type Error = NoiseError;

    fn try_from(grid: UncheckedGrid) -> Result<Self, Self::Error> {
        Self::from_values(grid.size, grid.values)
    }
}

impl NoiseGrid {
    /// Checks that `size` describes a grid with at least one cell.
    #[inline]
    pub fn validate_size(size: UVec2) -> Result<(), NoiseError> {
        if size.x == 0 || size.y == 0 {
            return Err(NoiseError::InvalidDimension {
                width: size.x,
                height: size.y,
            });
        }
        Ok(())
    }

    /// Creates a grid of `size` where every cell is `value`.
    pub fn filled(size: UVec2, value: f32) -> Result<Self, NoiseError> {
        Self::validate_size(size)?;
        Ok(Self {
            size,
            values: vec![value; cell_count(size)],
        })
    }

    /// Creates a grid of `size` by evaluating `f` at each cell position.
    /// Cells are visited in storage order.
    pub fn from_fn(size: UVec2, mut f: impl FnMut(UVec2) -> f32) -> Result<Self, NoiseError> {
        Self::validate_size(size)?;
        let mut values = Vec::with_capacity(cell_count(size));
        for j in 0..size.y {
            for i in 0..size.x {
                values.push(f(UVec2::new(i, j)));
            }
        }
        Ok(Self { size, values })
    }

    /// Wraps row-major `values` as a grid of `size`.
    pub fn from_values(size: UVec2, values: Vec<f32>) -> Result<Self, NoiseError> {
        Self::validate_size(size)?;
        let expected = cell_count(size);
        if values.len() != expected {
            return Err(NoiseError::GridSizeMismatch {
                expected,
                found: values.len(),
            });
        }
        Ok(Self { size, values })
    }

    /// Makes a zeroed grid with the same size as `self`.
    #[inline]
    pub(crate) fn zeroed_like(&self) -> Self {
        Self {
            size: self.size,
            values: vec![0.0; self.values.len()],
        }
    }

    /// The dimensions of the grid as `(width, height)`.
    #[inline]
    pub fn size(&self) -> UVec2 {
        self.size
    }

    /// The number of columns.
    #[inline]
    pub fn width(&self) -> u32 {
        self.size.x
    }

    /// The number of rows.
    #[inline]
    pub fn height(&self) -> u32 {
        self.size.y
    }

    /// The value at column `i` and row `j`, or `None` if that is out of bounds.
    #[inline]
    pub fn get(&self, i: u32, j: u32) -> Option<f32> {
        (i < self.size.x && j < self.size.y).then(|| self.values[self.index(i, j)])
    }

    /// The value at column `i` and row `j`, wrapping both around the grid's edges.
    #[inline]
    pub fn get_wrapped(&self, i: u32, j: u32) -> f32 {
        self.values[self.index(i % self.size.x, j % self.size.y)]
    }

    #[inline(always)]
    fn index(&self, i: u32, j: u32) -> usize {
        j as usize * self.size.x as usize + i as usize
    }

    /// All values in row-major order.
    #[inline]
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    #[inline]
    pub(crate) fn values_mut(&mut self) -> &mut [f32] {
        &mut self.values
    }

    /// Consumes the grid, returning its row-major values.
    #[inline]
    pub fn into_values(self) -> Vec<f32> {
        self.values
    }

    /// Iterates the rows of the grid from `j = 0` upward.
    #[inline]
    pub fn rows(&self) -> ChunksExact<'_, f32> {
        self.values.chunks_exact(self.size.x as usize)
    }

    /// The smallest and largest values in the grid.
    pub fn min_max(&self) -> (f32, f32) {
        self.values
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(min, max), &v| {
                (min.min(v), max.max(v))
            })
    }
}

#[inline(always)]
fn cell_count(size: UVec2) -> usize {
    size.x as usize * size.y as usize
}
