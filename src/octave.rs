//! Contains the octave smoother, which turns white noise into value noise at a fixed period.
//!
//! Each octave samples the base grid only at anchors spaced one period apart and bilinearly interpolates between them.
//! Anchors wrap around the grid's edges, so every octave tiles.

use alloc::vec::Vec;

use bevy_math::Curve;

use crate::{curves::bilerp, error::NoiseError, grid::NoiseGrid};

/// The most octaves that can be smoothed from one base grid.
/// Past this, the period of the highest octave no longer fits in a `u64`.
pub const MAX_OCTAVES: u32 = 61;

/// Identifies one octave by its 0 based index.
/// Octave `o` has a period of `8 << o` cells, so higher octaves are smoother.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "bevy_reflect", derive(bevy_reflect::Reflect))]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Octave(pub u32);

impl Octave {
    /// The period of octave 0.
    pub const BASE_PERIOD: u64 = 8;

    /// The distance in cells between the anchors of this octave.
    #[inline]
    pub fn period(self) -> u64 {
        Self::BASE_PERIOD << self.0
    }

    /// The reciprocal of [`period`](Self::period).
    #[inline]
    pub fn frequency(self) -> f32 {
        1.0 / self.period() as f32
    }

    /// Finds the lower and upper anchors around `coord` on an axis of `len` cells,
    /// along with how far `coord` is from the lower one as a fraction of the period.
    #[inline]
    pub fn anchors(self, coord: u32, len: u32) -> (u32, u32, f32) {
        let period = self.period();
        let lower = coord as u64 / period * period;
        let upper = (lower + period) % len as u64;
        let fraction = (coord as u64 - lower) as f32 * self.frequency();
        // `lower <= coord < len` and `upper < len`, so both fit.
        (lower as u32, upper as u32, fraction)
    }

    /// Smooths `base` at this octave's period, shaping the blend fractions by `curve`.
    pub fn smooth(self, base: &NoiseGrid, curve: &impl Curve<f32>) -> NoiseGrid {
        let size = base.size();
        let columns = (0..size.x)
            .map(|i| {
                let (x0, x1, bx) = self.anchors(i, size.x);
                (x0, x1, curve.sample_unchecked(bx))
            })
            .collect::<Vec<_>>();

        let mut smoothed = base.zeroed_like();
        for (j, row) in smoothed
            .values_mut()
            .chunks_exact_mut(size.x as usize)
            .enumerate()
        {
            let (y0, y1, by) = self.anchors(j as u32, size.y);
            let by = curve.sample_unchecked(by);
            for (cell, &(x0, x1, bx)) in row.iter_mut().zip(&columns) {
                let corners = [
                    base.get_wrapped(x0, y0),
                    base.get_wrapped(x1, y0),
                    base.get_wrapped(x0, y1),
                    base.get_wrapped(x1, y1),
                ];
                *cell = bilerp(corners, bx, by);
            }
        }
        log::trace!(
            "smoothed octave {} (period {}) over {}x{}",
            self.0,
            self.period(),
            size.x,
            size.y
        );
        smoothed
    }
}

/// Checks that `count` octaves can be smoothed.
#[inline]
pub fn validate_octave_count(count: u32) -> Result<(), NoiseError> {
    if count == 0 || count > MAX_OCTAVES {
        return Err(NoiseError::InvalidOctaveCount(count));
    }
    Ok(())
}

/// Every octave from `0` up to some count, each smoothed from the same base grid.
#[derive(Debug, Clone, PartialEq)]
pub struct OctaveSet {
    octaves: Vec<NoiseGrid>,
}

impl OctaveSet {
    /// Smooths `base` at octaves `0..count`.
    pub fn smooth(
        base: &NoiseGrid,
        count: u32,
        curve: &(impl Curve<f32> + Sync),
    ) -> Result<Self, NoiseError> {
        validate_octave_count(count)?;

        #[cfg(feature = "rayon")]
        let octaves = {
            use rayon::prelude::*;
            (0..count)
                .into_par_iter()
                .map(|o| Octave(o).smooth(base, curve))
                .collect()
        };
        #[cfg(not(feature = "rayon"))]
        let octaves = (0..count).map(|o| Octave(o).smooth(base, curve)).collect();

        Ok(Self { octaves })
    }

    /// The number of octaves.
    #[inline]
    pub fn len(&self) -> usize {
        self.octaves.len()
    }

    /// Always false, since a set holds at least one octave.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.octaves.is_empty()
    }

    /// The smoothed grid for `octave`, if it is in the set.
    #[inline]
    pub fn get(&self, octave: Octave) -> Option<&NoiseGrid> {
        self.octaves.get(octave.0 as usize)
    }

    /// Iterates octaves in the order they are blended: from the highest index (smoothest) down to octave 0.
    /// Step `k` of this iterator is octave `len - 1 - k`.
    #[inline]
    pub fn blend_order(&self) -> impl ExactSizeIterator<Item = (Octave, &NoiseGrid)> {
        self.octaves
            .iter()
            .enumerate()
            .rev()
            .map(|(o, grid)| (Octave(o as u32), grid))
    }

    /// Consumes the set, returning the grids ordered by octave index.
    #[inline]
    pub fn into_grids(self) -> Vec<NoiseGrid> {
        self.octaves
    }
}
