//! Contains the white noise that every octave is smoothed from.

use bevy_math::UVec2;

use crate::{NoiseFunction, error::NoiseError, grid::NoiseGrid, rng::NoiseRng};

/// A [`NoiseFunction`] that gives each cell an independent value from `{0, 1/S, 2/S, ..., (S-1)/S}`,
/// where `S` is [`sample_size`](Self::sample_size).
/// This approximates a uniform variate in `[0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "bevy_reflect", derive(bevy_reflect::Reflect))]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct QuantizedValue {
    /// The number of distinct values a cell can take.
    pub sample_size: u32,
}

impl Default for QuantizedValue {
    fn default() -> Self {
        Self {
            sample_size: Self::DEFAULT_SAMPLE_SIZE,
        }
    }
}

impl QuantizedValue {
    /// The resolution used when none is given.
    pub const DEFAULT_SAMPLE_SIZE: u32 = 8192;

    /// The finest resolution whose steps are all distinct as `f32`s below 1.
    pub const MAX_SAMPLE_SIZE: u32 = 1 << 24;

    /// Creates a generator with `sample_size` steps.
    pub fn new(sample_size: u32) -> Result<Self, NoiseError> {
        if sample_size == 0 || sample_size > Self::MAX_SAMPLE_SIZE {
            return Err(NoiseError::InvalidSampleSize);
        }
        Ok(Self { sample_size })
    }

    /// Fills a grid of `size` with fresh values, then re-seeds `rng` so the next grid differs.
    pub fn generate(&self, size: UVec2, rng: &mut NoiseRng) -> Result<NoiseGrid, NoiseError> {
        Self::new(self.sample_size)?;
        let seeds = *rng;
        let grid = NoiseGrid::from_fn(size, |cell| {
            let mut cell_seeds = seeds;
            self.evaluate(cell, &mut cell_seeds)
        })?;
        rng.re_seed();
        Ok(grid)
    }
}

impl NoiseFunction<UVec2> for QuantizedValue {
    type Output = f32;

    #[inline]
    fn evaluate(&self, input: UVec2, seeds: &mut NoiseRng) -> Self::Output {
        let step = NoiseRng::bucket(seeds.rand_u32(input), self.sample_size);
        step as f32 / self.sample_size as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_are_quantized_unit_interval() {
        let generator = QuantizedValue::new(16).unwrap();
        let grid = generator
            .generate(UVec2::new(32, 32), &mut NoiseRng(3))
            .unwrap();
        for &v in grid.values() {
            assert!((0.0..1.0).contains(&v));
            let scaled = v * 16.0;
            assert_eq!(scaled, scaled.trunc());
        }
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let generator = QuantizedValue::default();
        let size = UVec2::new(9, 5);
        let mut a = NoiseRng(99);
        let mut b = NoiseRng(99);
        let first = generator.generate(size, &mut a).unwrap();
        assert_eq!(first, generator.generate(size, &mut b).unwrap());
        assert_eq!(a, b);
        assert_ne!(first, generator.generate(size, &mut a).unwrap());
    }

    #[test]
    fn not_constant() {
        let grid = QuantizedValue::default()
            .generate(UVec2::new(16, 16), &mut NoiseRng(1))
            .unwrap();
        let (min, max) = grid.min_max();
        assert!(min < max);
    }

    #[test]
    fn out_of_range_sample_size_is_rejected() {
        assert_eq!(QuantizedValue::new(0), Err(NoiseError::InvalidSampleSize));
        assert_eq!(
            QuantizedValue::new(QuantizedValue::MAX_SAMPLE_SIZE + 1),
            Err(NoiseError::InvalidSampleSize)
        );
        let generator = QuantizedValue { sample_size: 0 };
        assert_eq!(
            generator.generate(UVec2::ONE, &mut NoiseRng(0)),
            Err(NoiseError::InvalidSampleSize)
        );
    }
}
