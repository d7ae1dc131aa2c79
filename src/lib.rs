#![no_std]
#![allow(
    clippy::doc_markdown,
    reason = "These rules should not apply to the readme."
)]
#![doc = include_str!("../README.md")]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod base;
pub mod curves;
pub mod error;
pub mod grid;
pub mod layering;
pub mod octave;
pub mod prelude;
pub mod rng;
pub mod settings;

use bevy_math::{Curve, UVec2};

use base::QuantizedValue;
use curves::Linear;
use error::NoiseError;
use grid::NoiseGrid;
use layering::{LayerWeightsSettings, Normed, Persistence, Prominence};
use octave::{Octave, OctaveSet, validate_octave_count};
use rng::NoiseRng;

/// Represents a simple noise function with an input `I` and an output.
pub trait NoiseFunction<I> {
    /// The output of the function.
    type Output;

    /// Evaluates the function at `input`.
    fn evaluate(&self, input: I, seeds: &mut NoiseRng) -> Self::Output;
}

/// A base grid of white noise together with the curve used to smooth it into octaves.
///
/// This is the whole generation procedure: base noise, per-octave smoothing, then a weighted, normalized blend.
/// Every stage allocates a fresh grid; the base is only ever read.
///
/// ```
/// # use bevy_math::UVec2;
/// # use octave_field::prelude::*;
/// let field = NoiseField::random(UVec2::new(64, 32), &mut NoiseRng(5)).unwrap();
/// let grid = field.blend_persistence(4, 0.5, 1.0).unwrap();
/// assert_eq!(grid.size(), UVec2::new(64, 32));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NoiseField<C = Linear> {
    base: NoiseGrid,
    curve: C,
}

impl NoiseField {
    /// Creates a field from an existing base grid, smoothed linearly.
    pub fn new(base: NoiseGrid) -> Self {
        Self {
            base,
            curve: Linear,
        }
    }

    /// Creates a field of `size` from fresh [`QuantizedValue`] noise at the default sample size.
    pub fn random(size: UVec2, rng: &mut NoiseRng) -> Result<Self, NoiseError> {
        Self::random_with(size, &QuantizedValue::default(), rng)
    }

    /// Creates a field of `size` from fresh noise made by `generator`.
    pub fn random_with(
        size: UVec2,
        generator: &QuantizedValue,
        rng: &mut NoiseRng,
    ) -> Result<Self, NoiseError> {
        generator.generate(size, rng).map(Self::new)
    }
}

impl<C: Curve<f32> + Sync> NoiseField<C> {
    /// Replaces the curve that shapes blending within each octave's cells.
    pub fn with_curve<D: Curve<f32> + Sync>(self, curve: D) -> NoiseField<D> {
        NoiseField {
            base: self.base,
            curve,
        }
    }

    /// The white noise every octave is smoothed from.
    #[inline]
    pub fn base(&self) -> &NoiseGrid {
        &self.base
    }

    /// Smooths the base grid at a single `octave`.
    #[inline]
    pub fn smooth(&self, octave: Octave) -> NoiseGrid {
        octave.smooth(&self.base, &self.curve)
    }

    /// Smooths the base grid at octaves `0..count`.
    pub fn octaves(&self, count: u32) -> Result<OctaveSet, NoiseError> {
        OctaveSet::smooth(&self.base, count, &self.curve)
    }

    /// Blends `count` octaves weighted by `weights`.
    /// Weights are checked before any smoothing happens.
    pub fn blend(
        &self,
        count: u32,
        weights: &impl LayerWeightsSettings,
    ) -> Result<NoiseGrid, NoiseError> {
        validate_octave_count(count)?;
        let normed = Normed::prepare(weights, count as usize)?;
        normed.blend(&self.octaves(count)?)
    }

    /// Blends `count` octaves where each step's amplitude is multiplied by `persistence`, starting from `amplitude`.
    /// See [`Persistence`].
    #[inline]
    pub fn blend_persistence(
        &self,
        count: u32,
        persistence: f32,
        amplitude: f32,
    ) -> Result<NoiseGrid, NoiseError> {
        self.blend(count, &Persistence::new(persistence, amplitude))
    }

    /// Blends `count` octaves weighted by one explicit factor per blend step.
    /// `prominence[0]` weights the smoothest octave. See [`Prominence`].
    #[inline]
    pub fn blend_prominence(&self, count: u32, prominence: &[f32]) -> Result<NoiseGrid, NoiseError> {
        self.blend(count, &Prominence::new(prominence))
    }
}

fn validate_request(
    size: UVec2,
    octaves: u32,
    weights: &impl LayerWeightsSettings,
) -> Result<Normed, NoiseError> {
    NoiseGrid::validate_size(size)?;
    validate_octave_count(octaves)?;
    Normed::prepare(weights, octaves as usize)
}

/// Generates a `width` by `height` field of `octaves` octaves with geometrically decaying weights.
///
/// The first blended octave weighs `amplitude * persistence`, and each one after that `persistence` times the last.
/// Every input is checked before any noise is drawn from `rng`.
///
/// ```
/// # use octave_field::{generate_noise, rng::NoiseRng};
/// let grid = generate_noise(128, 64, 5, 0.6, 1.0, &mut NoiseRng(3)).unwrap();
/// assert!(grid.values().iter().all(|v| (0.0..1.0).contains(v)));
/// ```
pub fn generate_noise(
    width: u32,
    height: u32,
    octaves: u32,
    persistence: f32,
    amplitude: f32,
    rng: &mut NoiseRng,
) -> Result<NoiseGrid, NoiseError> {
    let size = UVec2::new(width, height);
    let normed = validate_request(size, octaves, &Persistence::new(persistence, amplitude))?;
    log::debug!("generating {width}x{height} field with {octaves} octaves, persistence {persistence}, amplitude {amplitude}");
    normed.blend(&NoiseField::random(size, rng)?.octaves(octaves)?)
}

/// Generates a `width` by `height` field of `octaves` octaves weighted by `prominence`, at a constant amplitude of 1.
///
/// `prominence` must have exactly one entry per octave.
/// Entries are taken in blend order: `prominence[k]` weights octave `octaves - 1 - k`.
///
/// ```
/// # use octave_field::{generate_noise_with_prominence, error::NoiseError, rng::NoiseRng};
/// let mut rng = NoiseRng(3);
/// assert!(generate_noise_with_prominence(32, 32, 3, &[1.0, 2.0, 4.0], &mut rng).is_ok());
/// assert_eq!(
///     generate_noise_with_prominence(32, 32, 3, &[1.0], &mut rng),
///     Err(NoiseError::ProminenceLengthMismatch { expected: 3, found: 1 })
/// );
/// ```
pub fn generate_noise_with_prominence(
    width: u32,
    height: u32,
    octaves: u32,
    prominence: &[f32],
    rng: &mut NoiseRng,
) -> Result<NoiseGrid, NoiseError> {
    let size = UVec2::new(width, height);
    let normed = validate_request(size, octaves, &Prominence::new(prominence))?;
    log::debug!("generating {width}x{height} field with {octaves} octaves by prominence");
    normed.blend(&NoiseField::random(size, rng)?.octaves(octaves)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::Smoothstep;

    fn constant_field(size: UVec2, value: f32) -> NoiseField {
        NoiseField::new(NoiseGrid::filled(size, value).unwrap())
    }

    #[test]
    fn constant_base_stays_constant() {
        let field = constant_field(UVec2::new(4, 4), 0.5);
        let grid = field.blend_persistence(2, 1.0, 1.0).unwrap();
        assert!(grid.values().iter().all(|&v| v == 0.5));
    }

    #[test]
    fn entry_points_validate_first() {
        let mut rng = NoiseRng(4);
        assert_eq!(
            generate_noise(0, 8, 2, 1.0, 1.0, &mut rng),
            Err(NoiseError::InvalidDimension {
                width: 0,
                height: 8
            })
        );
        assert_eq!(
            generate_noise(8, 8, 0, 1.0, 1.0, &mut rng),
            Err(NoiseError::InvalidOctaveCount(0))
        );
        assert_eq!(
            generate_noise(8, 8, 2, 1.0, 0.0, &mut rng),
            Err(NoiseError::DegenerateWeight(0.0))
        );
        assert_eq!(
            generate_noise(8, 8, 2, 0.0, 1.0, &mut rng),
            Err(NoiseError::DegenerateWeight(0.0))
        );
        assert_eq!(
            generate_noise_with_prominence(8, 8, 2, &[1.0, 1.0, 1.0], &mut rng),
            Err(NoiseError::ProminenceLengthMismatch {
                expected: 2,
                found: 3
            })
        );
        assert_eq!(rng, NoiseRng(4));
    }

    #[test]
    fn output_matches_requested_size() {
        let mut rng = NoiseRng(10);
        let grid = generate_noise(13, 7, 3, 0.5, 1.0, &mut rng).unwrap();
        assert_eq!((grid.width(), grid.height()), (13, 7));
        assert_eq!(grid.values().len(), 13 * 7);
        assert_ne!(rng, NoiseRng(10));
    }

    #[test]
    fn uniform_prominence_matches_constant_persistence() {
        let field = NoiseField::random(UVec2::new(24, 40), &mut NoiseRng(21)).unwrap();
        let by_persistence = field.blend_persistence(4, 1.0, 1.0).unwrap();
        let by_prominence = field.blend_prominence(4, &[1.0; 4]).unwrap();
        for (a, b) in by_persistence.values().iter().zip(by_prominence.values()) {
            assert!((a - b).abs() < 1e-6);
        }
    }

    #[test]
    fn entry_points_match_field() {
        let size = UVec2::new(20, 20);
        let field = NoiseField::random(size, &mut NoiseRng(6)).unwrap();
        let expected = field.blend_prominence(2, &[3.0, 1.0]).unwrap();
        let actual = generate_noise_with_prominence(20, 20, 2, &[3.0, 1.0], &mut NoiseRng(6)).unwrap();
        assert_eq!(expected, actual);
    }

    #[test]
    fn curve_changes_smoothing() {
        let field = NoiseField::random(UVec2::new(16, 16), &mut NoiseRng(2)).unwrap();
        let linear = field.smooth(Octave(0));
        let smooth = field.clone().with_curve(Smoothstep).smooth(Octave(0));
        assert_eq!(linear.get(0, 0), smooth.get(0, 0));
        assert_ne!(linear, smooth);
        assert_eq!(field.base().size(), UVec2::new(16, 16));
    }
}
