//! Contains [`NoiseSettings`], a serializable description of a whole noise field.

use alloc::vec::Vec;

use bevy_math::UVec2;

use crate::{
    NoiseField,
    base::QuantizedValue,
    curves::BlendCurve,
    error::NoiseError,
    grid::NoiseGrid,
    layering::{Normed, Persistence, Prominence},
    octave::validate_octave_count,
    rng::NoiseRng,
};

/// How the octaves of a field are weighted against each other.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum OctaveWeighting {
    /// Geometric decay. See [`Persistence`].
    Persistence(Persistence),
    /// One explicit factor per blend step, over a constant amplitude. See [`Prominence`].
    Prominence(Vec<f32>),
}

impl Default for OctaveWeighting {
    fn default() -> Self {
        Self::Persistence(Persistence::CONSTANT)
    }
}

impl OctaveWeighting {
    fn prepare(&self, octaves: u32) -> Result<Normed, NoiseError> {
        match self {
            Self::Persistence(persistence) => Normed::prepare(persistence, octaves as usize),
            Self::Prominence(prominence) => {
                Normed::prepare(&Prominence::new(prominence), octaves as usize)
            }
        }
    }
}

/// Everything needed to generate a noise field besides the rng.
///
/// ```
/// # use octave_field::prelude::*;
/// let settings = NoiseSettings {
///     octaves: 4,
///     weighting: OctaveWeighting::Prominence(vec![4.0, 2.0, 1.0, 0.5]),
///     ..Default::default()
/// };
/// let grid = settings.generate(&mut NoiseRng(12)).unwrap();
/// assert_eq!(grid.size(), settings.size);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serialize", serde(default))]
pub struct NoiseSettings {
    /// The width and height of the field.
    pub size: UVec2,
    /// The number of octaves to blend.
    pub octaves: u32,
    /// The resolution of the base noise. See [`QuantizedValue`].
    pub sample_size: u32,
    /// How octaves are weighted.
    pub weighting: OctaveWeighting,
    /// The curve that shapes blending within each octave's cells.
    pub curve: BlendCurve,
}

impl Default for NoiseSettings {
    fn default() -> Self {
        Self {
            size: UVec2::splat(256),
            octaves: 6,
            sample_size: QuantizedValue::DEFAULT_SAMPLE_SIZE,
            weighting: OctaveWeighting::default(),
            curve: BlendCurve::default(),
        }
    }
}

impl NoiseSettings {
    /// Checks every setting, including the total octave weight, without generating anything.
    pub fn validate(&self) -> Result<(), NoiseError> {
        self.checked().map(|_| ())
    }

    fn checked(&self) -> Result<(QuantizedValue, Normed), NoiseError> {
        NoiseGrid::validate_size(self.size)?;
        validate_octave_count(self.octaves)?;
        let generator = QuantizedValue::new(self.sample_size)?;
        let normed = self.weighting.prepare(self.octaves)?;
        Ok((generator, normed))
    }

    /// Generates a field from fresh base noise drawn from `rng`.
    pub fn generate(&self, rng: &mut NoiseRng) -> Result<NoiseGrid, NoiseError> {
        let (generator, normed) = self.checked()?;
        log::debug!(
            "generating {}x{} field with {} octaves",
            self.size.x,
            self.size.y,
            self.octaves
        );
        let field = NoiseField::random_with(self.size, &generator, rng)?.with_curve(self.curve);
        normed.blend(&field.octaves(self.octaves)?)
    }

    /// Generates a field from an existing base grid, ignoring [`size`](Self::size) and [`sample_size`](Self::sample_size).
    pub fn generate_from(&self, base: NoiseGrid) -> Result<NoiseGrid, NoiseError> {
        validate_octave_count(self.octaves)?;
        let normed = self.weighting.prepare(self.octaves)?;
        let field = NoiseField::new(base).with_curve(self.curve);
        normed.blend(&field.octaves(self.octaves)?)
    }
}
