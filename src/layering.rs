//! Contains logic for weighting octaves and blending them into one normalized grid.
//!
//! Octaves are always visited in [blend order](crate::octave::OctaveSet::blend_order): from the smoothest octave down to octave 0.
//! Every weight sequence here is indexed by that step, not by octave index.

use alloc::vec::Vec;

use crate::{error::NoiseError, grid::NoiseGrid, octave::OctaveSet};

/// Provides a user facing view of some [`LayerWeights`].
pub trait LayerWeightsSettings {
    /// The kind of [`LayerWeights`] produced by these settings.
    type Weights<'a>: LayerWeights
    where
        Self: 'a;

    /// Prepares a new [`LayerWeights`] for a blend.
    fn start_weights(&self) -> Self::Weights<'_>;

    /// Checks that these settings can weight `steps` octaves.
    fn validate(&self, steps: usize) -> Result<(), NoiseError> {
        let _ = steps;
        Ok(())
    }
}

/// Specifies that this generates configurable weights for successive octaves.
pub trait LayerWeights {
    /// Generates the weight of the next octave.
    fn next_weight(&mut self) -> f32;
}

/// A [`LayerWeightsSettings`] for [`PersistenceWeights`].
///
/// The amplitude is multiplied by the persistence before every step, including the first,
/// so step `k` weighs `amplitude * persistence^(k + 1)`.
/// Values of `persistence` greater than 1 make later (finer) octaves weigh more, while values less than 1 make earlier (smoother) octaves weigh more.
/// A value of 1 makes all octaves equally weighted.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "bevy_reflect", derive(bevy_reflect::Reflect))]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Persistence {
    /// The factor the amplitude decays by each step.
    pub persistence: f32,
    /// The amplitude before the first step.
    pub amplitude: f32,
}

impl Default for Persistence {
    fn default() -> Self {
        Self::CONSTANT
    }
}

impl Persistence {
    /// Makes every octave get the same weight.
    pub const CONSTANT: Self = Self {
        persistence: 1.0,
        amplitude: 1.0,
    };

    /// Creates persistence settings.
    pub fn new(persistence: f32, amplitude: f32) -> Self {
        Self {
            persistence,
            amplitude,
        }
    }
}

/// The [`LayerWeights`] for [`Persistence`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PersistenceWeights {
    persistence: f32,
    amplitude: f32,
}

impl LayerWeights for PersistenceWeights {
    #[inline]
    fn next_weight(&mut self) -> f32 {
        self.amplitude *= self.persistence;
        self.amplitude
    }
}

impl LayerWeightsSettings for Persistence {
    type Weights<'a> = PersistenceWeights;

    #[inline]
    fn start_weights(&self) -> Self::Weights<'_> {
        PersistenceWeights {
            persistence: self.persistence,
            amplitude: self.amplitude,
        }
    }
}

/// A [`LayerWeightsSettings`] that scales each step of a [`Persistence`] by an explicit factor.
///
/// `prominence[k]` applies to blend step `k`, which is octave `count - 1 - k`.
/// So the first entry weights the smoothest octave, and the last entry weights octave 0.
/// This inversion is easy to trip over, but existing prominence lists depend on it.
///
/// Negative entries are accepted, but then the output is no longer bounded by the octaves' values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prominence<'a> {
    /// One factor per blend step.
    pub prominence: &'a [f32],
    /// The decay applied underneath the factors.
    pub decay: Persistence,
}

impl<'a> Prominence<'a> {
    /// Creates prominence weighting over a constant amplitude of 1.
    pub fn new(prominence: &'a [f32]) -> Self {
        Self {
            prominence,
            decay: Persistence::CONSTANT,
        }
    }
}

/// The [`LayerWeights`] for [`Prominence`].
#[derive(Debug, Clone)]
pub struct ProminenceWeights<'a> {
    decay: PersistenceWeights,
    prominence: core::slice::Iter<'a, f32>,
}

impl LayerWeights for ProminenceWeights<'_> {
    #[inline]
    fn next_weight(&mut self) -> f32 {
        let amplitude = self.decay.next_weight();
        // Past the end, steps contribute nothing. `validate` rules that out for blends.
        amplitude * self.prominence.next().copied().unwrap_or(0.0)
    }
}

impl<'p> LayerWeightsSettings for Prominence<'p> {
    type Weights<'a>
        = ProminenceWeights<'a>
    where
        Self: 'a;

    #[inline]
    fn start_weights(&self) -> Self::Weights<'_> {
        ProminenceWeights {
            decay: self.decay.start_weights(),
            prominence: self.prominence.iter(),
        }
    }

    fn validate(&self, steps: usize) -> Result<(), NoiseError> {
        if self.prominence.len() != steps {
            return Err(NoiseError::ProminenceLengthMismatch {
                expected: steps,
                found: self.prominence.len(),
            });
        }
        Ok(())
    }
}

/// Blends octaves into a weighted average.
///
/// The weights of every step are computed up front, so a blend whose total weight is zero or not finite
/// fails before any grid is touched.
#[derive(Debug, Clone, PartialEq)]
pub struct Normed {
    total_weight: f32,
    normalized: Vec<f32>,
}

impl Normed {
    /// Runs `settings` for `steps` octaves, totalling their weights.
    pub fn prepare(settings: &impl LayerWeightsSettings, steps: usize) -> Result<Self, NoiseError> {
        settings.validate(steps)?;
        let mut weights = settings.start_weights();
        let raw = (0..steps).map(|_| weights.next_weight()).collect::<Vec<_>>();
        let total_weight = raw.iter().sum::<f32>();
        if total_weight == 0.0 || !total_weight.is_finite() {
            log::debug!("refusing to blend {steps} octaves with total weight {total_weight}");
            return Err(NoiseError::DegenerateWeight(total_weight));
        }
        let normalized = raw.into_iter().map(|w| w / total_weight).collect();
        Ok(Self {
            total_weight,
            normalized,
        })
    }

    /// The sum of every step's weight.
    #[inline]
    pub fn total_weight(&self) -> f32 {
        self.total_weight
    }

    /// Each step's weight divided by [`total_weight`](Self::total_weight). These sum to 1.
    #[inline]
    pub fn normalized_weights(&self) -> &[f32] {
        &self.normalized
    }

    /// Blends `octaves` in blend order.
    /// The set must hold as many octaves as were prepared.
    pub fn blend(&self, octaves: &OctaveSet) -> Result<NoiseGrid, NoiseError> {
        if octaves.len() != self.normalized.len() {
            return Err(NoiseError::OctaveSetMismatch {
                expected: octaves.len(),
                found: self.normalized.len(),
            });
        }

        let mut blended: Option<NoiseGrid> = None;
        for ((_, grid), &weight) in octaves.blend_order().zip(&self.normalized) {
            let result = blended.get_or_insert_with(|| grid.zeroed_like());
            include_weighted(result.values_mut(), grid.values(), weight);
        }
        log::debug!(
            "blended {} octaves with total weight {}",
            octaves.len(),
            self.total_weight
        );
        // `OctaveSet` is never empty.
        blended.ok_or(NoiseError::InvalidOctaveCount(0))
    }
}

#[cfg(feature = "rayon")]
#[inline]
fn include_weighted(running: &mut [f32], values: &[f32], weight: f32) {
    use rayon::prelude::*;
    running
        .par_iter_mut()
        .zip(values.par_iter())
        .for_each(|(total, &value)| *total += value * weight);
}

#[cfg(not(feature = "rayon"))]
#[inline]
fn include_weighted(running: &mut [f32], values: &[f32], weight: f32) {
    for (total, &value) in running.iter_mut().zip(values) {
        *total += value * weight;
    }
}

/// Blends `octaves` weighted by `settings` into one normalized grid.
pub fn blend_octaves(
    octaves: &OctaveSet,
    settings: &impl LayerWeightsSettings,
) -> Result<NoiseGrid, NoiseError> {
    Normed::prepare(settings, octaves.len())?.blend(octaves)
}
