//! Contains common imports

pub use crate::{
    NoiseField, NoiseFunction,
    base::QuantizedValue,
    curves::{BlendCurve, Linear, Smoothstep},
    error::NoiseError,
    generate_noise, generate_noise_with_prominence,
    grid::NoiseGrid,
    layering::{LayerWeightsSettings, Normed, Persistence, Prominence, blend_octaves},
    octave::{MAX_OCTAVES, Octave, OctaveSet},
    rng::NoiseRng,
    settings::{NoiseSettings, OctaveWeighting},
};
