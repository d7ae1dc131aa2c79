//! Contains the error type shared by every fallible operation in this crate.

use thiserror::Error;

/// Everything that can go wrong while building a noise field.
///
/// All of these are detected before or immediately after the work they guard,
/// so a caller never receives a partially filled or NaN-poisoned grid.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum NoiseError {
    /// A grid was requested with a zero width or height.
    #[error("invalid grid dimensions {width}x{height}: both must be at least 1")]
    InvalidDimension {
        /// The requested width.
        width: u32,
        /// The requested height.
        height: u32,
    },
    /// The number of octaves was zero or exceeded [`MAX_OCTAVES`](crate::octave::MAX_OCTAVES).
    #[error("invalid octave count {0}: must be between 1 and {max}", max = crate::octave::MAX_OCTAVES)]
    InvalidOctaveCount(u32),
    /// A prominence list did not have exactly one entry per octave.
    #[error("prominence has {found} entries but {expected} octaves were requested")]
    ProminenceLengthMismatch {
        /// The number of octaves.
        expected: usize,
        /// The length of the prominence list.
        found: usize,
    },
    /// Weights were prepared for a different number of octaves than were blended.
    #[error("weights were prepared for {found} octaves but {expected} were blended")]
    OctaveSetMismatch {
        /// The number of octaves blended.
        expected: usize,
        /// The number of octaves the weights were prepared for.
        found: usize,
    },
    /// The summed octave weights were zero or not finite, so the blend can not be normalized.
    #[error("total octave weight {0} can not be used to normalize the blend")]
    DegenerateWeight(f32),
    /// Raw values handed to a grid did not match its dimensions.
    #[error("grid of {expected} cells can not be built from {found} values")]
    GridSizeMismatch {
        /// `width * height`.
        expected: usize,
        /// The number of values supplied.
        found: usize,
    },
    /// The base generator was asked to quantize into zero steps, or into more than `f32` can tell apart.
    #[error("sample size must be between 1 and {max}", max = crate::base::QuantizedValue::MAX_SAMPLE_SIZE)]
    InvalidSampleSize,
}
