//! Defines RNG for noise especially.
//! This does not use the `rand` crate so that every cell of a base grid is a pure function of its seed and position.

use bevy_math::UVec2;

/// A seeded RNG inspired by [FxHash](https://crates.io/crates/fxhash).
/// This is similar to a hash function, but does not use std's hash traits, as those produce `u64` outputs only.
///
/// This stores the seed of the RNG. Two fields generated from equal seeds are identical.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct NoiseRng(pub u32);

/// Represents something that can be used as an input to [`NoiseRng`]'s randomizers.
pub trait NoiseRngInput {
    /// Collapses these values into a single [`u32`] to be put through the RNG.
    fn collapse_for_rng(self) -> u32;
}

impl NoiseRng {
    /// This is a large prime number with even bit distribution.
    /// This lets use use this as a multiplier in the rng.
    const KEY: u32 = 249_222_277;
    /// Collapses the second axis of a cell position into the first.
    const COEFFICIENT_KEY: u32 = 189_221_569;

    /// Creates an rng seeded from the system clock.
    /// Fields made this way are not reproducible across runs, so prefer an explicit seed when that matters.
    #[cfg(feature = "std")]
    pub fn from_time() -> Self {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos())
            .unwrap_or_default();
        // Fold the high bits in so seeds taken within the same second still differ.
        let folded = (nanos as u64) ^ ((nanos >> 64) as u64);
        let mut rng = Self((folded as u32) ^ ((folded >> 32) as u32));
        rng.re_seed();
        rng
    }

    /// Determenisticly changes the seed significantly.
    #[inline(always)]
    pub fn re_seed(&mut self) {
        self.0 = Self::KEY.wrapping_mul(self.0 ^ Self::COEFFICIENT_KEY);
    }

    /// Based on `input`, generates a random `u32`.
    #[inline(always)]
    pub fn rand_u32(&self, input: impl NoiseRngInput) -> u32 {
        let i = input.collapse_for_rng();
        let a = i.wrapping_mul(Self::KEY);
        (a ^ i ^ self.0).wrapping_mul(Self::KEY)
    }

    /// Based on `bits`, picks one of `steps` evenly likely buckets, returning a value in `0..steps`.
    ///
    /// This uses the high bits of `bits`, which are far better mixed by [`rand_u32`](Self::rand_u32) than the low ones.
    #[inline(always)]
    pub fn bucket(bits: u32, steps: u32) -> u32 {
        ((bits as u64 * steps as u64) >> 32) as u32
    }
}

impl NoiseRngInput for u32 {
    #[inline(always)]
    fn collapse_for_rng(self) -> u32 {
        self
    }
}

impl NoiseRngInput for UVec2 {
    #[inline(always)]
    fn collapse_for_rng(self) -> u32 {
        self.x
            .wrapping_add(self.y.wrapping_mul(NoiseRng::COEFFICIENT_KEY))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_bits() {
        let a = NoiseRng(42);
        let b = NoiseRng(42);
        assert_eq!(a.rand_u32(UVec2::new(3, 9)), b.rand_u32(UVec2::new(3, 9)));
    }

    #[test]
    fn re_seed_changes_output() {
        let mut rng = NoiseRng(7);
        let before = rng.rand_u32(11);
        rng.re_seed();
        assert_ne!(rng, NoiseRng(7));
        assert_ne!(before, rng.rand_u32(11));
    }

    #[test]
    fn re_seed_escapes_zero() {
        let mut rng = NoiseRng(0);
        rng.re_seed();
        assert_ne!(rng.0, 0);
    }

    #[test]
    fn bucket_stays_in_range() {
        for bits in [0, 1, u32::MAX / 2, u32::MAX - 1, u32::MAX] {
            assert!(NoiseRng::bucket(bits, 8192) < 8192);
            assert_eq!(NoiseRng::bucket(bits, 1), 0);
        }
        assert_eq!(NoiseRng::bucket(u32::MAX, 8192), 8191);
    }
}
