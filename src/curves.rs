//! Contains interpolation helpers and the curves that shape blending within an octave's cells.

use bevy_math::{Curve, curve::Interval};

/// Linearly interpolates from `a` to `b` by `t`, as `(1 - t) * a + t * b`.
///
/// `t` is not clamped. Callers are expected to keep it in `[0, 1]`.
///
/// ```
/// # use octave_field::curves::lerp;
/// assert_eq!(lerp(2.0, 4.0, 0.5), 3.0);
/// assert_eq!(lerp(2.0, 4.0, 0.0), 2.0);
/// ```
#[inline(always)]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    (1.0 - t) * a + t * b
}

/// Bilinearly interpolates the corners of a cell.
/// `corners` is `[(x0, y0), (x1, y0), (x0, y1), (x1, y1)]`.
/// Interpolation runs along x at both rows first, then along y between those.
#[inline(always)]
pub fn bilerp(corners: [f32; 4], bx: f32, by: f32) -> f32 {
    let bottom = lerp(corners[0], corners[1], bx);
    let top = lerp(corners[2], corners[3], bx);
    lerp(bottom, top, by)
}

/// Linear interpolation. Blend fractions pass through untouched.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "bevy_reflect", derive(bevy_reflect::Reflect))]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Linear;

impl Curve<f32> for Linear {
    #[inline]
    fn domain(&self) -> Interval {
        Interval::EVERYWHERE
    }

    #[inline]
    fn sample_unchecked(&self, t: f32) -> f32 {
        t
    }
}

/// Smoothstep interpolation. This hides the creases linear blending leaves along cell edges.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "bevy_reflect", derive(bevy_reflect::Reflect))]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Smoothstep;

impl Curve<f32> for Smoothstep {
    #[inline]
    fn domain(&self) -> Interval {
        Interval::UNIT
    }

    #[inline]
    fn sample_unchecked(&self, t: f32) -> f32 {
        t * t * (t * (-2.0) + 3.0)
    }
}

/// Picks between the curves in this module at runtime, for use in settings.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "bevy_reflect", derive(bevy_reflect::Reflect))]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum BlendCurve {
    /// See [`Linear`].
    #[default]
    Linear,
    /// See [`Smoothstep`].
    Smoothstep,
}

impl Curve<f32> for BlendCurve {
    #[inline]
    fn domain(&self) -> Interval {
        match self {
            Self::Linear => Linear.domain(),
            Self::Smoothstep => Smoothstep.domain(),
        }
    }

    #[inline]
    fn sample_unchecked(&self, t: f32) -> f32 {
        match self {
            Self::Linear => Linear.sample_unchecked(t),
            Self::Smoothstep => Smoothstep.sample_unchecked(t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_endpoints() {
        assert_eq!(lerp(0.2, 0.8, 0.0), 0.2);
        assert_eq!(lerp(0.2, 0.8, 1.0), 0.8);
        assert_eq!(lerp(0.5, 0.5, 0.375), 0.5);
    }

    #[test]
    fn bilerp_runs_x_then_y() {
        let corners = [0.0, 1.0, 2.0, 3.0];
        assert_eq!(bilerp(corners, 0.0, 0.0), 0.0);
        assert_eq!(bilerp(corners, 1.0, 0.0), 1.0);
        assert_eq!(bilerp(corners, 0.0, 1.0), 2.0);
        assert_eq!(bilerp(corners, 0.5, 0.5), 1.5);
    }

    #[test]
    fn smoothstep_fixes_ends_and_middle() {
        assert_eq!(Smoothstep.sample_unchecked(0.0), 0.0);
        assert_eq!(Smoothstep.sample_unchecked(1.0), 1.0);
        assert_eq!(Smoothstep.sample_unchecked(0.5), 0.5);
        assert_eq!(Linear.sample_unchecked(0.3), 0.3);
    }

    #[test]
    fn blend_curve_dispatches() {
        assert_eq!(BlendCurve::default(), BlendCurve::Linear);
        assert_eq!(BlendCurve::Linear.sample_unchecked(0.25), 0.25);
        assert_eq!(
            BlendCurve::Smoothstep.sample_unchecked(0.25),
            Smoothstep.sample_unchecked(0.25)
        );
    }
}
