//! Prints a small noise field as ASCII shading.
//! Pass a seed as the first argument to get a different field.

use bevy_math::UVec2;
use octave_field::prelude::*;

const SHADES: &[u8] = b" .:-=+*#%@";

fn main() -> Result<(), NoiseError> {
    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(37);

    let settings = NoiseSettings {
        size: UVec2::new(96, 48),
        octaves: 4,
        weighting: OctaveWeighting::Persistence(Persistence::new(0.7, 1.0)),
        curve: BlendCurve::Smoothstep,
        ..Default::default()
    };
    let grid = settings.generate(&mut NoiseRng(seed))?;

    // Stretch the output so the full shade range is used.
    let (min, max) = grid.min_max();
    let range = (max - min).max(f32::EPSILON);
    for row in grid.rows() {
        let line: String = row
            .iter()
            .map(|&v| {
                let t = (v - min) / range;
                let shade = ((t * SHADES.len() as f32) as usize).min(SHADES.len() - 1);
                SHADES[shade] as char
            })
            .collect();
        println!("{line}");
    }
    println!("seed {seed}, values in [{min:.3}, {max:.3}]");
    Ok(())
}
