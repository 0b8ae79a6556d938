// extensions/easing.rs
//
// Pure easing functions for blending between cycle directions.
// No dependencies on the simulation state.

/// Hermite smoothstep, 3t² − 2t³. Zero slope at both ends.
/// Input is clamped to [0, 1]; output is in [0, 1].
#[inline]
pub fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Linearly interpolate between two values.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
