//! A single star.

use glam::Vec2;

/// Depth range for stars. Near stars (1.0) render larger, brighter and more opaque.
pub const MIN_DEPTH: f32 = 0.3;
pub const MAX_DEPTH: f32 = 1.0;

/// A single star with physics and rendering state.
/// No identity beyond its index in the store.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Position in canvas CSS pixels.
    pub pos: Vec2,
    /// Velocity in CSS pixels per second.
    pub vel: Vec2,
    /// Tangential speed magnitude fixed at spawn.
    pub base_speed: f32,
    /// Twinkle oscillator offset (radians).
    pub phase: f32,
    /// Depth in [MIN_DEPTH, MAX_DEPTH].
    pub depth: f32,
    /// Rendered size before twinkle.
    pub size: f32,
}

impl Particle {
    /// Base size for a star at `depth`, given the size of a full-depth star.
    pub fn size_for_depth(base_size: f32, depth: f32) -> f32 {
        base_size * (0.45 + 0.55 * depth)
    }

    /// Distance from `center`.
    pub fn radial_distance(&self, center: Vec2) -> f32 {
        self.pos.distance(center)
    }
}
