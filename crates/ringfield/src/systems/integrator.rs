//! Per-frame force integration for the star ring.
//!
//! Each step: pairwise short-range push, radial spring toward the ring,
//! damping, tangential drive toward the cycle's target speed, then move.
//! Decorative, not physically exact.

use glam::Vec2;

use crate::core::particle::Particle;
use crate::systems::cycle::CycleState;

/// Floor applied to a star's distance from the ring center before dividing by it.
pub const MIN_RADIAL_DISTANCE: f32 = 1e-3;

/// Push direction for stars at exactly the same point, where the separation has no direction.
/// `accumulate_pairwise` applies it with opposite signs to the two stars, so they still split.
pub const COINCIDENT_AXIS: Vec2 = Vec2::X;

/// Force parameters for one integration step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceParams {
    pub center: Vec2,
    pub ring_radius: f32,
    pub radial_spring: f32,
    pub drag: f32,
    pub peer_radius: f32,
    pub peer_force: f32,
    pub softening: f32,
}

/// Acceleration on a star from a neighbor at `delta = self − other`.
///
/// Magnitude is `peer_force · (1 − d/peer_radius) / (d² + softening)`: linear
/// falloff to zero at the cutoff, inverse-square inside it, bounded by
/// `peer_force / softening` at d = 0. Strictly decreasing over [0, cutoff),
/// exactly zero at or beyond the cutoff.
#[inline]
pub fn pair_accel(delta: Vec2, peer_radius: f32, peer_force: f32, softening: f32) -> Vec2 {
    let d2 = delta.length_squared();
    if d2 >= peer_radius * peer_radius {
        return Vec2::ZERO;
    }
    let d = d2.sqrt();
    let magnitude = peer_force * (1.0 - d / peer_radius) / (d2 + softening);
    delta.try_normalize().unwrap_or(COINCIDENT_AXIS) * magnitude
}

/// Accumulate pairwise accelerations for every unordered pair. O(n²).
///
/// `accel` must be the same length as `particles`; it is overwritten.
pub fn accumulate_pairwise(particles: &[Particle], params: &ForceParams, accel: &mut [Vec2]) {
    accel.iter_mut().for_each(|a| *a = Vec2::ZERO);
    let n = particles.len().min(accel.len());
    for i in 0..n {
        let pi = particles[i].pos;
        for j in (i + 1)..n {
            let f = pair_accel(
                pi - particles[j].pos,
                params.peer_radius,
                params.peer_force,
                params.softening,
            );
            accel[i] += f;
            accel[j] -= f;
        }
    }
}

/// Spring acceleration pulling a star at `pos` back to the ring.
#[inline]
pub fn radial_accel(pos: Vec2, params: &ForceParams) -> Vec2 {
    let offset = pos - params.center;
    let r = offset.length().max(MIN_RADIAL_DISTANCE);
    let unit = offset / r;
    unit * (-params.radial_spring * (r - params.ring_radius))
}

/// Blend the tangential part of `vel` toward `target_speed`; the radial part is untouched.
///
/// The tangent is the radial unit vector rotated +90°, matching how stars are seeded.
#[inline]
pub fn drive_tangential(vel: Vec2, offset: Vec2, target_speed: f32, strength: f32) -> Vec2 {
    let r = offset.length();
    if r < MIN_RADIAL_DISTANCE {
        return vel;
    }
    let radial = offset / r;
    let tangent = radial.perp();
    let v_r = vel.dot(radial);
    let v_t = vel.dot(tangent);
    let blended = v_t + (target_speed - v_t) * strength.clamp(0.0, 1.0);
    radial * v_r + tangent * blended
}

/// Advances the whole store one step. Holds a scratch buffer so steps don't allocate.
pub struct Integrator {
    accel: Vec<Vec2>,
}

impl Integrator {
    pub fn new() -> Self {
        Self { accel: Vec::new() }
    }

    /// Advance every star by `dt` seconds under `cycle`.
    pub fn step(
        &mut self,
        particles: &mut [Particle],
        params: &ForceParams,
        cycle: &CycleState,
        dt: f32,
    ) {
        self.accel.resize(particles.len(), Vec2::ZERO);
        accumulate_pairwise(particles, params, &mut self.accel);

        let damping = (1.0 - params.drag * dt).max(0.0);
        for (p, pair) in particles.iter_mut().zip(self.accel.iter()) {
            let a = *pair + radial_accel(p.pos, params);
            p.vel = (p.vel + a * dt) * damping;
            p.vel = drive_tangential(
                p.vel,
                p.pos - params.center,
                cycle.target_direction * p.base_speed,
                cycle.drive_strength,
            );
            p.pos += p.vel * dt;
        }
    }
}

impl Default for Integrator {
    fn default() -> Self {
        Self::new()
    }
}
