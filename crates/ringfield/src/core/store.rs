use std::f32::consts::TAU;

use glam::Vec2;

use crate::core::particle::{Particle, MAX_DEPTH, MIN_DEPTH};
use crate::core::rng::Rng;

/// Largest random offset added to each star's even angular slot (radians).
pub const ANGLE_JITTER: f32 = 0.03;

/// Parameters for one seeding pass.
#[derive(Debug, Clone, Copy)]
pub struct SeedParams {
    pub count: usize,
    pub center: Vec2,
    pub ring_radius: f32,
    pub ring_thickness: f32,
    /// Base tangential speed before the per-star multiplier.
    pub tangential_speed: f32,
    /// Per-star speed multiplier range.
    pub speed_range: (f32, f32),
    /// Size of a full-depth star.
    pub base_size: f32,
}

/// Place `count` stars around the ring, moving tangentially.
///
/// Angles are evenly spaced with a little jitter; the radial offset is uniform
/// across the band. Initial velocity is purely tangential.
pub fn seed(params: &SeedParams, rng: &mut Rng) -> Vec<Particle> {
    let half = params.ring_thickness.max(0.0) * 0.5;
    let mut out = Vec::with_capacity(params.count);
    for i in 0..params.count {
        let slot = i as f32 / params.count as f32 * TAU;
        let theta = slot + rng.range(-ANGLE_JITTER, ANGLE_JITTER);
        let r = (params.ring_radius + rng.range(-half, half)).max(0.0);

        let radial = Vec2::new(theta.cos(), theta.sin());
        let tangent = radial.perp();

        let base_speed =
            params.tangential_speed * rng.range(params.speed_range.0, params.speed_range.1);
        let depth = rng.range(MIN_DEPTH, MAX_DEPTH);

        out.push(Particle {
            pos: params.center + radial * r,
            vel: tangent * base_speed,
            base_speed,
            phase: rng.angle(),
            depth,
            size: Particle::size_for_depth(params.base_size, depth),
        });
    }
    out
}

/// Owns the live stars. Always replaced wholesale; stars are never added or removed one at a time.
pub struct ParticleStore {
    particles: Vec<Particle>,
}

impl ParticleStore {
    pub fn new() -> Self {
        Self {
            particles: Vec::new(),
        }
    }

    /// Discard every star and seed a fresh set.
    pub fn reseed(&mut self, params: &SeedParams, rng: &mut Rng) {
        self.particles = seed(params, rng);
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }

    pub fn as_mut_slice(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

impl Default for ParticleStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(count: usize) -> SeedParams {
        SeedParams {
            count,
            center: Vec2::new(400.0, 300.0),
            ring_radius: 200.0,
            ring_thickness: 60.0,
            tangential_speed: 25.0,
            speed_range: (0.8, 1.2),
            base_size: 1.6,
        }
    }

    #[test]
    fn seed_yields_exact_count() {
        let mut rng = Rng::new(1);
        for n in [0, 1, 7, 260, 1000] {
            assert_eq!(seed(&params(n), &mut rng).len(), n);
        }
    }

    #[test]
    fn seed_stays_inside_band() {
        let mut rng = Rng::new(2);
        let p = params(500);
        for star in seed(&p, &mut rng) {
            let r = star.radial_distance(p.center);
            assert!(
                r >= p.ring_radius - 30.0 - 1e-3 && r <= p.ring_radius + 30.0 + 1e-3,
                "radius {} outside band",
                r
            );
        }
    }

    #[test]
    fn initial_velocity_is_tangential() {
        let mut rng = Rng::new(3);
        let p = params(64);
        for star in seed(&p, &mut rng) {
            let radial = (star.pos - p.center).normalize();
            let along = star.vel.dot(radial);
            assert!(along.abs() < 1e-3, "radial velocity {}", along);
            let speed = star.vel.length();
            assert!((speed - star.base_speed).abs() < 1e-3);
            assert!(speed >= 25.0 * 0.8 - 1e-3 && speed <= 25.0 * 1.2 + 1e-3);
        }
    }

    #[test]
    fn angles_are_evenly_spaced_with_small_jitter() {
        let mut rng = Rng::new(4);
        let p = params(100);
        for (i, star) in seed(&p, &mut rng).iter().enumerate() {
            let d = star.pos - p.center;
            let theta = d.y.atan2(d.x).rem_euclid(TAU);
            let slot = i as f32 / 100.0 * TAU;
            let mut diff = (theta - slot).abs();
            diff = diff.min(TAU - diff);
            assert!(diff <= ANGLE_JITTER + 1e-4, "star {} off by {}", i, diff);
        }
    }

    #[test]
    fn depth_in_range() {
        let mut rng = Rng::new(5);
        for star in seed(&params(300), &mut rng) {
            assert!((MIN_DEPTH..=MAX_DEPTH).contains(&star.depth));
        }
    }

    #[test]
    fn reseed_replaces_everything() {
        let mut rng = Rng::new(6);
        let mut store = ParticleStore::new();
        store.reseed(&params(50), &mut rng);
        assert_eq!(store.len(), 50);
        store.reseed(&params(12), &mut rng);
        assert_eq!(store.len(), 12);
    }
}
