use serde::{Deserialize, Serialize};

use crate::api::error::FieldError;

/// Upper bound on the particle count.
///
/// The pairwise pass is O(n²) with no spatial partitioning, so the count is a
/// validated limit rather than an assumption. 1200 particles is ~720k pair
/// checks per frame, still well inside a frame budget on a phone.
pub const MAX_PARTICLE_COUNT: usize = 1200;

/// All tunables for a field. Loaded from JSON (camelCase keys); every key is optional.
///
/// Lengths are CSS pixels, speeds are CSS pixels per second, times are milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldConfig {
    /// Number of stars (density).
    pub particle_count: usize,
    /// When set, overrides `particle_count` with canvas area / this value (px² per star).
    pub area_per_particle: Option<f32>,
    /// Gap between the content's bounding circle and the ring.
    pub ring_margin: f32,
    /// Width of the band stars are seeded into.
    pub ring_thickness: f32,
    /// Base orbital speed.
    pub tangential_speed: f32,
    /// Per-star multiplier range applied to `tangential_speed` at spawn.
    pub speed_range: (f32, f32),
    /// Restoring stiffness toward the ring radius (1/s²).
    pub radial_spring: f32,
    /// Per-second velocity damping.
    pub drag: f32,
    /// Size/brightness oscillation amplitude.
    pub twinkle_amplitude: f32,
    /// Twinkle angular frequency (rad/s).
    pub twinkle_frequency: f32,
    /// Rendered size of a star at full depth before twinkle.
    pub base_size: f32,
    /// Cutoff distance for star-star interaction.
    pub peer_radius: f32,
    /// Interaction strength. Positive repels, negative attracts.
    pub peer_force: f32,
    /// Added to squared distance so near-coincident stars stay finite.
    pub softening: f32,
    /// Duration of one orbit direction.
    pub period_ms: f64,
    /// Length of the blended reversal at the end of each period.
    pub ramp_ms: f64,
    /// Tangential pull outside the ramp window, in [0, 1].
    pub drive_floor: f32,
    /// Render resolution cap.
    pub max_device_pixel_ratio: f32,
    /// RNG seed for reproducible fields.
    pub seed: u64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            particle_count: 260,
            area_per_particle: None,
            ring_margin: 48.0,
            ring_thickness: 64.0,
            tangential_speed: 26.0,
            speed_range: (0.8, 1.2),
            radial_spring: 1.8,
            drag: 0.6,
            twinkle_amplitude: 0.35,
            twinkle_frequency: 1.7,
            base_size: 1.6,
            peer_radius: 22.0,
            peer_force: 900.0,
            softening: 25.0,
            period_ms: 20_000.0,
            ramp_ms: 2_000.0,
            drive_floor: 0.02,
            max_device_pixel_ratio: 2.0,
            seed: 0x5EED_57A2,
        }
    }
}

impl FieldConfig {
    /// Parse a config from a JSON string and validate it.
    pub fn from_json(json: &str) -> Result<Self, FieldError> {
        let config: FieldConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every tunable. The first violation is returned.
    pub fn validate(&self) -> Result<(), FieldError> {
        if self.particle_count > MAX_PARTICLE_COUNT {
            return Err(FieldError::TooManyParticles {
                requested: self.particle_count,
                max: MAX_PARTICLE_COUNT,
            });
        }
        if let Some(area) = self.area_per_particle {
            positive("areaPerParticle", area)?;
        }
        non_negative("ringMargin", self.ring_margin)?;
        non_negative("ringThickness", self.ring_thickness)?;
        non_negative("tangentialSpeed", self.tangential_speed)?;
        non_negative("speedRange", self.speed_range.0)?;
        non_negative("speedRange", self.speed_range.1)?;
        if self.speed_range.0 > self.speed_range.1 {
            return Err(FieldError::invalid("speedRange", "lower bound exceeds upper bound"));
        }
        non_negative("radialSpring", self.radial_spring)?;
        non_negative("drag", self.drag)?;
        non_negative("twinkleAmplitude", self.twinkle_amplitude)?;
        non_negative("twinkleFrequency", self.twinkle_frequency)?;
        positive("baseSize", self.base_size)?;
        positive("peerRadius", self.peer_radius)?;
        if !self.peer_force.is_finite() {
            return Err(FieldError::invalid("peerForce", "must be finite"));
        }
        positive("softening", self.softening)?;
        if !(self.period_ms.is_finite() && self.period_ms > 0.0) {
            return Err(FieldError::invalid("periodMs", "must be a positive duration"));
        }
        if !(self.ramp_ms.is_finite() && self.ramp_ms > 0.0 && self.ramp_ms <= self.period_ms) {
            return Err(FieldError::invalid("rampMs", "must be positive and no longer than periodMs"));
        }
        if !(0.0..=1.0).contains(&self.drive_floor) {
            return Err(FieldError::invalid("driveFloor", "must be within [0, 1]"));
        }
        if !(self.max_device_pixel_ratio.is_finite() && self.max_device_pixel_ratio >= 1.0) {
            return Err(FieldError::invalid("maxDevicePixelRatio", "must be at least 1"));
        }
        Ok(())
    }

    /// Particle count for a canvas of the given CSS size.
    /// Area-based density wins when configured; the result never exceeds MAX_PARTICLE_COUNT.
    pub fn count_for_area(&self, width: f32, height: f32) -> usize {
        match self.area_per_particle {
            Some(area) if area > 0.0 => {
                let n = (width.max(0.0) * height.max(0.0) / area).floor();
                (n as usize).min(MAX_PARTICLE_COUNT)
            }
            _ => self.particle_count.min(MAX_PARTICLE_COUNT),
        }
    }
}

fn non_negative(field: &'static str, v: f32) -> Result<(), FieldError> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(FieldError::invalid(field, "must be finite and non-negative"))
    }
}

fn positive(field: &'static str, v: f32) -> Result<(), FieldError> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(FieldError::invalid(field, "must be finite and positive"))
    }
}
