use crate::core::particle::Particle;
use crate::renderer::instance::{SpriteBuffer, StarSprite};

/// Smallest square ever drawn, so twinkle never makes a star vanish or go negative.
pub const MIN_SPRITE_SIZE: f32 = 0.35;

/// Page color scheme, read from the host each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn from_dark_flag(is_dark: bool) -> Self {
        if is_dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }
}

/// Look parameters for sprite building.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderParams {
    pub twinkle_amplitude: f32,
    /// Angular frequency in rad/s.
    pub twinkle_frequency: f32,
}

/// Twinkle offset for a star with oscillator `phase` at `t_secs`.
#[inline]
pub fn twinkle(phase: f32, t_secs: f32, params: &RenderParams) -> f32 {
    params.twinkle_amplitude * (phase + t_secs * params.twinkle_frequency).sin()
}

/// Theme-independent star intensity in [0, 1]: deeper stars and the bright half of the twinkle score higher.
#[inline]
pub fn intensity(depth: f32, twinkle: f32) -> f32 {
    (0.35 + 0.55 * depth + 0.25 * twinkle).clamp(0.0, 1.0)
}

/// Gray level for a star.
///
/// The mapping inverts between themes to keep contrast: on dark pages more
/// intense stars are lighter (0.55–1.0); on light pages they are darker
/// (0.45 down to 0.0). Every dark-theme value exceeds every light-theme value.
#[inline]
pub fn luminance(depth: f32, twinkle: f32, theme: Theme) -> f32 {
    let i = intensity(depth, twinkle);
    match theme {
        Theme::Dark => 0.55 + 0.45 * i,
        Theme::Light => 0.45 * (1.0 - i),
    }
}

/// Opacity grows with depth.
#[inline]
pub fn opacity(depth: f32) -> f32 {
    (0.3 + 0.65 * depth).clamp(0.0, 1.0)
}

/// Fill `buffer` with one sprite per star.
pub fn build_sprites(
    particles: &[Particle],
    t_secs: f32,
    theme: Theme,
    params: &RenderParams,
    buffer: &mut SpriteBuffer,
) {
    buffer.clear();
    for p in particles {
        let tw = twinkle(p.phase, t_secs, params);
        buffer.push(StarSprite {
            x: p.pos.x,
            y: p.pos.y,
            size: (p.size + tw).max(MIN_SPRITE_SIZE),
            luminance: luminance(p.depth, tw, theme),
            alpha: opacity(p.depth),
            depth: p.depth,
            _pad: [0.0; 2],
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn params() -> RenderParams {
        RenderParams {
            twinkle_amplitude: 0.35,
            twinkle_frequency: 1.7,
        }
    }

    #[test]
    fn dark_theme_is_always_brighter() {
        for depth in [0.3, 0.5, 0.75, 1.0] {
            for tw in [-0.35, -0.1, 0.0, 0.2, 0.35] {
                let dark = luminance(depth, tw, Theme::Dark);
                let light = luminance(depth, tw, Theme::Light);
                assert!(dark > light, "depth {} twinkle {}: {} <= {}", depth, tw, dark, light);
            }
        }
    }

    #[test]
    fn mapping_inverts_between_themes() {
        let near_dark = luminance(1.0, 0.0, Theme::Dark);
        let far_dark = luminance(0.3, 0.0, Theme::Dark);
        let near_light = luminance(1.0, 0.0, Theme::Light);
        let far_light = luminance(0.3, 0.0, Theme::Light);
        // Near stars stand out: lighter on dark pages, darker on light ones.
        assert!(near_dark > far_dark);
        assert!(near_light < far_light);
    }

    #[test]
    fn opacity_increases_with_depth() {
        assert!(opacity(1.0) > opacity(0.6));
        assert!(opacity(0.6) > opacity(0.3));
    }

    #[test]
    fn twinkle_is_bounded_by_amplitude() {
        let p = params();
        for i in 0..200 {
            let t = i as f32 * 0.05;
            assert!(twinkle(0.7, t, &p).abs() <= p.twinkle_amplitude + 1e-6);
        }
    }

    #[test]
    fn sprites_follow_particles() {
        let stars = [
            Particle { pos: Vec2::new(10.0, 20.0), vel: Vec2::ZERO, base_speed: 1.0, phase: 0.0, depth: 1.0, size: 1.6 },
            Particle { pos: Vec2::new(-5.0, 3.0), vel: Vec2::ZERO, base_speed: 1.0, phase: 1.0, depth: 0.3, size: 0.1 },
        ];
        let mut buf = SpriteBuffer::new();
        build_sprites(&stars, 0.0, Theme::Dark, &params(), &mut buf);
        assert_eq!(buf.len(), 2);
        let first = buf.sprites[0];
        assert_eq!((first.x, first.y), (10.0, 20.0));
        // sin(0) = 0, so size is the base size.
        assert!((first.size - 1.6).abs() < 1e-6);
        // Tiny star is floored, never negative.
        assert!(buf.sprites[1].size >= MIN_SPRITE_SIZE);
    }

    #[test]
    fn rebuilding_replaces_previous_frame() {
        let star = Particle { pos: Vec2::ZERO, vel: Vec2::ZERO, base_speed: 1.0, phase: 0.0, depth: 0.5, size: 1.0 };
        let mut buf = SpriteBuffer::new();
        build_sprites(&[star, star, star], 0.0, Theme::Light, &params(), &mut buf);
        build_sprites(&[star], 0.0, Theme::Light, &params(), &mut buf);
        assert_eq!(buf.len(), 1);
    }
}
