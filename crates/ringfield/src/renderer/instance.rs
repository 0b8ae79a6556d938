use bytemuck::{Pod, Zeroable};

/// One star ready to draw: a filled square centered on (x, y).
/// 8 floats = 32 bytes stride, so a JS renderer can read the buffer directly.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct StarSprite {
    /// Center X in canvas CSS pixels.
    pub x: f32,
    /// Center Y in canvas CSS pixels.
    pub y: f32,
    /// Side length of the square in CSS pixels.
    pub size: f32,
    /// Gray level, 0.0 = black, 1.0 = white.
    pub luminance: f32,
    /// Opacity (0.0 = invisible, 1.0 = opaque).
    pub alpha: f32,
    /// Star depth, kept for renderers that tint by distance.
    pub depth: f32,
    pub _pad: [f32; 2],
}

impl StarSprite {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    /// Top-left corner of the square.
    pub fn origin(&self) -> (f32, f32) {
        (self.x - self.size * 0.5, self.y - self.size * 0.5)
    }

    /// 0–255 channel value for the gray level.
    pub fn channel(&self) -> u8 {
        (self.luminance.clamp(0.0, 1.0) * 255.0).round() as u8
    }
}

/// Sprites for one frame, in store order.
pub struct SpriteBuffer {
    pub sprites: Vec<StarSprite>,
}

impl SpriteBuffer {
    pub fn new() -> Self {
        Self {
            sprites: Vec::with_capacity(512),
        }
    }

    pub fn clear(&mut self) {
        self.sprites.clear();
    }

    pub fn push(&mut self, sprite: StarSprite) {
        self.sprites.push(sprite);
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    pub fn sprite_count(&self) -> u32 {
        self.sprites.len() as u32
    }

    /// Flat float view of the buffer.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.sprites)
    }

    /// Raw pointer to sprite data for direct reads from JS memory.
    pub fn sprites_ptr(&self) -> *const f32 {
        self.sprites.as_ptr() as *const f32
    }
}

impl Default for SpriteBuffer {
    fn default() -> Self {
        Self::new()
    }
}
