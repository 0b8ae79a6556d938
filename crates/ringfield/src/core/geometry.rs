use glam::Vec2;

/// Axis-aligned rectangle in viewport CSS pixels (as from `getBoundingClientRect`).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// Ring placement in canvas-local CSS pixels, plus the canvas it lives on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingGeometry {
    /// Ring center.
    pub center: Vec2,
    /// Radius the spring pulls toward.
    pub radius: f32,
    /// Canvas size in CSS pixels.
    pub canvas_size: Vec2,
    /// Effective device pixel ratio after the configured cap.
    pub pixel_ratio: f32,
}

impl RingGeometry {
    /// Derive the ring from the canvas and tracked content rects.
    ///
    /// The center is the content's bounding-box center shifted into canvas space;
    /// the radius is half the content's larger side plus `margin`.
    pub fn recompute(canvas: Rect, content: Rect, margin: f32, pixel_ratio: f32) -> Self {
        let center = content.center() - Vec2::new(canvas.x, canvas.y);
        let radius = content.width.max(content.height).max(0.0) * 0.5 + margin;
        Self {
            center,
            radius,
            canvas_size: canvas.size().max(Vec2::ZERO),
            pixel_ratio,
        }
    }

    /// Canvas backing-store size in device pixels.
    pub fn backing_size(&self) -> (u32, u32) {
        let w = (self.canvas_size.x * self.pixel_ratio).floor().max(0.0);
        let h = (self.canvas_size.y * self.pixel_ratio).floor().max(0.0);
        (w as u32, h as u32)
    }

    /// True when the canvas has no visible area (e.g. laid out while hidden).
    pub fn is_degenerate(&self) -> bool {
        self.canvas_size.x < 1.0 || self.canvas_size.y < 1.0
    }

    /// Whether switching to `other` changes more than the ring position.
    /// Position-only changes (scroll) keep the field; size changes reseed it.
    pub fn differs_in_size(&self, other: &RingGeometry) -> bool {
        self.canvas_size != other.canvas_size
            || self.radius != other.radius
            || self.pixel_ratio != other.pixel_ratio
    }
}

/// Clamp the host's reported device pixel ratio into [1, cap].
/// Missing or nonsense ratios fall back to 1, as browsers without `devicePixelRatio` do.
pub fn effective_pixel_ratio(reported: Option<f32>, cap: f32) -> f32 {
    match reported {
        Some(r) if r.is_finite() && r > 0.0 => r.min(cap).max(1.0),
        _ => 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_is_canvas_local() {
        let canvas = Rect::new(0.0, 100.0, 1000.0, 800.0);
        let content = Rect::new(300.0, 300.0, 400.0, 200.0);
        let g = RingGeometry::recompute(canvas, content, 40.0, 1.0);
        assert_eq!(g.center, Vec2::new(500.0, 300.0));
    }

    #[test]
    fn radius_uses_larger_side_plus_margin() {
        let canvas = Rect::new(0.0, 0.0, 1000.0, 800.0);
        let content = Rect::new(0.0, 0.0, 300.0, 500.0);
        let g = RingGeometry::recompute(canvas, content, 40.0, 1.0);
        assert_eq!(g.radius, 290.0);
    }

    #[test]
    fn scrolled_content_moves_center_only() {
        let canvas = Rect::new(0.0, 0.0, 1000.0, 800.0);
        let before = RingGeometry::recompute(canvas, Rect::new(100.0, 200.0, 200.0, 200.0), 10.0, 1.0);
        let after = RingGeometry::recompute(canvas, Rect::new(100.0, 50.0, 200.0, 200.0), 10.0, 1.0);
        assert_eq!(after.center.y - before.center.y, -150.0);
        assert!(!before.differs_in_size(&after));
    }

    #[test]
    fn backing_store_follows_pixel_ratio() {
        let canvas = Rect::new(0.0, 0.0, 333.0, 200.0);
        let g = RingGeometry::recompute(canvas, Rect::default(), 0.0, 1.5);
        assert_eq!(g.backing_size(), (499, 300));
    }

    #[test]
    fn zero_sized_canvas_is_degenerate() {
        let g = RingGeometry::recompute(Rect::default(), Rect::default(), 10.0, 1.0);
        assert!(g.is_degenerate());
        assert_eq!(g.backing_size(), (0, 0));
    }

    #[test]
    fn pixel_ratio_is_capped() {
        assert_eq!(effective_pixel_ratio(Some(3.0), 2.0), 2.0);
        assert_eq!(effective_pixel_ratio(Some(1.25), 2.0), 1.25);
        assert_eq!(effective_pixel_ratio(Some(0.5), 2.0), 1.0);
        assert_eq!(effective_pixel_ratio(None, 2.0), 1.0);
        assert_eq!(effective_pixel_ratio(Some(f32::NAN), 2.0), 1.0);
    }
}
