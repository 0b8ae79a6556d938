use ringfield::{SpriteBuffer, Surface};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// Canvas 2D surface. Draws each star as a filled gray square.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    /// Gray channel currently set as fill style, to skip redundant style changes.
    fill: Option<u8>,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d) -> Self {
        Self {
            canvas,
            ctx,
            fill: None,
        }
    }
}

impl Surface for CanvasSurface {
    fn backend(&self) -> &'static str {
        "canvas2d"
    }

    fn resize(&mut self, css_width: f32, css_height: f32, pixel_ratio: f32) {
        let w = (css_width * pixel_ratio).floor().max(0.0) as u32;
        let h = (css_height * pixel_ratio).floor().max(0.0) as u32;
        // Setting width/height resets the whole context state, fill style included.
        self.canvas.set_width(w);
        self.canvas.set_height(h);
        self.fill = None;
        let r = pixel_ratio as f64;
        if let Err(e) = self.ctx.set_transform(r, 0.0, 0.0, r, 0.0, 0.0) {
            log::warn!("ringfield: setTransform failed: {:?}", e);
        }
    }

    fn clear(&mut self, css_width: f32, css_height: f32) {
        self.ctx
            .clear_rect(0.0, 0.0, css_width as f64, css_height as f64);
    }

    fn draw(&mut self, sprites: &SpriteBuffer) {
        for sprite in &sprites.sprites {
            let c = sprite.channel();
            if self.fill != Some(c) {
                self.ctx.set_fill_style_str(&format!("rgb({c},{c},{c})"));
                self.fill = Some(c);
            }
            self.ctx.set_global_alpha(sprite.alpha as f64);
            let (x, y) = sprite.origin();
            let s = sprite.size as f64;
            self.ctx.fill_rect(x as f64, y as f64, s, s);
        }
        self.ctx.set_global_alpha(1.0);
    }
}
