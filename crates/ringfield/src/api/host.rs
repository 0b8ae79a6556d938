//! Host providers injected into a field.
//!
//! Everything the simulation reads from the outside world goes through one of
//! these traits. The WASM bridge implements them on top of the DOM; tests
//! implement them with fakes driven by synthetic timestamps.

use crate::core::geometry::Rect;

/// High-resolution monotonic time source.
pub trait Clock {
    /// Milliseconds on an arbitrary monotonic timeline, or `None` if unavailable.
    fn now_ms(&self) -> Option<f64>;
}

/// Live layout of the canvas and the element the ring surrounds.
pub trait LayoutProbe {
    /// Canvas bounding rect in viewport CSS pixels. `None` if the canvas is gone.
    fn canvas_rect(&self) -> Option<Rect>;

    /// Tracked content bounding rect in viewport CSS pixels. `None` if the element is gone.
    fn content_rect(&self) -> Option<Rect>;

    /// Device pixels per CSS pixel as reported by the host.
    fn device_pixel_ratio(&self) -> Option<f32>;
}

/// Read-only view of the page theme owned by an external controller.
pub trait ThemeProbe {
    fn is_dark(&self) -> bool;
}

/// Page visibility and motion preference.
pub trait VisibilityProbe {
    fn is_hidden(&self) -> bool;

    fn prefers_reduced_motion(&self) -> bool;
}

/// Per-frame callback scheduler (e.g. `requestAnimationFrame`).
///
/// The field guarantees at most one request is outstanding at a time.
pub trait FrameScheduler {
    /// Ask for one frame callback. Returns false if the host refused.
    fn request_frame(&mut self) -> bool;

    /// Cancel the outstanding request, if any.
    fn cancel_frame(&mut self);
}

/// Bundle of providers a field is built with.
pub struct Host {
    pub clock: Box<dyn Clock>,
    pub layout: Box<dyn LayoutProbe>,
    pub theme: Box<dyn ThemeProbe>,
    pub visibility: Box<dyn VisibilityProbe>,
    pub scheduler: Box<dyn FrameScheduler>,
}

impl Host {
    pub fn new(
        clock: impl Clock + 'static,
        layout: impl LayoutProbe + 'static,
        theme: impl ThemeProbe + 'static,
        visibility: impl VisibilityProbe + 'static,
        scheduler: impl FrameScheduler + 'static,
    ) -> Self {
        Self {
            clock: Box::new(clock),
            layout: Box::new(layout),
            theme: Box::new(theme),
            visibility: Box::new(visibility),
            scheduler: Box::new(scheduler),
        }
    }
}
