//! DOM-backed implementations of the core's host providers.

use std::cell::RefCell;
use std::rc::Rc;

use ringfield::{Clock, FrameScheduler, LayoutProbe, Rect, ThemeProbe, VisibilityProbe};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlCanvasElement, MediaQueryList, Performance, Window};

/// Media query for the reduced-motion preference.
pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

/// Attribute on `<html>` the page's theme controller writes.
pub const THEME_ATTRIBUTE: &str = "data-theme";

/// Attributes on `<html>` whose mutation means the theme may have flipped.
/// Class, style and aria churn on the root is ignored.
pub const OBSERVED_THEME_ATTRIBUTES: [&str; 1] = [THEME_ATTRIBUTE];

/// `attributeFilter` for the theme `MutationObserver`.
pub fn theme_attribute_filter() -> js_sys::Array {
    OBSERVED_THEME_ATTRIBUTES
        .iter()
        .map(|name| JsValue::from_str(name))
        .collect()
}

/// `performance.now()`, or nothing when the Performance API is missing.
pub struct PerformanceClock {
    performance: Option<Performance>,
}

impl PerformanceClock {
    pub fn new(window: &Window) -> Self {
        Self {
            performance: window.performance(),
        }
    }
}

impl Clock for PerformanceClock {
    fn now_ms(&self) -> Option<f64> {
        self.performance.as_ref().map(|p| p.now())
    }
}

/// Reads live bounding rects of the canvas and the tracked content element.
pub struct DomLayout {
    window: Window,
    canvas: HtmlCanvasElement,
    content: Element,
}

impl DomLayout {
    pub fn new(window: Window, canvas: HtmlCanvasElement, content: Element) -> Self {
        Self { window, canvas, content }
    }
}

fn rect_of(element: &Element) -> Option<Rect> {
    if !element.is_connected() {
        return None;
    }
    let r = element.get_bounding_client_rect();
    Some(Rect::new(r.x() as f32, r.y() as f32, r.width() as f32, r.height() as f32))
}

impl LayoutProbe for DomLayout {
    fn canvas_rect(&self) -> Option<Rect> {
        rect_of(&self.canvas)
    }

    fn content_rect(&self) -> Option<Rect> {
        rect_of(&self.content)
    }

    fn device_pixel_ratio(&self) -> Option<f32> {
        Some(self.window.device_pixel_ratio() as f32)
    }
}

/// Theme flag from `<html data-theme="dark">`.
pub struct DomTheme {
    root: Option<Element>,
}

impl DomTheme {
    pub fn new(document: &Document) -> Self {
        Self {
            root: document.document_element(),
        }
    }
}

impl ThemeProbe for DomTheme {
    fn is_dark(&self) -> bool {
        self.root
            .as_ref()
            .and_then(|root| root.get_attribute(THEME_ATTRIBUTE))
            .is_some_and(|theme| theme == "dark")
    }
}

/// `document.hidden` plus the reduced-motion media query.
pub struct DomVisibility {
    document: Document,
    reduced_motion: Option<MediaQueryList>,
}

impl DomVisibility {
    pub fn new(document: Document, reduced_motion: Option<MediaQueryList>) -> Self {
        Self {
            document,
            reduced_motion,
        }
    }
}

impl VisibilityProbe for DomVisibility {
    fn is_hidden(&self) -> bool {
        self.document.hidden()
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion.as_ref().is_some_and(|m| m.matches())
    }
}

/// Shared slot for the frame callback.
///
/// The callback needs the field and the field's scheduler needs the callback,
/// so the slot is created empty and filled once the field exists.
pub type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// `requestAnimationFrame` scheduler.
pub struct RafScheduler {
    window: Window,
    callback: FrameCallback,
    handle: Option<i32>,
}

impl RafScheduler {
    pub fn new(window: Window, callback: FrameCallback) -> Self {
        Self {
            window,
            callback,
            handle: None,
        }
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self) -> bool {
        let requested = {
            let slot = self.callback.borrow();
            match slot.as_ref() {
                Some(cb) => self
                    .window
                    .request_animation_frame(cb.as_ref().unchecked_ref()),
                None => return false,
            }
        };
        match requested {
            Ok(handle) => {
                self.handle = Some(handle);
                true
            }
            Err(e) => {
                log::warn!("ringfield: requestAnimationFrame failed: {:?}", e);
                false
            }
        }
    }

    fn cancel_frame(&mut self) {
        if let Some(handle) = self.handle.take() {
            if let Err(e) = self.window.cancel_animation_frame(handle) {
                log::warn!("ringfield: cancelAnimationFrame failed: {:?}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_observer_watches_only_the_theme_attribute() {
        assert_eq!(OBSERVED_THEME_ATTRIBUTES, ["data-theme"]);
        for unrelated in ["class", "style", "aria-busy", "lang"] {
            assert!(!OBSERVED_THEME_ATTRIBUTES.contains(&unrelated), "{} is observed", unrelated);
        }
    }
}
