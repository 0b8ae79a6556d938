use std::cell::RefCell;
use std::rc::{Rc, Weak};

use ringfield::{FieldConfig, Host, Ringfield};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    AddEventListenerOptions, CanvasRenderingContext2d, Element, EventTarget, HtmlCanvasElement,
    MutationObserver, MutationObserverInit, ResizeObserver, Window,
};

use crate::host::{
    theme_attribute_filter, DomLayout, DomTheme, DomVisibility, FrameCallback, PerformanceClock,
    RafScheduler, REDUCED_MOTION_QUERY,
};
use crate::surface::CanvasSurface;

pub type Field = Ringfield<CanvasSurface>;

/// A DOM event listener we attached and must detach on stop.
struct Listener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut()>,
}

/// Wires one field to the page: frame loop, observers and listeners.
///
/// wasm-bindgen cannot export generic structs, so `lib.rs` keeps a single
/// runner in a `thread_local!` and exposes free functions around it.
pub struct FieldRunner {
    field: Rc<RefCell<Field>>,
    frame_callback: FrameCallback,
    listeners: Vec<Listener>,
    resize_observers: Vec<(ResizeObserver, Closure<dyn FnMut()>)>,
    theme_observer: Option<(MutationObserver, Closure<dyn FnMut()>)>,
}

/// Build a callback that forwards to one field handler.
/// Skips (with a warning) if the field is already borrowed; never panics.
fn forward(field: &Rc<RefCell<Field>>, what: &'static str, handler: fn(&mut Field)) -> Closure<dyn FnMut()> {
    let weak: Weak<RefCell<Field>> = Rc::downgrade(field);
    Closure::wrap(Box::new(move || {
        let Some(field) = weak.upgrade() else {
            return;
        };
        match field.try_borrow_mut() {
            Ok(mut field) => handler(&mut *field),
            Err(_) => log::warn!("ringfield: {} skipped, field busy", what),
        };
    }) as Box<dyn FnMut()>)
}

impl FieldRunner {
    /// Mount a field on `canvas_id`, ringing the element matched by `content_selector`.
    ///
    /// Returns `Ok(None)` when either element (or a 2D context) is missing: the
    /// effect simply stays off.
    pub fn mount(
        window: Window,
        canvas_id: &str,
        content_selector: &str,
        config: FieldConfig,
    ) -> Result<Option<Self>, JsValue> {
        let Some(document) = window.document() else {
            return Ok(None);
        };
        let Some(canvas) = document
            .get_element_by_id(canvas_id)
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::info!("ringfield: no canvas #{}, disabled", canvas_id);
            return Ok(None);
        };
        let Some(content) = document.query_selector(content_selector)? else {
            log::info!("ringfield: nothing matches {:?}, disabled", content_selector);
            return Ok(None);
        };
        let Some(ctx) = canvas
            .get_context("2d")?
            .and_then(|obj| obj.dyn_into::<CanvasRenderingContext2d>().ok())
        else {
            log::info!("ringfield: 2d context unavailable, disabled");
            return Ok(None);
        };

        let reduced_motion = window.match_media(REDUCED_MOTION_QUERY)?;
        let frame_callback: FrameCallback = Rc::new(RefCell::new(None));

        let host = Host::new(
            PerformanceClock::new(&window),
            DomLayout::new(window.clone(), canvas.clone(), content.clone()),
            DomTheme::new(&document),
            DomVisibility::new(document.clone(), reduced_motion.clone()),
            RafScheduler::new(window.clone(), frame_callback.clone()),
        );
        let surface = CanvasSurface::new(canvas.clone(), ctx);
        let field = Ringfield::new(config, host, surface)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let field = Rc::new(RefCell::new(field));

        // Frame loop: rAF → on_frame, which requests the next frame itself.
        {
            let weak = Rc::downgrade(&field);
            *frame_callback.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
                let Some(field) = weak.upgrade() else {
                    return;
                };
                match field.try_borrow_mut() {
                    Ok(mut field) => field.on_frame(Some(ts)),
                    Err(_) => log::warn!("ringfield: frame skipped, field busy"),
                };
            }) as Box<dyn FnMut(f64)>));
        }

        let mut runner = Self {
            field,
            frame_callback,
            listeners: Vec::new(),
            resize_observers: Vec::new(),
            theme_observer: None,
        };

        // Canvas and content can resize independently, so each gets its own observer.
        runner.observe_resize(&canvas, "canvas resize", Field::on_canvas_resize)?;
        runner.observe_resize(&content, "content resize", Field::on_content_resize)?;

        let scroll_opts = AddEventListenerOptions::new();
        scroll_opts.set_passive(true);
        runner.listen(window.clone().into(), "scroll", Some(&scroll_opts), Field::on_scroll)?;
        runner.listen(document.clone().into(), "visibilitychange", None, Field::on_visibility_change)?;
        if let Some(mql) = reduced_motion {
            runner.listen(mql.into(), "change", None, Field::on_motion_preference_change)?;
        }
        if let Some(root) = document.document_element() {
            runner.observe_theme(&root)?;
        }

        runner.field.borrow_mut().start();
        Ok(Some(runner))
    }

    fn observe_resize(
        &mut self,
        element: &Element,
        what: &'static str,
        handler: fn(&mut Field),
    ) -> Result<(), JsValue> {
        let closure = forward(&self.field, what, handler);
        let observer = ResizeObserver::new(closure.as_ref().unchecked_ref())?;
        observer.observe(element);
        self.resize_observers.push((observer, closure));
        Ok(())
    }

    fn observe_theme(&mut self, root: &Element) -> Result<(), JsValue> {
        let closure = forward(&self.field, "theme change", Field::on_theme_change);
        let observer = MutationObserver::new(closure.as_ref().unchecked_ref())?;
        let init = MutationObserverInit::new();
        init.set_attributes(true);
        init.set_attribute_filter(&theme_attribute_filter());
        observer.observe_with_options(root, &init)?;
        self.theme_observer = Some((observer, closure));
        Ok(())
    }

    fn listen(
        &mut self,
        target: EventTarget,
        event: &'static str,
        options: Option<&AddEventListenerOptions>,
        handler: fn(&mut Field),
    ) -> Result<(), JsValue> {
        let closure = forward(&self.field, event, handler);
        match options {
            Some(opts) => target.add_event_listener_with_callback_and_add_event_listener_options(
                event,
                closure.as_ref().unchecked_ref(),
                opts,
            )?,
            None => target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?,
        }
        self.listeners.push(Listener { target, event, closure });
        Ok(())
    }

    /// Borrow the field. `None` if it is mid-frame.
    pub fn with_field<R>(&self, f: impl FnOnce(&mut Field) -> R) -> Option<R> {
        self.field.try_borrow_mut().ok().map(|mut field| f(&mut *field))
    }

    /// Stop the loop and detach every observer and listener.
    pub fn stop(&mut self) {
        if let Ok(mut field) = self.field.try_borrow_mut() {
            field.stop();
        }
        self.detach();
        log::info!("ringfield: stopped");
    }

    /// Disconnect observers, remove listeners and drop the frame callback. Idempotent.
    fn detach(&mut self) {
        for (observer, _) in self.resize_observers.drain(..) {
            observer.disconnect();
        }
        if let Some((observer, _)) = self.theme_observer.take() {
            observer.disconnect();
        }
        for listener in self.listeners.drain(..) {
            let _ = listener.target.remove_event_listener_with_callback(
                listener.event,
                listener.closure.as_ref().unchecked_ref(),
            );
        }
        self.frame_callback.borrow_mut().take();
    }
}

impl Drop for FieldRunner {
    fn drop(&mut self) {
        if let Ok(mut field) = self.field.try_borrow_mut() {
            field.stop();
        }
        self.detach();
    }
}
