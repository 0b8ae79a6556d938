//! Browser bridge for the ringfield starfield.
//!
//! JS calls `ringfield_start("starfield", "main")` once the page is parsed.
//! Everything after that (frames, resizes, scroll, visibility, theme) is
//! driven from observers wired up in [`runner::FieldRunner::mount`].

mod host;
mod runner;
mod surface;

use std::cell::RefCell;

use ringfield::FieldConfig;
use wasm_bindgen::prelude::*;

pub use runner::FieldRunner;
pub use surface::CanvasSurface;

thread_local! {
    static RUNNER: RefCell<Option<FieldRunner>> = RefCell::new(None);
}

/// Run `f` against the mounted runner, if any.
fn with_runner<R>(f: impl FnOnce(&mut FieldRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| cell.borrow_mut().as_mut().map(f))
}

fn parse_config(json: Option<String>) -> FieldConfig {
    let Some(json) = json else {
        return FieldConfig::default();
    };
    match FieldConfig::from_json(&json) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("ringfield: bad config ({}), using defaults", e);
            FieldConfig::default()
        }
    }
}

/// Mount the starfield on `<canvas id=canvas_id>` around the first element
/// matching `content_selector`. Returns whether a field is now running.
///
/// Missing elements, a missing 2D context or any DOM failure leave the effect
/// off; nothing is thrown back to the page.
#[wasm_bindgen]
pub fn ringfield_start(canvas_id: &str, content_selector: &str, config_json: Option<String>) -> bool {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let config = parse_config(config_json);
    ringfield_stop();

    let Some(window) = web_sys::window() else {
        return false;
    };
    match FieldRunner::mount(window, canvas_id, content_selector, config) {
        Ok(Some(runner)) => {
            RUNNER.with(|cell| *cell.borrow_mut() = Some(runner));
            true
        }
        Ok(None) => false,
        Err(e) => {
            log::warn!("ringfield: mount failed: {:?}", e);
            false
        }
    }
}

/// Stop and unmount the current field, if one is running.
#[wasm_bindgen]
pub fn ringfield_stop() {
    let runner = RUNNER.with(|cell| cell.borrow_mut().take());
    if let Some(mut runner) = runner {
        runner.stop();
    }
}

/// Replace the running field's configuration. The field reseeds immediately.
#[wasm_bindgen]
pub fn ringfield_configure(config_json: &str) -> bool {
    let config = match FieldConfig::from_json(config_json) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("ringfield: bad config ({})", e);
            return false;
        }
    };
    let applied = with_runner(|r| r.with_field(|field| field.set_config(config)));
    match applied {
        Some(Some(Ok(()))) => true,
        Some(Some(Err(e))) => {
            log::warn!("ringfield: config rejected ({})", e);
            false
        }
        _ => false,
    }
}

/// Pointer to the last frame's sprite data (8 floats per star), for custom renderers.
#[wasm_bindgen]
pub fn ringfield_sprites_ptr() -> *const f32 {
    with_runner(|r| r.with_field(|field| field.sprites().sprites_ptr()))
        .flatten()
        .unwrap_or(std::ptr::null())
}

/// Copy of the last frame's sprite data. Safe across memory growth, unlike the pointer.
#[wasm_bindgen]
pub fn ringfield_sprites() -> js_sys::Float32Array {
    with_runner(|r| r.with_field(|field| js_sys::Float32Array::from(field.sprites().as_floats())))
        .flatten()
        .unwrap_or_else(|| js_sys::Float32Array::new_with_length(0))
}

#[wasm_bindgen]
pub fn ringfield_sprite_count() -> u32 {
    with_runner(|r| r.with_field(|field| field.sprites().sprite_count()))
        .flatten()
        .unwrap_or(0)
}

#[wasm_bindgen]
pub fn ringfield_particle_count() -> u32 {
    with_runner(|r| r.with_field(|field| field.particles().len() as u32))
        .flatten()
        .unwrap_or(0)
}
