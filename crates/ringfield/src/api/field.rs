use crate::api::config::FieldConfig;
use crate::api::error::FieldError;
use crate::api::host::Host;
use crate::core::geometry::{effective_pixel_ratio, RingGeometry};
use crate::core::particle::Particle;
use crate::core::rng::Rng;
use crate::core::store::{ParticleStore, SeedParams};
use crate::core::time::FrameClock;
use crate::renderer::instance::SpriteBuffer;
use crate::renderer::traits::Surface;
use crate::systems::cycle::{CycleClock, CycleState, CycleTiming};
use crate::systems::integrator::{ForceParams, Integrator};
use crate::systems::lifecycle::{Lifecycle, RunState, Transition};
use crate::systems::render::{build_sprites, RenderParams, Theme};

/// One independent starfield: simulation state, host providers and the surface it paints.
///
/// Single-threaded. The host calls `on_frame` from its frame callback and the
/// `on_*` handlers from its observers; each runs to completion.
pub struct Ringfield<S: Surface> {
    config: FieldConfig,
    host: Host,
    surface: S,
    store: ParticleStore,
    integrator: Integrator,
    sprites: SpriteBuffer,
    frame_clock: FrameClock,
    cycle_clock: CycleClock,
    lifecycle: Lifecycle,
    geometry: Option<RingGeometry>,
    rng: Rng,
    /// Last cycle state simulated, reused for static repaints while paused.
    last_cycle: Option<CycleState>,
    last_dt: Option<f32>,
    frame_pending: bool,
    frames: u64,
    started: bool,
}

impl<S: Surface> Ringfield<S> {
    /// Build a field. Fails only on invalid configuration.
    pub fn new(config: FieldConfig, host: Host, surface: S) -> Result<Self, FieldError> {
        config.validate()?;
        let lifecycle = Lifecycle::new(
            host.visibility.is_hidden(),
            host.visibility.prefers_reduced_motion(),
        );
        let rng = Rng::new(config.seed);
        Ok(Self {
            config,
            host,
            surface,
            store: ParticleStore::new(),
            integrator: Integrator::new(),
            sprites: SpriteBuffer::new(),
            frame_clock: FrameClock::new(),
            cycle_clock: CycleClock::new(),
            lifecycle,
            geometry: None,
            rng,
            last_cycle: None,
            last_dt: None,
            frame_pending: false,
            frames: 0,
            started: false,
        })
    }

    /// Measure, seed, and start the loop if allowed. Call once after construction.
    pub fn start(&mut self) {
        self.started = true;
        self.reseed();
        self.sync_lifecycle();
        if self.lifecycle.is_running() {
            self.frame_clock.reset(self.host.clock.now_ms());
            self.request_frame();
        }
        log::info!(
            "ringfield: started on {} with {} stars ({:?})",
            self.surface.backend(),
            self.store.len(),
            self.lifecycle.state()
        );
    }

    /// Stop the loop for good. Stars are kept but nothing runs until `start`.
    pub fn stop(&mut self) {
        self.cancel_frame();
        self.started = false;
    }

    /// Frame callback. `timestamp_ms` is the compositor timestamp if the host supplies one.
    pub fn on_frame(&mut self, timestamp_ms: Option<f64>) {
        self.frame_pending = false;
        if !self.started || !self.lifecycle.is_running() {
            return;
        }
        let now = timestamp_ms.or_else(|| self.host.clock.now_ms());
        let dt = self.frame_clock.advance(now);
        self.step(dt, now);
        self.frames += 1;
        self.request_frame();
    }

    /// Canvas resized: re-measure and reseed, whatever the run state.
    pub fn on_canvas_resize(&mut self) {
        if self.started {
            self.reseed();
        }
    }

    /// Tracked content resized: re-measure and reseed, whatever the run state.
    pub fn on_content_resize(&mut self) {
        if self.started {
            self.reseed();
        }
    }

    /// Page scrolled: the content may have moved while the canvas did not.
    /// Only the ring position is refreshed; the stars follow via the spring.
    /// A size change that slipped past the resize observers still reseeds.
    pub fn on_scroll(&mut self) {
        if !self.started {
            return;
        }
        let Some(fresh) = self.measure() else {
            return;
        };
        match self.geometry.as_mut() {
            Some(current) if !current.differs_in_size(&fresh) => current.center = fresh.center,
            _ => self.reseed(),
        }
    }

    /// Page visibility changed.
    pub fn on_visibility_change(&mut self) {
        self.sync_lifecycle();
    }

    /// Reduced-motion preference changed.
    pub fn on_motion_preference_change(&mut self) {
        self.sync_lifecycle();
    }

    /// Theme flipped. Running fields pick it up next frame; paused ones repaint now.
    pub fn on_theme_change(&mut self) {
        if self.started && !self.lifecycle.is_running() {
            self.paint();
        }
    }

    /// Swap in a new configuration and reseed.
    pub fn set_config(&mut self, config: FieldConfig) -> Result<(), FieldError> {
        config.validate()?;
        if config.seed != self.config.seed {
            self.rng = Rng::new(config.seed);
        }
        self.config = config;
        if self.started {
            self.reseed();
        }
        Ok(())
    }

    // -- accessors --

    pub fn particles(&self) -> &[Particle] {
        self.store.as_slice()
    }

    pub fn geometry(&self) -> Option<&RingGeometry> {
        self.geometry.as_ref()
    }

    pub fn state(&self) -> RunState {
        self.lifecycle.state()
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn sprites(&self) -> &SpriteBuffer {
        &self.sprites
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Step applied on the most recent simulated frame, in seconds.
    pub fn last_dt(&self) -> Option<f32> {
        self.last_dt
    }

    pub fn frame_pending(&self) -> bool {
        self.frame_pending
    }

    /// Number of frames simulated so far.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    // -- internals --

    fn timing(&self) -> CycleTiming {
        CycleTiming {
            period_ms: self.config.period_ms,
            ramp_ms: self.config.ramp_ms,
            drive_floor: self.config.drive_floor,
        }
    }

    fn render_params(&self) -> RenderParams {
        RenderParams {
            twinkle_amplitude: self.config.twinkle_amplitude,
            twinkle_frequency: self.config.twinkle_frequency,
        }
    }

    fn measure(&self) -> Option<RingGeometry> {
        let canvas = self.host.layout.canvas_rect()?;
        let content = self.host.layout.content_rect()?;
        let ratio = effective_pixel_ratio(
            self.host.layout.device_pixel_ratio(),
            self.config.max_device_pixel_ratio,
        );
        Some(RingGeometry::recompute(canvas, content, self.config.ring_margin, ratio))
    }

    fn reseed(&mut self) {
        let Some(geometry) = self.measure() else {
            log::debug!("ringfield: layout unavailable, field emptied");
            self.geometry = None;
            self.store.clear();
            return;
        };
        if geometry.is_degenerate() {
            log::debug!("ringfield: canvas has no visible area");
        }
        self.surface.resize(
            geometry.canvas_size.x,
            geometry.canvas_size.y,
            geometry.pixel_ratio,
        );
        let params = SeedParams {
            count: self
                .config
                .count_for_area(geometry.canvas_size.x, geometry.canvas_size.y),
            center: geometry.center,
            ring_radius: geometry.radius,
            ring_thickness: self.config.ring_thickness,
            tangential_speed: self.config.tangential_speed,
            speed_range: self.config.speed_range,
            base_size: self.config.base_size,
        };
        self.store.reseed(&params, &mut self.rng);
        self.geometry = Some(geometry);
        log::debug!(
            "ringfield: reseeded {} stars, ring r={:.1} at ({:.1}, {:.1})",
            self.store.len(),
            geometry.radius,
            geometry.center.x,
            geometry.center.y
        );
        if !self.lifecycle.is_running() {
            self.paint();
        }
    }

    fn sync_lifecycle(&mut self) {
        let hidden = self.host.visibility.is_hidden();
        let reduced = self.host.visibility.prefers_reduced_motion();
        match self.lifecycle.update(hidden, reduced) {
            Some(Transition::Resumed) => {
                log::debug!("ringfield: resumed");
                self.frame_clock.reset(self.host.clock.now_ms());
                if self.started {
                    self.request_frame();
                }
            }
            Some(Transition::Paused) => {
                log::debug!("ringfield: paused (hidden={}, reduced_motion={})", hidden, reduced);
                self.cancel_frame();
            }
            None => {}
        }
    }

    fn step(&mut self, dt: f32, now: Option<f64>) {
        let timing = self.timing();
        let cycle = self.cycle_clock.sample(now, &timing);
        self.last_cycle = Some(cycle);
        self.last_dt = Some(dt);

        let Some(geometry) = self.geometry else {
            return;
        };
        let params = ForceParams {
            center: geometry.center,
            ring_radius: geometry.radius,
            radial_spring: self.config.radial_spring,
            drag: self.config.drag,
            peer_radius: self.config.peer_radius,
            peer_force: self.config.peer_force,
            softening: self.config.softening,
        };
        self.integrator
            .step(self.store.as_mut_slice(), &params, &cycle, dt);
        self.paint();
    }

    fn paint(&mut self) {
        let Some(geometry) = self.geometry else {
            return;
        };
        let t_secs = self
            .last_cycle
            .map_or(0.0, |c| (c.elapsed_ms / 1000.0) as f32);
        let theme = Theme::from_dark_flag(self.host.theme.is_dark());
        let params = self.render_params();
        build_sprites(self.store.as_slice(), t_secs, theme, &params, &mut self.sprites);
        self.surface
            .clear(geometry.canvas_size.x, geometry.canvas_size.y);
        self.surface.draw(&self.sprites);
    }

    fn request_frame(&mut self) {
        if self.frame_pending {
            return;
        }
        if self.host.scheduler.request_frame() {
            self.frame_pending = true;
        } else {
            log::warn!("ringfield: host refused a frame request; animation stalled");
        }
    }

    fn cancel_frame(&mut self) {
        if self.frame_pending {
            self.host.scheduler.cancel_frame();
            self.frame_pending = false;
        }
    }
}
