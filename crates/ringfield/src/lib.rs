pub mod api;
pub mod core;
pub mod systems;
pub mod renderer;
pub mod extensions;

// Re-export key types at crate root for convenience
pub use api::config::{FieldConfig, MAX_PARTICLE_COUNT};
pub use api::error::FieldError;
pub use api::field::Ringfield;
pub use api::host::{Host, Clock, LayoutProbe, ThemeProbe, VisibilityProbe, FrameScheduler};
pub use core::geometry::{Rect, RingGeometry, effective_pixel_ratio};
pub use core::particle::{Particle, MIN_DEPTH, MAX_DEPTH};
pub use core::rng::Rng;
pub use core::store::{ParticleStore, SeedParams, seed};
pub use core::time::{FrameClock, MAX_FRAME_DT, NOMINAL_FRAME_DT};
pub use renderer::instance::{StarSprite, SpriteBuffer};
pub use renderer::traits::Surface;
pub use systems::cycle::{CycleState, CycleTiming, CycleClock, ramp_fraction};
pub use systems::integrator::{Integrator, ForceParams, pair_accel};
pub use systems::lifecycle::{Lifecycle, RunState, Transition};
pub use systems::render::{Theme, RenderParams, build_sprites, luminance};

pub use extensions::{lerp, smoothstep};
