// extensions/mod.rs
//
// Small math helpers shared by the systems.
// Decoupled from particle state so they can be tested in isolation.

pub mod easing;

pub use easing::{lerp, smoothstep};
