pub mod cycle;
pub mod integrator;
pub mod lifecycle;
pub mod render;
