pub mod instance;
pub mod traits;

// Re-export key types for convenient access
pub use instance::{StarSprite, SpriteBuffer};
pub use traits::Surface;
