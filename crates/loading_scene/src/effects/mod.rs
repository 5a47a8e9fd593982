//! Visual effects driven each frame
//!
//! - Fog: rising, fading smoke quads spawned inside a footprint
//! - Noise overlay: the displaced mesh shown for the noise showcase item

pub mod fog;
pub mod fog_system;
pub mod noise_overlay;

pub use fog::{band_opacity, FogInstanceData, FogParticle};
pub use fog_system::FogSystem;
pub use noise_overlay::NoiseOverlay;
