//! Host environment seam
//!
//! The scene never touches a renderer directly. Whatever embeds it (a
//! browser canvas, a native window, a headless driver) implements
//! [`SceneHost`] and forwards its frame, load and resize callbacks to
//! [`crate::LoadingScene`].

use crate::showcase::ShowcaseItem;
use thiserror::Error;

/// Opaque texture handle issued by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u64);

/// GPU capability tier reported by the host's probe
///
/// Tier 0 is the weakest. Only tiers above 1 can afford the fog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct GpuTier(pub u8);

impl GpuTier {
    /// Whether the fog field should be built at all
    pub fn enables_fog(self) -> bool {
        self.0 > 1
    }
}

/// Services the scene needs from its host
pub trait SceneHost {
    /// Resolve an asset path to a texture
    fn load_texture(&mut self, path: &str) -> Result<TextureHandle, HostError>;

    /// Start loading a catalog item
    ///
    /// The host calls [`crate::LoadingScene::on_loaded`] once the asset is
    /// ready. Loading may complete on a later frame.
    fn request_item(&mut self, index: usize, item: &ShowcaseItem) -> Result<(), HostError>;
}

/// Host-level errors
#[derive(Error, Debug)]
pub enum HostError {
    /// Texture could not be resolved
    #[error("Texture error: {0}")]
    Texture(String),

    /// Item asset could not be requested
    #[error("Asset error: {0}")]
    Asset(String),

    /// Anything else the host wants to report
    #[error("Host error: {0}")]
    Custom(String),
}
