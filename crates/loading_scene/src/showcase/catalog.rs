//! Showcase item catalog
//!
//! The catalog is a fixed table of models the loading screen cycles through.
//! Each entry may override the orientation and scale applied when its asset
//! finishes loading; entries without an override get the defaults below.

use crate::foundation::math::{Euler, Vec3};
use serde::{Deserialize, Serialize};

/// Orientation applied when an item does not override it
pub const DEFAULT_ITEM_ROTATION: Euler = Euler::zero();

/// Scale applied when an item does not override it
pub fn default_item_scale() -> Vec3 {
    Vec3::new(1.0, 1.0, 1.0)
}

/// A value that is either the scene default or an item-specific override
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Override<T> {
    /// Use the scene-wide default
    Default,
    /// Use this value instead
    Custom(T),
}

impl<T> Default for Override<T> {
    fn default() -> Self {
        Self::Default
    }
}

impl<T: Copy> Override<T> {
    /// The override if present, otherwise `default`
    pub fn resolve(&self, default: T) -> T {
        match *self {
            Self::Default => default,
            Self::Custom(value) => value,
        }
    }
}

/// Credit for a third-party model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribution {
    /// One-line credit shown under the model
    pub short: String,
    /// Full licence statement
    pub long: String,
    /// Link to the model's source page
    pub url: String,
}

/// Extra effect tied to an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemEffect {
    /// Just the model
    #[default]
    Plain,
    /// Show the noise-displaced overlay mesh in place of the model
    NoiseOverlay,
}

/// One entry in the showcase catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowcaseItem {
    /// Path of the model asset the host loads
    pub asset_path: String,
    /// Whether the item spins while displayed
    pub should_rotate: bool,
    /// Caption displayed alongside the item
    pub caption: String,
    /// Orientation applied once the asset has loaded
    #[serde(default)]
    pub rotation_on_load: Override<Euler>,
    /// Scale applied once the asset has loaded
    #[serde(default)]
    pub scale_on_load: Override<Vec3>,
    /// Credit for the model, if it is third-party
    #[serde(default)]
    pub attribution: Option<Attribution>,
    /// Effect shown with this item
    #[serde(default)]
    pub effect: ItemEffect,
}

impl ShowcaseItem {
    /// A plain rotating item with no overrides
    pub fn new(asset_path: impl Into<String>, caption: impl Into<String>) -> Self {
        Self {
            asset_path: asset_path.into(),
            should_rotate: true,
            caption: caption.into(),
            rotation_on_load: Override::Default,
            scale_on_load: Override::Default,
            attribution: None,
            effect: ItemEffect::Plain,
        }
    }

    /// Set the orientation override
    #[must_use]
    pub fn with_rotation(mut self, rotation: Euler) -> Self {
        self.rotation_on_load = Override::Custom(rotation);
        self
    }

    /// Set the scale override
    #[must_use]
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale_on_load = Override::Custom(scale);
        self
    }

    /// Attach a model credit
    #[must_use]
    pub fn with_attribution(mut self, short: &str, long: &str, url: &str) -> Self {
        self.attribution = Some(Attribution {
            short: short.to_string(),
            long: long.to_string(),
            url: url.to_string(),
        });
        self
    }

    /// Turn the item into the noise-overlay special item
    #[must_use]
    pub fn with_noise_overlay(mut self) -> Self {
        self.effect = ItemEffect::NoiseOverlay;
        self.should_rotate = false;
        self
    }

    /// Orientation to apply after loading
    pub fn load_rotation(&self) -> Euler {
        self.rotation_on_load.resolve(DEFAULT_ITEM_ROTATION)
    }

    /// Scale to apply after loading
    pub fn load_scale(&self) -> Vec3 {
        self.scale_on_load.resolve(default_item_scale())
    }

    /// Whether the noise overlay replaces this item on screen
    pub fn uses_noise_overlay(&self) -> bool {
        self.effect == ItemEffect::NoiseOverlay
    }
}

/// Built-in catalog, with asset paths under `asset_root`
#[allow(clippy::approx_constant)]
pub fn default_catalog(asset_root: &str) -> Vec<ShowcaseItem> {
    vec![
        ShowcaseItem::new(format!("{asset_root}dingus.glb"), "You got a cat").with_attribution(
            "dingus the cat by bean(alwayshasbean)",
            "\"dingus the cat\" by bean(alwayshasbean) is licensed under Creative Commons Attribution",
            "https://skfb.ly/oAtMJ",
        ),
        ShowcaseItem::new(
            format!("{asset_root}raspberry_pi_3.glb"),
            "3.1415926535897932384626433832795028841971693993751058209749445923078164062862089986280348253421170679",
        )
        .with_scale(Vec3::new(2.0, 2.0, 2.0))
        // Tilted towards the camera; 3.14 rather than PI matches the authored asset
        .with_rotation(Euler::new(10.0 * 3.14 / 180.0, 0.0, 0.0))
        .with_attribution(
            "Raspberry Pi 3 by JoSaCo",
            "\"Raspberry Pi 3\" by JoSaCo is licensed under Creative Commons Attribution",
            "https://skfb.ly/OBDI",
        ),
        ShowcaseItem::new(
            format!("{asset_root}shopping_cart.glb"),
            "Carts be a mighty useful tool for any traveler, but be warned, not all carts be in good condition. \
             Ye may come across some with a broken wheel or two, and that can make them quite difficult to maneuver.",
        )
        .with_scale(Vec3::new(2.0, 2.0, 2.0))
        .with_attribution(
            "Shopping cart model by Jiří Kuba",
            "\"Shopping cart model\" by Jiří Kuba is licensed under Creative Commons Attribution",
            "https://skfb.ly/6vw6D",
        ),
        ShowcaseItem::new(format!("{asset_root}noise_plinth.glb"), "Perlin noise, displaced every frame")
            .with_noise_overlay(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_overrides_resolve_to_defaults() {
        let item = ShowcaseItem::new("cat.glb", "cat");
        assert_eq!(item.load_rotation(), Euler::zero());
        assert_eq!(item.load_scale(), Vec3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_overrides_win() {
        let item = ShowcaseItem::new("pi.glb", "pi")
            .with_rotation(Euler::new(0.5, 0.0, 0.0))
            .with_scale(Vec3::new(2.0, 2.0, 2.0));
        assert_eq!(item.load_rotation(), Euler::new(0.5, 0.0, 0.0));
        assert_eq!(item.load_scale(), Vec3::new(2.0, 2.0, 2.0));
    }

    #[test]
    fn test_default_catalog_shape() {
        let catalog = default_catalog("assets/");
        assert_eq!(catalog.len(), 4);
        assert!(catalog.iter().all(|item| item.asset_path.starts_with("assets/")));
        assert_eq!(catalog.iter().filter(|item| item.uses_noise_overlay()).count(), 1);

        let noise = catalog.iter().find(|item| item.uses_noise_overlay()).unwrap();
        assert!(!noise.should_rotate);
        assert!(noise.attribution.is_none());

        // Only the cat keeps the default orientation and scale
        assert_eq!(catalog[0].load_scale(), default_item_scale());
        assert_eq!(catalog[2].load_rotation(), DEFAULT_ITEM_ROTATION);
        assert_eq!(catalog[2].load_scale(), Vec3::new(2.0, 2.0, 2.0));
    }
}
