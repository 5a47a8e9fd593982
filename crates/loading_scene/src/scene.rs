//! Loading scene: ties the effects, the showcase and the camera to a host

use crate::{
    core::config::{ConfigError, SceneConfig},
    effects::{FogSystem, NoiseOverlay},
    foundation::{
        math::{Euler, Mat4, Vec3},
        time::FrameClock,
    },
    host::{GpuTier, HostError, SceneHost},
    render::{Camera, Viewport},
    showcase::{self, ItemEffect, ShowcaseItem, TransitionEvent, TransitionState},
    spatial::{Polygon, PolygonError, SpawnSampler},
};
use rand::Rng;
use thiserror::Error;

/// Seconds of scene time between status lines in the log
const STATUS_LOG_INTERVAL: f32 = 5.0;

/// Placement of the showcased item for the current frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemTransform {
    /// World position
    pub position: Vec3,
    /// Orientation
    pub rotation: Euler,
    /// Scale (zero while the noise overlay stands in for the item)
    pub scale: Vec3,
}

impl ItemTransform {
    /// Model matrix: translation * rotation * scale
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * self.rotation.to_quat().to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }
}

/// The loading scene
///
/// Owns all animation state. The host drives it through four callbacks:
/// [`LoadingScene::on_before_render`] every frame, [`LoadingScene::on_loaded`]
/// when a requested item finishes loading, [`LoadingScene::on_resize`] when
/// the viewport changes, and [`LoadingScene::teardown`] when the page goes.
pub struct LoadingScene<H: SceneHost, R: Rng> {
    config: SceneConfig,
    host: H,
    rng: R,
    fog: Option<FogSystem>,
    sampler: SpawnSampler,
    transition: TransitionState,
    overlay: NoiseOverlay,
    camera: Camera,
    viewport: Viewport,
    clock: FrameClock,
    last_status: f32,
    torn_down: bool,
}

impl<H: SceneHost, R: Rng> LoadingScene<H, R> {
    /// Build the scene and request the first item from the host
    ///
    /// The fog is only spawned when `gpu_tier` can afford it.
    pub fn new(
        config: SceneConfig,
        gpu_tier: GpuTier,
        viewport: Viewport,
        mut host: H,
        mut rng: R,
    ) -> Result<Self, SceneError> {
        log::info!("Initializing loading scene...");
        config.validate().map_err(SceneError::InvalidConfig)?;

        let polygon = Polygon::new(config.fog.footprint.clone())?;
        let mut sampler = SpawnSampler::with_max_attempts(polygon, config.fog.max_spawn_attempts);

        let fog = if gpu_tier.enables_fog() {
            let texture = host.load_texture(&config.cloud_texture_path())?;
            Some(FogSystem::spawn(&config.fog, &mut sampler, texture, &mut rng))
        } else {
            log::info!("GPU tier {} is too low for fog, skipping it", gpu_tier.0);
            None
        };

        let transition = TransitionState::new(&config.showcase, config.items.len(), &mut rng);
        let camera = Camera::new(&config.camera, viewport);

        let index = transition.item_index;
        host.request_item(index, &config.items[index])?;
        log::info!("Requested initial item {index}: {}", config.items[index].asset_path);

        Ok(Self {
            config,
            host,
            rng,
            fog,
            sampler,
            transition,
            overlay: NoiseOverlay::default(),
            camera,
            viewport,
            clock: FrameClock::new(),
            last_status: 0.0,
            torn_down: false,
        })
    }

    /// The host finished loading the requested item
    pub fn on_loaded(&mut self) {
        if self.torn_down {
            return;
        }

        let item = &self.config.items[self.transition.item_index];
        log::info!("Loaded item {}: {}", self.transition.item_index, item.asset_path);
        self.transition = showcase::on_item_loaded(&self.transition, item, &self.config.showcase, &mut self.rng);
    }

    /// Per-frame callback using the scene's own clock
    pub fn on_before_render(&mut self) -> Result<Option<TransitionEvent>, SceneError> {
        let delta_time = self.clock.delta();
        self.advance(delta_time)
    }

    /// Advance every animation by `delta_time` seconds
    ///
    /// Fog first, then the showcase, then the overlay. An item request raised
    /// by the showcase is forwarded to the host before returning.
    pub fn advance(&mut self, delta_time: f32) -> Result<Option<TransitionEvent>, SceneError> {
        if self.torn_down {
            return Ok(None);
        }

        if let Some(fog) = self.fog.as_mut() {
            fog.update(delta_time);
        }

        let step = showcase::advance(
            &self.transition,
            &self.config.items,
            &self.config.showcase,
            delta_time,
            &mut self.rng,
        );
        self.transition = step.state;

        let effect = self.current_item().effect;
        self.overlay.update(effect, delta_time);

        match step.event {
            Some(TransitionEvent::ItemRequested { index }) => {
                let item = &self.config.items[index];
                log::info!("Requesting item {index}: {}", item.asset_path);
                self.host.request_item(index, item)?;
            }
            Some(TransitionEvent::Arrived { anchor, dwell }) => {
                log::info!("Showcase reached anchor {anchor}, next item in {:.1}s", dwell.as_secs_f32());
            }
            None => {}
        }

        if self.transition.elapsed > self.last_status + STATUS_LOG_INTERVAL {
            let fog_opacity = self.fog.as_ref().map_or(0.0, FogSystem::average_opacity);
            log::debug!(
                "Showcase position {:?}, phase {:?}, mean fog opacity {fog_opacity:.2}",
                self.transition.position,
                self.transition.phase
            );
            self.last_status = self.transition.elapsed;
        }

        Ok(step.event)
    }

    /// The viewport changed size
    pub fn on_resize(&mut self, width: u32, height: u32) {
        self.viewport = Viewport::new(width, height);
        self.camera.apply_viewport(&self.config.camera, self.viewport);
    }

    /// Stop animating and drop any pending countdown
    pub fn teardown(&mut self) {
        self.transition.clear_countdown();
        self.torn_down = true;
        log::info!("Loading scene torn down");
    }

    /// Whether [`LoadingScene::teardown`] has run
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Catalog entry on display (or being loaded)
    pub fn current_item(&self) -> &ShowcaseItem {
        &self.config.items[self.transition.item_index]
    }

    /// Where to draw the showcased item this frame
    pub fn item_transform(&self) -> ItemTransform {
        let scale = match self.current_item().effect {
            ItemEffect::NoiseOverlay => Vec3::zeros(),
            ItemEffect::Plain => self.transition.scale,
        };
        ItemTransform {
            position: self.transition.position,
            rotation: self.transition.rotation,
            scale,
        }
    }

    /// Showcase animation state
    pub fn transition(&self) -> &TransitionState {
        &self.transition
    }

    #[cfg(test)]
    pub(crate) fn transition_mut(&mut self) -> &mut TransitionState {
        &mut self.transition
    }

    /// Fog field, absent on weak GPUs
    pub fn fog(&self) -> Option<&FogSystem> {
        self.fog.as_ref()
    }

    /// Footprint vertices on the fog plane, for previewing spawn placement
    pub fn spawn_preview(&self) -> Vec<Vec3> {
        self.sampler.polygon().preview_points(self.config.fog.depth)
    }

    /// Noise overlay state
    pub fn overlay(&self) -> &NoiseOverlay {
        &self.overlay
    }

    /// Camera framed for the current viewport
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Current viewport
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Scene configuration
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// The host
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The host, mutably
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

/// Scene errors
#[derive(Error, Debug)]
pub enum SceneError {
    /// Configuration failed validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration could not be loaded
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Fog footprint is unusable
    #[error("Footprint error: {0}")]
    Footprint(#[from] PolygonError),

    /// The host refused a request
    #[error("Host error: {0}")]
    Host(#[from] HostError),
}
