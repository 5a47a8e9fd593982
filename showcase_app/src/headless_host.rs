//! Host that pretends to load assets
//!
//! Texture handles are handed out immediately. Item loads complete after a
//! fixed latency so the scene sees the same request/loaded split a real
//! asset pipeline gives it.

use loading_scene::prelude::*;
use std::collections::HashMap;

/// A load that has been requested but not yet delivered
#[derive(Debug, Clone)]
struct PendingLoad {
    index: usize,
    asset_path: String,
    remaining: f32,
}

/// [`SceneHost`] without a renderer or asset pipeline
///
/// Holds at most one pending item load. A newer request replaces it.
pub struct HeadlessHost {
    load_latency: f32,
    textures: HashMap<String, TextureHandle>,
    pending: Option<PendingLoad>,
    loads_completed: usize,
}

impl HeadlessHost {
    /// Host whose item loads finish `load_latency` seconds after the request
    pub fn new(load_latency: f32) -> Self {
        Self {
            load_latency,
            textures: HashMap::new(),
            pending: None,
            loads_completed: 0,
        }
    }

    /// Count down the pending load; true once it has finished this frame
    pub fn tick(&mut self, delta_time: f32) -> bool {
        let Some(pending) = self.pending.as_mut() else {
            return false;
        };

        pending.remaining -= delta_time;
        if pending.remaining > 0.0 {
            return false;
        }

        log::debug!("Finished loading item {} ({})", pending.index, pending.asset_path);
        self.pending = None;
        self.loads_completed += 1;
        true
    }

    /// Item loads delivered so far
    pub fn loads_completed(&self) -> usize {
        self.loads_completed
    }

    /// Distinct texture paths handed out
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }
}

impl SceneHost for HeadlessHost {
    fn load_texture(&mut self, path: &str) -> Result<TextureHandle, HostError> {
        if path.is_empty() {
            return Err(HostError::Texture("empty texture path".to_string()));
        }
        let next = TextureHandle(self.textures.len() as u64 + 1);
        let handle = *self.textures.entry(path.to_string()).or_insert(next);
        log::debug!("Texture {path} -> {handle:?}");
        Ok(handle)
    }

    fn request_item(&mut self, index: usize, item: &ShowcaseItem) -> Result<(), HostError> {
        if let Some(previous) = &self.pending {
            log::warn!("Item {} superseded before it finished loading", previous.index);
        }
        self.pending = Some(PendingLoad {
            index,
            asset_path: item.asset_path.clone(),
            remaining: self.load_latency,
        });
        Ok(())
    }
}
