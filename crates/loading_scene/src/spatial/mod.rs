//! Spatial helpers for placing effects
//!
//! Provides the polygon footprint the fog spawns inside and the
//! rejection sampler that picks spawn points from it.

mod polygon;
mod spawn_sampler;

pub use polygon::{Bounds2, Polygon, PolygonError, MIN_POLYGON_VERTICES};
pub use spawn_sampler::{SpawnSampler, DEFAULT_MAX_ATTEMPTS};
