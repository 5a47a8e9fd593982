//! Core scene configuration
//!
//! Houses the unified configuration tree. The file format plumbing lives in
//! [`crate::config`].

pub mod config;

pub use config::{CameraConfig, DwellRange, FogConfig, SceneConfig, ShowcaseConfig};
