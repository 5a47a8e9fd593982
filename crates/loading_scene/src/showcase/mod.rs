//! Showcased item: catalog and transition state machine

pub mod catalog;
pub mod transition;

pub use catalog::{default_catalog, Attribution, ItemEffect, Override, ShowcaseItem};
pub use transition::{advance, on_item_loaded, Step, TransitionEvent, TransitionPhase, TransitionState};
