//! Item transition state machine
//!
//! The showcased item glides from one anchor to another, rests there for a
//! random dwell, then asks the host for a different catalog item. Once the
//! host reports the new asset as loaded the cycle starts over from the anchor
//! the item just reached.
//!
//! ```text
//!   AwaitingLoad --on_item_loaded--> Moving --arrive--> IdleAtTarget
//!        ^                                                   |
//!        +------------------ countdown expires --------------+
//! ```
//!
//! All transitions are plain functions of the previous state, so a frame can
//! be replayed deterministically from a seeded generator.

use crate::core::config::ShowcaseConfig;
use crate::foundation::math::{Euler, Vec3};
use crate::foundation::random::pick_index_excluding;
use crate::showcase::catalog::{default_item_scale, ShowcaseItem, DEFAULT_ITEM_ROTATION};
use rand::Rng;
use std::time::Duration;

/// Where the item is in its cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionPhase {
    /// Waiting for the host to finish loading the requested item
    AwaitingLoad,
    /// Travelling towards the target anchor
    Moving,
    /// Resting at the target until the countdown expires
    IdleAtTarget {
        /// Time left before the next item is requested
        remaining: Duration,
    },
}

/// Something the host should react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionEvent {
    /// The item reached its target anchor and started resting
    Arrived {
        /// Anchor index reached
        anchor: usize,
        /// How long it will rest there
        dwell: Duration,
    },
    /// The host should start loading this catalog item
    ItemRequested {
        /// Catalog index to load
        index: usize,
    },
}

/// Complete animation state of the showcased item
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionState {
    /// Catalog index of the item on display (or being loaded)
    pub item_index: usize,
    /// Current world position
    pub position: Vec3,
    /// Anchor the current leg started from
    pub origin: usize,
    /// Anchor the current leg ends at; `None` before the first load
    pub target: Option<usize>,
    /// Current orientation
    pub rotation: Euler,
    /// Current scale
    pub scale: Vec3,
    /// Cycle phase
    pub phase: TransitionPhase,
    /// Seconds of animation time advanced so far
    pub elapsed: f32,
}

/// Result of advancing one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    /// State after the frame
    pub state: TransitionState,
    /// Event raised during the frame, if any
    pub event: Option<TransitionEvent>,
}

fn anchor_position(config: &ShowcaseConfig, index: usize) -> Vec3 {
    config.anchors.get(index).copied().unwrap_or_else(Vec3::zeros)
}

impl TransitionState {
    /// Start at a random anchor with a random item selected for loading
    pub fn new<R: Rng + ?Sized>(config: &ShowcaseConfig, catalog_len: usize, rng: &mut R) -> Self {
        let origin = pick_index_excluding(rng, config.anchors.len(), None).unwrap_or(0);
        let item_index = pick_index_excluding(rng, catalog_len, None).unwrap_or(0);

        Self {
            item_index,
            position: anchor_position(config, origin),
            origin,
            target: None,
            rotation: DEFAULT_ITEM_ROTATION,
            scale: default_item_scale(),
            phase: TransitionPhase::AwaitingLoad,
            elapsed: 0.0,
        }
    }

    /// Whether the item is travelling
    pub fn is_moving(&self) -> bool {
        self.phase == TransitionPhase::Moving
    }

    /// World position of the origin anchor
    pub fn origin_position(&self, config: &ShowcaseConfig) -> Vec3 {
        anchor_position(config, self.origin)
    }

    /// World position of the target anchor, if one has been chosen
    pub fn target_position(&self, config: &ShowcaseConfig) -> Option<Vec3> {
        self.target.map(|index| anchor_position(config, index))
    }

    /// Time left on the dwell countdown, if resting
    pub fn remaining_dwell(&self) -> Option<Duration> {
        match self.phase {
            TransitionPhase::IdleAtTarget { remaining } => Some(remaining),
            _ => None,
        }
    }

    /// Drop any pending dwell countdown
    pub fn clear_countdown(&mut self) {
        if let TransitionPhase::IdleAtTarget { .. } = self.phase {
            self.phase = TransitionPhase::AwaitingLoad;
        }
    }
}

/// Apply a freshly loaded item and pick the next leg
///
/// The previous target becomes the new origin and the new target is any
/// other anchor. A pending countdown is discarded.
pub fn on_item_loaded<R: Rng + ?Sized>(
    state: &TransitionState,
    item: &ShowcaseItem,
    config: &ShowcaseConfig,
    rng: &mut R,
) -> TransitionState {
    let mut next = state.clone();
    next.rotation = item.load_rotation();
    next.scale = item.load_scale();

    if let Some(previous_target) = state.target {
        next.origin = previous_target;
    }

    match pick_index_excluding(rng, config.anchors.len(), Some(next.origin)) {
        Some(target) => {
            log::debug!("Item {} loaded, heading from anchor {} to {}", next.item_index, next.origin, target);
            next.target = Some(target);
            next.phase = TransitionPhase::Moving;
        }
        None => {
            log::warn!("No anchor other than {} to travel to, staying put", next.origin);
            next.target = None;
            next.phase = TransitionPhase::AwaitingLoad;
        }
    }

    next
}

/// Advance the item by `dt` seconds
///
/// Spin is applied in every phase when the current item rotates. Travel
/// moves at constant speed and snaps onto the target once within the
/// arrival distance, or when the step would reach or pass it.
pub fn advance<R: Rng + ?Sized>(
    state: &TransitionState,
    catalog: &[ShowcaseItem],
    config: &ShowcaseConfig,
    dt: f32,
    rng: &mut R,
) -> Step {
    let mut next = state.clone();
    let mut event = None;
    next.elapsed += dt;

    let rotates = catalog.get(state.item_index).map_or(true, |item| item.should_rotate);
    if rotates {
        next.rotation = next.rotation.with_added_y(config.rotate_rate * dt);
    }

    match state.phase {
        TransitionPhase::Moving => {
            if let Some(target_index) = state.target {
                let target = anchor_position(config, target_index);
                let to_target = target - state.position;
                let distance = to_target.norm();
                let step_length = config.move_speed * dt;
                let direction = to_target.try_normalize(f32::EPSILON).unwrap_or_else(Vec3::zeros);
                let stepped = state.position + direction * step_length;

                if step_length >= distance || (target - stepped).norm() < config.arrival_epsilon {
                    let dwell = config.dwell.draw(rng);
                    log::debug!("Arrived at anchor {target_index}, resting for {dwell:?}");
                    next.position = target;
                    next.phase = TransitionPhase::IdleAtTarget { remaining: dwell };
                    event = Some(TransitionEvent::Arrived { anchor: target_index, dwell });
                } else {
                    next.position = stepped;
                }
            }
        }
        TransitionPhase::IdleAtTarget { remaining } => {
            let elapsed = Duration::try_from_secs_f32(dt.max(0.0)).unwrap_or(Duration::MAX);
            let remaining = remaining.saturating_sub(elapsed);

            if remaining.is_zero() {
                match pick_index_excluding(rng, catalog.len(), Some(state.item_index)) {
                    Some(index) => {
                        log::debug!("Dwell over, requesting item {index}");
                        next.item_index = index;
                        next.phase = TransitionPhase::AwaitingLoad;
                        event = Some(TransitionEvent::ItemRequested { index });
                    }
                    None => next.phase = TransitionPhase::AwaitingLoad,
                }
            } else {
                next.phase = TransitionPhase::IdleAtTarget { remaining };
            }
        }
        TransitionPhase::AwaitingLoad => {}
    }

    Step { state: next, event }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::showcase::catalog::default_catalog;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn setup(seed: u64) -> (ShowcaseConfig, Vec<ShowcaseItem>, StdRng) {
        (ShowcaseConfig::default(), default_catalog("assets/"), StdRng::seed_from_u64(seed))
    }

    /// Index of a rotating, override-free item (the cat)
    const PLAIN_ITEM: usize = 0;

    #[test]
    fn test_new_state_waits_at_an_anchor() {
        let (config, catalog, mut rng) = setup(1);
        let state = TransitionState::new(&config, catalog.len(), &mut rng);
        assert_eq!(state.phase, TransitionPhase::AwaitingLoad);
        assert_eq!(state.position, state.origin_position(&config));
        assert!(state.target.is_none());
        assert!(state.item_index < catalog.len());
    }

    #[test]
    fn test_target_never_equals_origin() {
        let (config, catalog, mut rng) = setup(2);
        let mut state = TransitionState::new(&config, catalog.len(), &mut rng);
        for _ in 0..1000 {
            state = on_item_loaded(&state, &catalog[PLAIN_ITEM], &config, &mut rng);
            assert_ne!(state.target, Some(state.origin));
            assert!(state.is_moving());
        }
    }

    #[test]
    fn test_previous_target_becomes_origin() {
        let (config, catalog, mut rng) = setup(3);
        let state = TransitionState::new(&config, catalog.len(), &mut rng);
        let first = on_item_loaded(&state, &catalog[PLAIN_ITEM], &config, &mut rng);
        let second = on_item_loaded(&first, &catalog[PLAIN_ITEM], &config, &mut rng);
        assert_eq!(Some(second.origin), first.target);
    }

    #[test]
    fn test_load_defaults_are_idempotent() {
        let (config, catalog, mut rng) = setup(4);
        let mut state = TransitionState::new(&config, catalog.len(), &mut rng);
        // Dirty the orientation and scale first
        state = on_item_loaded(&state, &catalog[1], &config, &mut rng);
        state.rotation = Euler::new(1.0, 2.0, 3.0);
        for _ in 0..3 {
            state = on_item_loaded(&state, &catalog[PLAIN_ITEM], &config, &mut rng);
            assert_eq!(state.rotation, Euler::zero());
            assert_eq!(state.scale, Vec3::new(1.0, 1.0, 1.0));
        }
    }

    #[test]
    fn test_moves_at_constant_speed_towards_target() {
        let (config, catalog, mut rng) = setup(5);
        let mut state = TransitionState::new(&config, catalog.len(), &mut rng);
        state.item_index = PLAIN_ITEM;
        state = on_item_loaded(&state, &catalog[PLAIN_ITEM], &config, &mut rng);
        let target = state.target_position(&config).unwrap();
        let before = (target - state.position).norm();

        let step = advance(&state, &catalog, &config, 1.0, &mut rng);
        let after = (target - step.state.position).norm();
        assert_relative_eq!(before - after, config.move_speed, epsilon = 1e-4);
        assert!(step.event.is_none());
    }

    #[test]
    fn test_overshoot_snaps_exactly_onto_target() {
        let (config, catalog, mut rng) = setup(6);
        let mut state = TransitionState::new(&config, catalog.len(), &mut rng);
        state = on_item_loaded(&state, &catalog[PLAIN_ITEM], &config, &mut rng);
        let target = state.target_position(&config).unwrap();
        state.position = target + Vec3::new(1.0, 0.0, 0.0);

        // 0.66 * 5.0 = 3.3 units, far past a 1 unit gap
        let step = advance(&state, &catalog, &config, 5.0, &mut rng);
        assert_eq!(step.state.position, target);
        assert!(matches!(step.state.phase, TransitionPhase::IdleAtTarget { .. }));
        assert!(matches!(step.event, Some(TransitionEvent::Arrived { .. })));
    }

    #[test]
    fn test_within_epsilon_snaps() {
        let (config, catalog, mut rng) = setup(7);
        let mut state = TransitionState::new(&config, catalog.len(), &mut rng);
        state = on_item_loaded(&state, &catalog[PLAIN_ITEM], &config, &mut rng);
        let target = state.target_position(&config).unwrap();
        state.position = target + Vec3::new(0.0, 0.15, 0.0);

        // Step of 0.066 leaves 0.084, inside the 0.1 arrival distance
        let step = advance(&state, &catalog, &config, 0.1, &mut rng);
        assert_eq!(step.state.position, target);
        let dwell = step.state.remaining_dwell().unwrap();
        assert!(dwell >= Duration::from_millis(5000) && dwell <= Duration::from_millis(15000));
    }

    #[test]
    fn test_countdown_requests_a_different_item() {
        let (config, catalog, mut rng) = setup(8);
        let mut state = TransitionState::new(&config, catalog.len(), &mut rng);
        state.item_index = 2;
        state.phase = TransitionPhase::IdleAtTarget { remaining: Duration::from_millis(500) };

        let step = advance(&state, &catalog, &config, 0.25, &mut rng);
        assert_eq!(step.event, None);
        assert_eq!(step.state.remaining_dwell(), Some(Duration::from_millis(250)));

        let step = advance(&step.state, &catalog, &config, 0.25, &mut rng);
        match step.event {
            Some(TransitionEvent::ItemRequested { index }) => {
                assert_ne!(index, 2);
                assert_eq!(step.state.item_index, index);
            }
            other => panic!("expected an item request, got {other:?}"),
        }
        assert_eq!(step.state.phase, TransitionPhase::AwaitingLoad);
    }

    #[test]
    fn test_rotation_follows_item_flag() {
        let (config, catalog, mut rng) = setup(9);
        let mut state = TransitionState::new(&config, catalog.len(), &mut rng);

        state.item_index = PLAIN_ITEM;
        let spun = advance(&state, &catalog, &config, 2.0, &mut rng).state;
        assert_relative_eq!(spun.rotation.y, state.rotation.y + 0.048);

        let noise = catalog.iter().position(ShowcaseItem::uses_noise_overlay).unwrap();
        state.item_index = noise;
        let still = advance(&state, &catalog, &config, 2.0, &mut rng).state;
        assert_eq!(still.rotation, state.rotation);
    }

    #[test]
    fn test_awaiting_load_does_not_move() {
        let (config, catalog, mut rng) = setup(10);
        let state = TransitionState::new(&config, catalog.len(), &mut rng);
        let step = advance(&state, &catalog, &config, 3.0, &mut rng);
        assert_eq!(step.state.position, state.position);
        assert_eq!(step.event, None);
        assert_relative_eq!(step.state.elapsed, 3.0);
    }

    #[test]
    fn test_clear_countdown() {
        let (config, catalog, mut rng) = setup(11);
        let mut state = TransitionState::new(&config, catalog.len(), &mut rng);
        state.phase = TransitionPhase::IdleAtTarget { remaining: Duration::from_secs(3) };
        state.clear_countdown();
        assert_eq!(state.remaining_dwell(), None);
        assert_eq!(state.phase, TransitionPhase::AwaitingLoad);
    }
}
