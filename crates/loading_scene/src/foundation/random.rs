//! Random draws shared by the spawner and the showcase
//!
//! Every helper takes the generator explicitly so callers can seed it.

use rand::Rng;

/// Uniform integer in `[min, max]`, both ends included
pub fn random_int_inclusive<R: Rng + ?Sized>(rng: &mut R, min: i32, max: i32) -> i32 {
    if max <= min {
        return min;
    }
    rng.gen_range(min..=max)
}

/// Uniform float in `[min, max)`
pub fn random_float<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    if max <= min {
        return min;
    }
    rng.gen_range(min..max)
}

/// Uniform index in `0..len` that differs from `excluded`
///
/// Draws by rejection. Returns `None` when no admissible index exists
/// (an empty range, or a single slot that is the excluded one).
pub fn pick_index_excluding<R: Rng + ?Sized>(
    rng: &mut R,
    len: usize,
    excluded: Option<usize>,
) -> Option<usize> {
    let admissible = match excluded {
        Some(index) if index < len => len - 1,
        _ => len,
    };
    if admissible == 0 {
        return None;
    }

    loop {
        let index = rng.gen_range(0..len);
        if Some(index) != excluded {
            return Some(index);
        }
    }
}
