//! Rejection sampling of spawn points inside a polygon footprint

use super::polygon::Polygon;
use crate::foundation::math::Vec2;
use rand::Rng;

/// Default number of candidates drawn before the sampler gives up
pub const DEFAULT_MAX_ATTEMPTS: usize = 10_000;

/// Draws points uniformly over a polygon's bounding box and keeps those
/// the crossing test accepts
#[derive(Debug, Clone)]
pub struct SpawnSampler {
    polygon: Polygon,
    max_attempts: usize,
    last_accepted: Option<Vec2>,
}

impl SpawnSampler {
    /// Create a sampler with the default attempt cap
    pub fn new(polygon: Polygon) -> Self {
        Self::with_max_attempts(polygon, DEFAULT_MAX_ATTEMPTS)
    }

    /// Create a sampler with an explicit attempt cap (at least one attempt)
    pub fn with_max_attempts(polygon: Polygon, max_attempts: usize) -> Self {
        Self {
            polygon,
            max_attempts: max_attempts.max(1),
            last_accepted: None,
        }
    }

    /// Footprint being sampled
    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }

    /// One uniform candidate from the bounding box, accepted or not
    pub fn candidate<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec2 {
        let bounds = self.polygon.bounds();
        Vec2::new(
            rng.gen_range(bounds.min.x..=bounds.max.x),
            rng.gen_range(bounds.min.y..=bounds.max.y),
        )
    }

    /// Draw candidates until one lands inside, or the cap runs out
    pub fn try_sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Vec2> {
        (0..self.max_attempts)
            .map(|_| self.candidate(rng))
            .find(|point| self.polygon.contains(*point))
    }

    /// Draw an accepted point, falling back when the cap runs out
    ///
    /// The fallback is the most recent accepted point, or the vertex
    /// centroid if nothing was ever accepted.
    pub fn sample<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Vec2 {
        if let Some(point) = self.try_sample(rng) {
            self.last_accepted = Some(point);
            return point;
        }

        let fallback = self.last_accepted.unwrap_or_else(|| self.polygon.vertex_centroid());
        log::warn!(
            "Spawn sampler rejected {} candidates in a row, falling back to {:?}",
            self.max_attempts,
            fallback
        );
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn footprint() -> Polygon {
        Polygon::new(vec![
            Vec2::new(-130.0, -80.0),
            Vec2::new(-80.0, -100.0),
            Vec2::new(0.0, -150.0),
            Vec2::new(100.0, -200.0),
            Vec2::new(-130.0, -200.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_samples_inside_bounds_and_polygon() {
        let mut sampler = SpawnSampler::new(footprint());
        let mut rng = StdRng::seed_from_u64(42);
        let bounds = sampler.polygon().bounds();
        for _ in 0..500 {
            let point = sampler.sample(&mut rng);
            assert!(bounds.contains(point), "{point:?} outside bounds");
            assert!(sampler.polygon().contains(point), "{point:?} rejected by polygon");
        }
    }

    #[test]
    fn test_degenerate_polygon_falls_back_to_centroid() {
        // Zero-area: every vertex on one line, nothing can be inside
        let line = Polygon::new(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(5.0, 0.0),
            Vec2::new(10.0, 0.0),
        ])
        .unwrap();
        let mut sampler = SpawnSampler::with_max_attempts(line, 50);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(sampler.try_sample(&mut rng), None);
        assert_eq!(sampler.sample(&mut rng), Vec2::new(5.0, 0.0));
    }

    #[test]
    fn test_fallback_prefers_last_accepted_point() {
        let mut sampler = SpawnSampler::new(footprint());
        let mut rng = StdRng::seed_from_u64(9);
        sampler.sample(&mut rng);

        // With a single attempt many draws miss; a miss must hand back the
        // remembered point, which is itself inside.
        sampler.max_attempts = 1;
        for _ in 0..200 {
            let remembered = sampler.last_accepted;
            let point = sampler.sample(&mut rng);
            assert!(sampler.polygon().contains(point));
            if sampler.last_accepted == remembered {
                assert_eq!(Some(point), remembered);
            }
        }
    }
}
