//! Fog system owning every smoke particle

use super::fog::{FogInstanceData, FogParticle};
use crate::core::config::FogConfig;
use crate::foundation::math::{utils, Vec3};
use crate::foundation::random::{random_float, random_int_inclusive};
use crate::host::TextureHandle;
use crate::spatial::SpawnSampler;
use rand::Rng;

/// System for updating the smoke field
pub struct FogSystem {
    particles: Vec<FogParticle>,
    texture: TextureHandle,
    quad_size: f32,
    rotation_rate: f32,
}

impl FogSystem {
    /// Spawn `config.instance_count` particles inside the sampler's footprint
    pub fn spawn<R: Rng + ?Sized>(
        config: &FogConfig,
        sampler: &mut SpawnSampler,
        texture: TextureHandle,
        rng: &mut R,
    ) -> Self {
        let particles: Vec<FogParticle> = (0..config.instance_count)
            .map(|_| Self::spawn_particle(config, sampler, rng))
            .collect();

        log::info!(
            "Spawned {} fog particles on the z = {} plane",
            particles.len(),
            config.depth
        );

        Self {
            particles,
            texture,
            quad_size: config.quad_size,
            rotation_rate: config.rotation_rate,
        }
    }

    fn spawn_particle<R: Rng + ?Sized>(
        config: &FogConfig,
        sampler: &mut SpawnSampler,
        rng: &mut R,
    ) -> FogParticle {
        let spawn = sampler.sample(rng);
        let rise = random_int_inclusive(rng, config.rise_min, config.rise_max) as f32;
        let rotation = utils::deg_to_rad(random_float(rng, 0.0, 360.0));
        let speed = random_float(rng, config.speed_min, config.speed_max);

        FogParticle::new(Vec3::new(spawn.x, spawn.y, config.depth), rise, speed, rotation)
    }

    /// Update all particles by `delta_time` seconds
    pub fn update(&mut self, delta_time: f32) {
        for particle in &mut self.particles {
            particle.update(delta_time, self.rotation_rate);
        }
    }

    /// All particles
    pub fn particles(&self) -> &[FogParticle] {
        &self.particles
    }

    /// Number of particles
    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    /// Texture every smoke quad is drawn with
    pub fn texture(&self) -> TextureHandle {
        self.texture
    }

    /// Edge length of a smoke quad
    pub fn quad_size(&self) -> f32 {
        self.quad_size
    }

    /// Per-instance data ready for upload
    pub fn instance_data(&self) -> Vec<FogInstanceData> {
        self.particles.iter().map(FogParticle::instance_data).collect()
    }

    /// Instance data as raw bytes, laid out for a vertex buffer
    pub fn instance_bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice(&self.instance_data()).to_vec()
    }

    /// Mean opacity across the field, reported in the scene's status line
    pub fn average_opacity(&self) -> f32 {
        if self.particles.is_empty() {
            return 0.0;
        }
        self.particles.iter().map(|p| p.opacity).sum::<f32>() / self.particles.len() as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec2;
    use crate::spatial::Polygon;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn system(seed: u64) -> FogSystem {
        let config = FogConfig::default();
        let polygon = Polygon::new(config.footprint.clone()).unwrap();
        let mut sampler = SpawnSampler::new(polygon);
        let mut rng = StdRng::seed_from_u64(seed);
        FogSystem::spawn(&config, &mut sampler, TextureHandle(7), &mut rng)
    }

    #[test]
    fn test_spawn_respects_config() {
        let config = FogConfig::default();
        let polygon = Polygon::new(config.footprint.clone()).unwrap();
        let fog = system(1);

        assert_eq!(fog.particle_count(), 500);
        assert_eq!(fog.texture(), TextureHandle(7));
        assert_eq!(fog.quad_size(), 200.0);
        for particle in fog.particles() {
            assert!(polygon.contains(Vec2::new(particle.position.x, particle.position.y)));
            assert_eq!(particle.position.z, -50.0);
            let rise = particle.ceiling - particle.baseline;
            // Whole-unit rises, give or take float rounding of the ceiling
            assert!((rise - rise.round()).abs() < 1e-3);
            assert!((20.0..=60.0).contains(&rise.round()));
            assert!((0.05..1.0).contains(&particle.speed));
            assert!((0.0..=std::f32::consts::TAU).contains(&particle.rotation));
        }
    }

    #[test]
    fn test_update_keeps_particles_in_band() {
        let mut fog = system(2);
        for _ in 0..2000 {
            fog.update(0.5);
        }
        for particle in fog.particles() {
            assert!(particle.position.y >= particle.baseline);
            assert!(particle.position.y < particle.ceiling);
            assert!((0.0..=1.0).contains(&particle.opacity));
        }
        assert!(fog.average_opacity() > 0.0);
    }

    #[test]
    fn test_instance_data_matches_particles() {
        let fog = system(3);
        let data = fog.instance_data();
        assert_eq!(data.len(), fog.particle_count());
        assert_eq!(data[10].position[1], fog.particles()[10].position.y);
        assert_eq!(fog.instance_bytes().len(), data.len() * std::mem::size_of::<FogInstanceData>());
    }
}
