//! The render mirror: one sprite instance per physics particle.
//!
//! The particle system is the sole source of truth for positions; the mirror
//! exclusively owns the visual pool and keeps `pool[i]` in lockstep with
//! `particle_system.position(i)` by index convention. The per-frame sync is a
//! pure read-then-write copy with no steady-state allocation.

use bytemuck::{Pod, Zeroable};

use crate::particles::ParticleSystem;

/// GPU-facing sprite instance: pixel-space center position plus the quad
/// size in pixels. The sprite pivot is its center, so writing the position
/// translates the visual center rather than a corner.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct SpriteInstance {
    pub position: [f32; 2],
    pub size: f32,
    pub _pad: f32,
}

impl SpriteInstance {
    pub fn new(x: f32, y: f32, size: f32) -> Self {
        Self { position: [x, y], size, _pad: 0.0 }
    }
}

/// Owns the visual pool mirroring the particle buffer.
#[derive(Debug)]
pub struct RenderMirror {
    instances: Vec<SpriteInstance>,
    sprite_size: f32,
}

impl RenderMirror {
    /// Create an empty mirror whose sprites render at `sprite_size` pixels.
    pub fn new(sprite_size: f32) -> Self {
        Self {
            instances: Vec::new(),
            sprite_size,
        }
    }

    /// Allocate exactly `count` instances, one per particle, in index order.
    /// Runs once after seeding.
    pub fn allocate(&mut self, count: usize) {
        self.instances.clear();
        self.instances
            .resize(count, SpriteInstance::new(0.0, 0.0, self.sprite_size));
    }

    /// Copy physics positions into the visual pool: for every particle i,
    /// `pool[i] = position(i) * meter`. Runs exactly once per simulation
    /// step, after the step and before presentation.
    ///
    /// The fixed-count invariant makes a pool/count mismatch impossible in
    /// normal operation; if one ever appears, the pool is reallocated to
    /// match rather than dropping or duplicating visuals.
    pub fn sync(&mut self, particles: &ParticleSystem, meter: f32) {
        if self.instances.len() != particles.count() {
            self.allocate(particles.count());
        }
        for (instance, &position) in self.instances.iter_mut().zip(particles.positions()) {
            instance.position = [position.x * meter, position.y * meter];
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// The instance pool, ready for upload to the instance buffer.
    #[inline]
    pub fn instances(&self) -> &[SpriteInstance] {
        &self.instances
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particles::{ParticleSystem, ParticleSystemDef};
    use glam::Vec2;

    fn seeded_system() -> ParticleSystem {
        let mut ps = ParticleSystem::new(ParticleSystemDef {
            radius: 0.04,
            pressure_strength: 4.0,
        });
        ps.create_group(Vec2::ZERO, Vec2::new(1.0, 0.5));
        ps
    }

    #[test]
    fn test_pool_matches_count_after_allocate_and_sync() {
        let ps = seeded_system();
        let mut mirror = RenderMirror::new(8.0);
        mirror.allocate(ps.count());
        assert_eq!(mirror.len(), ps.count());

        let mut mirror2 = RenderMirror::new(8.0);
        mirror2.sync(&ps, 100.0);
        assert_eq!(mirror2.len(), ps.count());
    }

    #[test]
    fn test_sync_scales_positions_exactly() {
        let ps = seeded_system();
        let mut mirror = RenderMirror::new(8.0);
        mirror.allocate(ps.count());
        mirror.sync(&ps, 100.0);

        for (i, instance) in mirror.instances().iter().enumerate() {
            let p = ps.position(i);
            assert_eq!(instance.position, [p.x * 100.0, p.y * 100.0]);
            assert_eq!(instance.size, 8.0);
        }
    }

    #[test]
    fn test_sync_is_idempotent_without_a_step() {
        let ps = seeded_system();
        let mut mirror = RenderMirror::new(8.0);
        mirror.sync(&ps, 100.0);
        let first: Vec<SpriteInstance> = mirror.instances().to_vec();
        mirror.sync(&ps, 100.0);
        assert_eq!(mirror.instances(), first.as_slice());
    }

    #[test]
    fn test_mismatched_pool_is_reallocated() {
        let ps = seeded_system();
        let mut mirror = RenderMirror::new(8.0);
        mirror.allocate(3); // wrong on purpose
        mirror.sync(&ps, 100.0);
        assert_eq!(mirror.len(), ps.count());
        let p0 = ps.position(0);
        assert_eq!(mirror.instances()[0].position, [p0.x * 100.0, p0.y * 100.0]);
    }
}
