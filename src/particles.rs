//! The per-world particle system.
//!
//! Particles are points sharing one set of material parameters. The count is
//! fixed at seed time: index `i` refers to the same logical particle for the
//! whole session, which is what lets the render mirror stay a plain parallel
//! array.
//!
//! The solver is a deliberately small approximation: gravity, a neighbor
//! pressure impulse within one particle diameter, and projection out of every
//! collision fixture. Good enough for a real-time toy, not for physically
//! exact fluid modeling.

use glam::Vec2;

use crate::body::Body;
use crate::spatial::SpatialGrid;

/// Hash table size for the neighbor grid. Prime for good distribution.
const GRID_TABLE_SIZE: usize = 4093;

/// Particle speed cap in meters per second. Keeps one step's displacement
/// shorter than half a wall slab, so a particle can never cross a slab's
/// center plane and get projected out the far side.
const MAX_SPEED: f32 = 4.0;

/// Material parameters shared by every particle in a system.
#[derive(Debug, Clone, Copy)]
pub struct ParticleSystemDef {
    /// Particle radius in meters.
    pub radius: f32,
    /// Pressure-response coefficient. Increases pressure in response to
    /// compression; smaller values allow more compression.
    pub pressure_strength: f32,
}

/// A single per-world aggregate of particles.
#[derive(Debug)]
pub struct ParticleSystem {
    radius: f32,
    pressure_strength: f32,
    positions: Vec<Vec2>,
    velocities: Vec<Vec2>,
    grid: SpatialGrid,
}

impl ParticleSystem {
    pub fn new(def: ParticleSystemDef) -> Self {
        assert!(def.radius > 0.0, "particle radius must be positive");
        // Pressure acts within one diameter, so that is the query radius.
        let cell_size = def.radius * 2.0;
        Self {
            radius: def.radius,
            pressure_strength: def.pressure_strength,
            positions: Vec::new(),
            velocities: Vec::new(),
            grid: SpatialGrid::new(cell_size, GRID_TABLE_SIZE),
        }
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.positions.len()
    }

    /// Read-only flat position buffer, one entry per particle, in meters.
    #[inline]
    pub fn positions(&self) -> &[Vec2] {
        &self.positions
    }

    #[inline]
    pub fn position(&self, index: usize) -> Vec2 {
        self.positions[index]
    }

    #[inline]
    pub fn velocity(&self, index: usize) -> Vec2 {
        self.velocities[index]
    }

    /// Spawn a group of particles filling the rectangle from `min` to `max`
    /// (meters) on a uniform grid at particle-diameter spacing.
    ///
    /// Centers are kept one radius away from the rectangle edges so freshly
    /// spawned particles neither overlap the rectangle boundary nor each
    /// other. The resulting count is derived from the fill, never specified.
    /// Returns the number of particles added.
    pub fn create_group(&mut self, min: Vec2, max: Vec2) -> usize {
        let spacing = self.radius * 2.0;
        let before = self.positions.len();

        let mut y = min.y + self.radius;
        while y <= max.y - self.radius {
            let mut x = min.x + self.radius;
            while x <= max.x - self.radius {
                self.positions.push(Vec2::new(x, y));
                self.velocities.push(Vec2::ZERO);
                x += spacing;
            }
            y += spacing;
        }

        self.positions.len() - before
    }

    /// Accumulate gravity into every particle velocity.
    pub fn apply_forces(&mut self, gravity: Vec2, dt: f32) {
        for v in &mut self.velocities {
            *v += gravity * dt;
        }
    }

    /// One round of pairwise pressure relaxation: particles closer than one
    /// diameter push each other apart along the pair axis, scaled by the
    /// pressure-response coefficient and how deeply they overlap.
    pub fn relax_pressure(&mut self) {
        let h = self.radius * 2.0;
        let h_sq = h * h;
        self.grid.build(&self.positions);

        for i in 0..self.positions.len() {
            let pi = self.positions[i];
            let mut impulse = Vec2::ZERO;
            self.grid.for_each_candidate(pi, |j| {
                let j = j as usize;
                if j == i {
                    return;
                }
                let d = pi - self.positions[j];
                let dist_sq = d.length_squared();
                if dist_sq >= h_sq || dist_sq < 1e-12 {
                    return;
                }
                let dist = dist_sq.sqrt();
                let overlap = (h - dist) / h;
                impulse += (d / dist) * (self.pressure_strength * overlap);
            });
            self.velocities[i] += impulse;
        }
    }

    /// Integrate positions from velocities, clamping speed first.
    pub fn integrate(&mut self, dt: f32) {
        for (p, v) in self.positions.iter_mut().zip(&mut self.velocities) {
            let speed = v.length();
            if speed > MAX_SPEED {
                *v *= MAX_SPEED / speed;
            }
            *p += *v * dt;
        }
    }

    /// Project every particle out of every fixture, treating particles as
    /// discs of their radius, and kill the velocity component that points
    /// into the contact.
    pub fn resolve_collisions(&mut self, bodies: &[Body]) {
        for (p, v) in self.positions.iter_mut().zip(&mut self.velocities) {
            for body in bodies {
                for fixture in body.fixtures() {
                    if let Some((corrected, normal)) =
                        fixture.resolve_point(body.position, *p, self.radius)
                    {
                        *p = corrected;
                        let vn = v.dot(normal);
                        if vn < 0.0 {
                            *v -= normal * vn;
                        }
                    }
                }
            }
        }
    }
}
