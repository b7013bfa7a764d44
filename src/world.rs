//! The simulation-wide context.
//!
//! A [`World`] owns the gravity vector, every body, and at most one particle
//! system. It is created once at startup, passed by reference to each
//! component, and never destroyed during a session. Nothing outside
//! [`World::step`] ever advances simulation time.

use glam::Vec2;

use crate::body::{resolve_circle_box, Body, BodyType, Fixture, Shape};
use crate::particles::{ParticleSystem, ParticleSystemDef};

/// Opaque handle to a body stored in a [`World`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyHandle(pub(crate) usize);

/// Simulation context: gravity, bodies, and the particle system.
#[derive(Debug)]
pub struct World {
    gravity: Vec2,
    bodies: Vec<Body>,
    particles: Option<ParticleSystem>,
}

impl World {
    /// Create a world with the given gravity vector (meters per second²).
    pub fn new(gravity: Vec2) -> Self {
        Self {
            gravity,
            bodies: Vec::new(),
            particles: None,
        }
    }

    #[inline]
    pub fn gravity(&self) -> Vec2 {
        self.gravity
    }

    /// Replace the gravity vector. Takes effect at the next step.
    pub fn set_gravity(&mut self, gravity: Vec2) {
        self.gravity = gravity;
    }

    pub fn create_body(&mut self, kind: BodyType, position: Vec2) -> BodyHandle {
        self.bodies.push(Body::new(kind, position));
        BodyHandle(self.bodies.len() - 1)
    }

    pub fn add_fixture(&mut self, handle: BodyHandle, fixture: Fixture) {
        self.bodies[handle.0].add_fixture(fixture);
    }

    #[inline]
    pub fn body(&self, handle: BodyHandle) -> &Body {
        &self.bodies[handle.0]
    }

    #[inline]
    pub fn body_mut(&mut self, handle: BodyHandle) -> &mut Body {
        &mut self.bodies[handle.0]
    }

    #[inline]
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Register the particle system for this world, replacing any previous
    /// one. A world carries at most one particle system.
    pub fn create_particle_system(&mut self, def: ParticleSystemDef) -> &mut ParticleSystem {
        self.particles = Some(ParticleSystem::new(def));
        self.particles.as_mut().unwrap()
    }

    #[inline]
    pub fn particle_system(&self) -> Option<&ParticleSystem> {
        self.particles.as_ref()
    }

    #[inline]
    pub fn particle_system_mut(&mut self) -> Option<&mut ParticleSystem> {
        self.particles.as_mut()
    }

    /// Advance the world by one fixed timestep.
    ///
    /// Order per step: dynamic bodies integrate and get projected inside the
    /// static envelope, then particles gain gravity, run
    /// `velocity_iterations` rounds of pressure relaxation, integrate, and
    /// run `position_iterations` rounds of collision projection against every
    /// fixture. After this returns the world is in a fully consistent state
    /// for rendering.
    pub fn step(&mut self, dt: f32, velocity_iterations: u32, position_iterations: u32) {
        let gravity = self.gravity;

        // Static fixtures in world space, collected before bodies move so the
        // dynamic pass can borrow them freely.
        let statics: Vec<(Vec2, Fixture)> = self
            .bodies
            .iter()
            .filter(|b| b.kind() == BodyType::Static)
            .flat_map(|b| b.fixtures().iter().map(|f| (b.position, *f)))
            .collect();

        for body in &mut self.bodies {
            if !body.is_dynamic() {
                continue;
            }
            body.integrate(gravity, dt);
            for fixture in body.fixtures().to_vec() {
                resolve_dynamic_fixture(body, &fixture, &statics);
            }
        }

        if let Some(ps) = &mut self.particles {
            ps.apply_forces(gravity, dt);
            for _ in 0..velocity_iterations {
                ps.relax_pressure();
            }
            ps.integrate(dt);
            for _ in 0..position_iterations {
                ps.resolve_collisions(&self.bodies);
            }
        }
    }
}

/// Keep one dynamic fixture outside every static fixture, adjusting the body
/// position and killing the inward velocity component on contact.
fn resolve_dynamic_fixture(body: &mut Body, fixture: &Fixture, statics: &[(Vec2, Fixture)]) {
    if let Shape::Circle { radius } = fixture.shape {
        for (static_pos, static_fixture) in statics {
            let Shape::Box { half } = static_fixture.shape else {
                continue;
            };
            let circle_center = body.position + fixture.offset;
            let box_center = *static_pos + static_fixture.offset;
            if let Some((corrected, normal)) =
                resolve_circle_box(circle_center, radius, box_center, half)
            {
                body.position = corrected - fixture.offset;
                let vn = body.velocity.dot(normal);
                if vn < 0.0 {
                    body.velocity -= normal * vn;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gravity_update_takes_effect_next_step() {
        let mut world = World::new(Vec2::new(0.0, 10.0));
        world.create_particle_system(ParticleSystemDef {
            radius: 0.04,
            pressure_strength: 4.0,
        });
        world
            .particle_system_mut()
            .unwrap()
            .create_group(Vec2::ZERO, Vec2::new(0.2, 0.2));
        assert!(world.particle_system().unwrap().count() > 0);

        world.set_gravity(Vec2::new(-10.0, 0.0));
        let before = world.particle_system().unwrap().position(0);
        world.step(1.0 / 60.0, 1, 1);
        let after = world.particle_system().unwrap().position(0);
        assert!(after.x < before.x, "step must observe the new gravity");
    }

    #[test]
    fn test_dynamic_body_falls_and_rests_on_static_box() {
        let mut world = World::new(Vec2::new(0.0, 10.0));
        let floor = world.create_body(BodyType::Static, Vec2::ZERO);
        world.add_fixture(
            floor,
            Fixture::new(Shape::Box { half: Vec2::new(10.0, 0.05) }, Vec2::new(0.0, 2.05), 0.0),
        );
        let ball = world.create_body(BodyType::Dynamic, Vec2::new(0.0, 0.5));
        world.add_fixture(ball, Fixture::new(Shape::Circle { radius: 0.5 }, Vec2::ZERO, 1.0));

        for _ in 0..600 {
            world.step(1.0 / 60.0, 1, 1);
        }
        let rest = world.body(ball).position;
        // Circle of radius 0.5 resting on the slab's top face at y = 2.0.
        assert!((rest.y - 1.5).abs() < 0.02, "ball rests at {}", rest.y);
    }

    #[test]
    fn test_step_count_is_stable() {
        let mut world = World::new(Vec2::new(0.0, 10.0));
        world.create_particle_system(ParticleSystemDef {
            radius: 0.04,
            pressure_strength: 4.0,
        });
        world
            .particle_system_mut()
            .unwrap()
            .create_group(Vec2::ZERO, Vec2::new(0.5, 0.5));
        let n = world.particle_system().unwrap().count();
        for _ in 0..120 {
            world.step(1.0 / 60.0, 1, 1);
        }
        assert_eq!(world.particle_system().unwrap().count(), n);
    }
}
