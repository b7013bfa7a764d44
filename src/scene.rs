//! One-time scene construction: the wall envelope, the particle seed, and
//! the draggable ball.
//!
//! Everything here runs once at startup and works in pixel units at the API
//! boundary, converting to meters internally via [`config::METER`].

use glam::Vec2;

use crate::body::{BodyType, Fixture, Shape};
use crate::config::{
    self, PerformanceTier, DRAG_BALL_SIZE, METER, PARTICLE_SIZE, PRESSURE_STRENGTH,
    WALL_THICKNESS,
};
use crate::error::SceneError;
use crate::particles::ParticleSystemDef;
use crate::world::{BodyHandle, World};

fn check_viewport(width_px: f32, height_px: f32) -> Result<(), SceneError> {
    if width_px <= 0.0 || height_px <= 0.0 {
        return Err(SceneError::DegenerateViewport {
            width: width_px,
            height: height_px,
        });
    }
    Ok(())
}

/// Build one static body with four thin box fixtures bounding the viewport:
/// ceiling, floor, left wall, right wall. Each slab sits just outside the
/// corresponding viewport edge, spans its full length, and has zero density.
pub fn build_walls(world: &mut World, width_px: f32, height_px: f32) -> Result<BodyHandle, SceneError> {
    check_viewport(width_px, height_px)?;

    let w = width_px / METER;
    let h = height_px / METER;
    let half_t = WALL_THICKNESS / METER / 2.0;

    let ground = world.create_body(BodyType::Static, Vec2::ZERO);

    // Ceiling and floor span the width, side walls span the height.
    let slabs = [
        (Vec2::new(w / 2.0, -half_t), Vec2::new(w / 2.0, half_t)),
        (Vec2::new(w / 2.0, h + half_t), Vec2::new(w / 2.0, half_t)),
        (Vec2::new(-half_t, h / 2.0), Vec2::new(half_t, h / 2.0)),
        (Vec2::new(w + half_t, h / 2.0), Vec2::new(half_t, h / 2.0)),
    ];
    for (offset, half) in slabs {
        world.add_fixture(ground, Fixture::new(Shape::Box { half }, offset, 0.0));
    }

    Ok(ground)
}

/// Register the particle system and spawn the initial group in the tier's
/// seed region, centered horizontally at the top of the viewport. Returns the
/// derived particle count.
pub fn seed_particles(
    world: &mut World,
    width_px: f32,
    height_px: f32,
    tier: PerformanceTier,
) -> Result<usize, SceneError> {
    let (region_w, region_h) = tier.seed_region();
    seed_particles_in(
        world,
        width_px,
        height_px,
        region_w,
        region_h,
        Vec2::new(width_px / 2.0, 0.0),
    )
}

/// Register the particle system and spawn the initial group in an explicit
/// rectangular seed region (full width/height and center, all in pixels).
///
/// The region is clipped to the interior of the wall envelope before filling,
/// so every spawned particle starts inside the envelope. Must run after
/// [`build_walls`] and before render mirror allocation.
pub fn seed_particles_in(
    world: &mut World,
    width_px: f32,
    height_px: f32,
    region_w_px: f32,
    region_h_px: f32,
    center_px: Vec2,
) -> Result<usize, SceneError> {
    check_viewport(width_px, height_px)?;

    let radius = PARTICLE_SIZE / METER;
    let ps = world.create_particle_system(ParticleSystemDef {
        radius,
        pressure_strength: PRESSURE_STRENGTH,
    });

    let center = center_px / METER;
    let half = Vec2::new(region_w_px, region_h_px) / METER / 2.0;
    // Clip to the envelope interior.
    let min = (center - half).max(Vec2::ZERO);
    let max = (center + half).min(Vec2::new(width_px, height_px) / METER);

    Ok(ps.create_group(min, max))
}

/// Spawn the draggable ball: a dynamic body with a single circle fixture of
/// [`DRAG_BALL_SIZE`] radius at the given pixel position.
pub fn spawn_drag_ball(world: &mut World, position_px: Vec2) -> BodyHandle {
    let ball = world.create_body(BodyType::Dynamic, position_px / METER);
    world.add_fixture(
        ball,
        Fixture::new(Shape::Circle { radius: DRAG_BALL_SIZE / METER }, Vec2::ZERO, 1.0),
    );
    ball
}

/// Default-gravity world, straight down at [`config::GRAVITY`].
pub fn default_world() -> World {
    World::new(Vec2::new(0.0, config::GRAVITY))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::BodyType;

    #[test]
    fn test_walls_reject_degenerate_viewport() {
        let mut world = default_world();
        assert!(build_walls(&mut world, 0.0, 600.0).is_err());
        assert!(build_walls(&mut world, 800.0, -1.0).is_err());
        assert!(world.bodies().is_empty());
    }

    #[test]
    fn test_walls_are_static_massless_and_outside() {
        let mut world = default_world();
        let ground = build_walls(&mut world, 800.0, 600.0).unwrap();
        let body = world.body(ground);
        assert_eq!(body.kind(), BodyType::Static);
        assert_eq!(body.fixtures().len(), 4);

        for fixture in body.fixtures() {
            assert_eq!(fixture.density, 0.0);
            // No slab may reach into the open viewport interior (0,8)x(0,6).
            let Shape::Box { half } = fixture.shape else {
                panic!("walls must be boxes");
            };
            let min = fixture.offset - half;
            let max = fixture.offset + half;
            let overlaps_interior = min.x < 8.0 && max.x > 0.0 && min.y < 6.0 && max.y > 0.0;
            assert!(!overlaps_interior, "slab at {:?} reaches inside", fixture.offset);
        }
    }

    #[test]
    fn test_wall_point_queries() {
        let mut world = default_world();
        let ground = build_walls(&mut world, 800.0, 600.0).unwrap();
        let body = world.body(ground);

        // Just below the ceiling slab is free space, just above is wall.
        let hit_floor = body
            .fixtures()
            .iter()
            .any(|f| f.test_point(body.position, Vec2::new(4.0, 6.05)));
        assert!(hit_floor);
        let hit_interior = body
            .fixtures()
            .iter()
            .any(|f| f.test_point(body.position, Vec2::new(4.0, 3.0)));
        assert!(!hit_interior);
    }

    #[test]
    fn test_seed_fills_the_clipped_region() {
        let mut world = default_world();
        build_walls(&mut world, 800.0, 600.0).unwrap();
        let n = seed_particles_in(&mut world, 800.0, 600.0, 128.0, 128.0, Vec2::new(400.0, 0.0))
            .unwrap();
        assert!(n > 0);

        let ps = world.particle_system().unwrap();
        assert_eq!(ps.count(), n);
        for &p in ps.positions() {
            // Inside the seed region rectangle...
            assert!(p.x >= (400.0 - 64.0) / METER && p.x <= (400.0 + 64.0) / METER);
            assert!(p.y <= 0.64);
            // ...and inside the envelope (the region's top half is clipped).
            assert!(p.y >= 0.0);
        }
    }

    #[test]
    fn test_high_tier_seeds_more_particles_than_low() {
        let mut world_high = default_world();
        build_walls(&mut world_high, 800.0, 600.0).unwrap();
        let high = seed_particles(&mut world_high, 800.0, 600.0, PerformanceTier::High).unwrap();

        let mut world_low = default_world();
        build_walls(&mut world_low, 800.0, 600.0).unwrap();
        let low = seed_particles(&mut world_low, 800.0, 600.0, PerformanceTier::Low).unwrap();

        assert!(high > low);
    }

    #[test]
    fn test_drag_ball_is_dynamic() {
        let mut world = default_world();
        let ball = spawn_drag_ball(&mut world, Vec2::new(400.0, 150.0));
        assert!(world.body(ball).is_dynamic());
        assert_eq!(world.body(ball).position, Vec2::new(4.0, 1.5));
    }
}
