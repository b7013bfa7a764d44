//! Integration tests for the full simulation loop.
//!
//! These drive the public API the way the application does: build the walls,
//! seed the particle group, then advance the clock and check the invariants
//! that hold across whole frames rather than inside single modules.

use glam::Vec2;
use puddle::clock::SimulationClock;
use puddle::config::{self, METER, PARTICLE_SIZE};
use puddle::mirror::RenderMirror;
use puddle::scene;
use puddle::tilt::{self, OrientationEvent};
use puddle::world::World;
use puddle::pick;

const WIDTH: f32 = 800.0;
const HEIGHT: f32 = 600.0;

fn seeded_scene() -> (World, usize) {
    let mut world = scene::default_world();
    scene::build_walls(&mut world, WIDTH, HEIGHT).unwrap();
    let n = scene::seed_particles_in(
        &mut world,
        WIDTH,
        HEIGHT,
        128.0,
        128.0,
        Vec2::new(WIDTH / 2.0, 0.0),
    )
    .unwrap();
    (world, n)
}

#[test]
fn test_seed_produces_particles_and_mirror_matches() {
    let (world, n) = seeded_scene();
    assert!(n > 0);

    let mut mirror = RenderMirror::new(PARTICLE_SIZE * 2.0);
    mirror.allocate(n);
    assert_eq!(mirror.len(), world.particle_system().unwrap().count());
}

#[test]
fn test_first_step_moves_every_particle_down() {
    let (mut world, _) = seeded_scene();
    let before: Vec<Vec2> = world.particle_system().unwrap().positions().to_vec();

    world.step(config::TIME_STEP, 1, 1);

    let ps = world.particle_system().unwrap();
    for (i, &b) in before.iter().enumerate() {
        let a = ps.position(i);
        assert!(
            a.y > b.y,
            "particle {} should fall: {} -> {}",
            i,
            b.y,
            a.y
        );
    }
}

#[test]
fn test_particles_stay_inside_the_envelope() {
    let (mut world, _) = seeded_scene();

    // Five seconds of simulated free fall, settle, and slosh.
    for _ in 0..300 {
        world.step(config::TIME_STEP, 1, 1);
    }

    let w = WIDTH / METER;
    let h = HEIGHT / METER;
    for &p in world.particle_system().unwrap().positions() {
        assert!(p.x >= -1e-4 && p.x <= w + 1e-4, "x out of bounds: {}", p.x);
        assert!(p.y >= -1e-4 && p.y <= h + 1e-4, "y out of bounds: {}", p.y);
    }
}

#[test]
fn test_particles_follow_a_tilt_to_the_left() {
    let (mut world, _) = seeded_scene();

    // Let the group drop away from the ceiling first.
    for _ in 0..60 {
        world.step(config::TIME_STEP, 1, 1);
    }
    let mean_x_before = mean_x(&world);

    // 135 degrees plus the built-in offset points gravity straight left.
    tilt::apply(&mut world, OrientationEvent { alpha: Some(135.0) });
    for _ in 0..120 {
        world.step(config::TIME_STEP, 1, 1);
    }

    assert!(mean_x(&world) < mean_x_before);
}

fn mean_x(world: &World) -> f32 {
    let ps = world.particle_system().unwrap();
    ps.positions().iter().map(|p| p.x).sum::<f32>() / ps.count() as f32
}

#[test]
fn test_clock_keeps_mirror_in_lockstep_over_many_frames() {
    let (mut world, n) = seeded_scene();
    let mut mirror = RenderMirror::new(PARTICLE_SIZE * 2.0);
    mirror.allocate(n);
    let mut clock = SimulationClock::new();

    for _ in 0..30 {
        clock.tick(&mut world, &mut mirror);

        let ps = world.particle_system().unwrap();
        assert_eq!(mirror.len(), ps.count());
        for (i, instance) in mirror.instances().iter().enumerate() {
            let p = ps.position(i);
            assert_eq!(instance.position, [p.x * METER, p.y * METER]);
        }
    }
    assert_eq!(clock.frame(), 30);

    clock.stop();
    assert!(!clock.is_running());
}

#[test]
fn test_drag_gesture_moves_the_ball_and_release_throws_it() {
    let (mut world, _) = seeded_scene();
    let ball = scene::spawn_drag_ball(&mut world, Vec2::new(400.0, 300.0));

    // Pick under the pointer, in meters.
    let hit = pick(&world, Vec2::new(4.0, 3.0)).expect("ball under pointer");
    assert_eq!(hit.body, ball);

    // Drag toward the upper left for a few frames.
    let target = Vec2::new(3.0, 2.0);
    for _ in 0..30 {
        world.body_mut(ball).set_drag_target(target);
        world.step(config::TIME_STEP, 1, 1);
    }
    let dragged = world.body(ball).position;
    assert!(dragged.distance(target) < 1.0, "ball at {:?}", dragged);

    // Release: the chase velocity carries over instead of dropping to zero.
    world.body_mut(ball).clear_drag_target();
    let v = world.body(ball).velocity;
    assert!(v.length() > 0.0 || dragged.distance(target) < 1e-3);
}

#[test]
fn test_picker_never_returns_walls() {
    let mut world = scene::default_world();
    scene::build_walls(&mut world, WIDTH, HEIGHT).unwrap();

    // Dead center of the floor slab.
    let floor_center = Vec2::new(WIDTH / 2.0 / METER, HEIGHT / METER + 0.05);
    assert!(pick(&world, floor_center).is_none());
}
