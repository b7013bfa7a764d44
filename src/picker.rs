//! Pointer picking: find the dynamic fixture under a world-space point.
//!
//! A pure, side-effect-free read used to seed a drag gesture. Static boundary
//! fixtures are never eligible, and a miss is `None`, not an error.

use glam::Vec2;

use crate::world::{BodyHandle, World};

/// Result of a successful point query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickHit {
    pub body: BodyHandle,
    /// Index of the matched fixture within the body.
    pub fixture: usize,
}

/// Test `point` (meters) against every fixture of every dynamic body and
/// return the first strict containment hit. Iteration order is unspecified
/// and the query short-circuits on the first match; draggable shapes are not
/// expected to overlap.
pub fn pick(world: &World, point: Vec2) -> Option<PickHit> {
    for (index, body) in world.bodies().iter().enumerate() {
        if !body.is_dynamic() {
            continue;
        }
        for (fixture_index, fixture) in body.fixtures().iter().enumerate() {
            if fixture.test_point(body.position, point) {
                return Some(PickHit {
                    body: BodyHandle(index),
                    fixture: fixture_index,
                });
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene;

    #[test]
    fn test_point_inside_dynamic_fixture_hits() {
        let mut world = scene::default_world();
        scene::build_walls(&mut world, 800.0, 600.0).unwrap();
        let ball = scene::spawn_drag_ball(&mut world, Vec2::new(400.0, 300.0));

        let hit = pick(&world, Vec2::new(4.1, 3.1)).expect("ball under pointer");
        assert_eq!(hit.body, ball);
        assert_eq!(hit.fixture, 0);
    }

    #[test]
    fn test_point_inside_wall_only_misses() {
        let mut world = scene::default_world();
        scene::build_walls(&mut world, 800.0, 600.0).unwrap();
        scene::spawn_drag_ball(&mut world, Vec2::new(400.0, 300.0));

        // Center of the floor slab: contained by a static fixture only.
        assert_eq!(pick(&world, Vec2::new(4.0, 6.05)), None);
    }

    #[test]
    fn test_point_in_free_space_misses() {
        let mut world = scene::default_world();
        scene::build_walls(&mut world, 800.0, 600.0).unwrap();
        scene::spawn_drag_ball(&mut world, Vec2::new(400.0, 300.0));

        assert_eq!(pick(&world, Vec2::new(1.0, 1.0)), None);
    }
}
