//! The simulation clock: fixed-timestep advance, decoupled from rendering
//! hardware speed.
//!
//! Each frame callback advances the world by exactly [`config::TIME_STEP`]
//! seconds of simulated time and then syncs the render mirror, in that order,
//! so the mirror for frame k always observes the state produced by step k.
//! The loop itself has no natural termination; the embedding environment
//! checks [`SimulationClock::is_running`] before rescheduling.

use crate::config::{self, METER};
use crate::mirror::RenderMirror;
use crate::world::World;

/// Fixed-timestep driver for the physics/render lockstep.
#[derive(Debug)]
pub struct SimulationClock {
    time_step: f32,
    velocity_iterations: u32,
    position_iterations: u32,
    running: bool,
    frame_count: u64,
}

impl SimulationClock {
    /// Clock with the default timestep and iteration counts. One velocity
    /// and one position iteration trade accuracy for throughput on
    /// constrained hardware.
    pub fn new() -> Self {
        Self {
            time_step: config::TIME_STEP,
            velocity_iterations: config::VELOCITY_ITERATIONS,
            position_iterations: config::POSITION_ITERATIONS,
            running: true,
            frame_count: 0,
        }
    }

    pub fn with_time_step(mut self, time_step: f32) -> Self {
        self.time_step = time_step;
        self
    }

    pub fn with_iterations(mut self, velocity: u32, position: u32) -> Self {
        self.velocity_iterations = velocity;
        self.position_iterations = position;
        self
    }

    #[inline]
    pub fn time_step(&self) -> f32 {
        self.time_step
    }

    /// Total steps driven since creation.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Whether the loop should reschedule itself.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// External stop signal for teardown. The loop checks this before each
    /// reschedule.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Advance physics by one fixed timestep, then sync the mirror. Strictly
    /// sequential: the mirror never observes a partially-advanced state.
    pub fn tick(&mut self, world: &mut World, mirror: &mut RenderMirror) {
        world.step(self.time_step, self.velocity_iterations, self.position_iterations);
        if let Some(ps) = world.particle_system() {
            mirror.sync(ps, METER);
        }
        self.frame_count += 1;
    }
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PARTICLE_SIZE;
    use crate::scene;

    fn setup() -> (World, RenderMirror) {
        let mut world = scene::default_world();
        scene::build_walls(&mut world, 800.0, 600.0).unwrap();
        scene::seed_particles(&mut world, 800.0, 600.0, config::PerformanceTier::Low).unwrap();
        let mut mirror = RenderMirror::new(PARTICLE_SIZE * 2.0);
        mirror.allocate(world.particle_system().unwrap().count());
        (world, mirror)
    }

    #[test]
    fn test_tick_keeps_mirror_in_lockstep() {
        let (mut world, mut mirror) = setup();
        let mut clock = SimulationClock::new();

        for _ in 0..10 {
            clock.tick(&mut world, &mut mirror);
            let ps = world.particle_system().unwrap();
            assert_eq!(mirror.len(), ps.count());
            for (i, instance) in mirror.instances().iter().enumerate() {
                let p = ps.position(i);
                assert_eq!(instance.position, [p.x * METER, p.y * METER]);
            }
        }
        assert_eq!(clock.frame(), 10);
    }

    #[test]
    fn test_stop_signal_is_observable() {
        let mut clock = SimulationClock::new();
        assert!(clock.is_running());
        clock.stop();
        assert!(!clock.is_running());
    }

    #[test]
    fn test_builder_overrides() {
        let clock = SimulationClock::new()
            .with_time_step(1.0 / 30.0)
            .with_iterations(2, 3);
        assert_eq!(clock.time_step(), 1.0 / 30.0);
        assert_eq!(clock.velocity_iterations, 2);
        assert_eq!(clock.position_iterations, 3);
    }
}
