//! Device-tilt gravity control.
//!
//! Orientation events arrive at whatever cadence the host device delivers
//! them, independent of the frame loop. The handler only ever rewrites the
//! world's gravity vector; the integrator remains the sole authority over
//! positions.

use glam::Vec2;

use crate::config::GRAVITY;
use crate::world::World;

/// Phase offset added to the device angle before the radian conversion.
pub const PHASE_OFFSET_DEG: f32 = 45.0;

/// A device-orientation sample. `alpha` is the rotation angle in degrees,
/// absent on devices without the sensor.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrientationEvent {
    pub alpha: Option<f32>,
}

/// Straight-down fallback used when no angle is available.
pub fn default_gravity() -> Vec2 {
    Vec2::new(0.0, GRAVITY)
}

/// Map an orientation sample to a gravity vector. Total over the whole input
/// domain: any angle, or no angle at all, yields a finite vector of
/// [`GRAVITY`] magnitude.
pub fn gravity_for(event: OrientationEvent) -> Vec2 {
    match event.alpha {
        Some(alpha) => {
            let rad = (alpha + PHASE_OFFSET_DEG).to_radians();
            Vec2::new(GRAVITY * rad.cos(), GRAVITY * rad.sin())
        }
        None => default_gravity(),
    }
}

/// Apply an orientation sample to the world. Takes effect at the next step.
pub fn apply(world: &mut World, event: OrientationEvent) {
    world.set_gravity(gravity_for(event));
}
