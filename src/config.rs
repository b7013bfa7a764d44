//! Tuning constants and the coarse performance tier.
//!
//! The simulation works in meters internally; [`METER`] converts between
//! simulation units and screen pixels. All other constants are expressed in
//! pixels or in simulation units as noted.

/// Pixels per simulation-length-unit (meter).
pub const METER: f32 = 100.0;

/// Fixed simulation timestep in seconds (60 steps of simulated time per second).
pub const TIME_STEP: f32 = 1.0 / 60.0;

/// Velocity-resolution iterations per step. More is more accurate but slower.
pub const VELOCITY_ITERATIONS: u32 = 1;

/// Position-resolution iterations per step. More is more accurate but slower.
pub const POSITION_ITERATIONS: u32 = 1;

/// Particle radius in pixels. Also drives the sprite size.
pub const PARTICLE_SIZE: f32 = 4.0;

/// Drag ball radius in pixels.
pub const DRAG_BALL_SIZE: f32 = 50.0;

/// Gravity magnitude in simulation units.
pub const GRAVITY: f32 = 10.0;

/// Full thickness of each wall slab in pixels. Walls sit entirely outside
/// the viewport, touching its edge.
pub const WALL_THICKNESS: f32 = 10.0;

/// Pressure-response coefficient for the particle system. Smaller values
/// allow more compression.
pub const PRESSURE_STRENGTH: f32 = 4.0;

/// Coarse device-capability classification.
///
/// Affects only the particle seed region size: weaker devices get a smaller
/// region and therefore fewer particles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerformanceTier {
    High,
    Low,
}

impl PerformanceTier {
    /// Classify the host platform. Desktop OSes get the high tier,
    /// everything else is assumed to be low-power hardware.
    pub fn detect() -> Self {
        match std::env::consts::OS {
            "windows" | "macos" | "linux" => PerformanceTier::High,
            _ => PerformanceTier::Low,
        }
    }

    /// Seed region size in pixels (full width, full height) for this tier.
    pub fn seed_region(self) -> (f32, f32) {
        match self {
            PerformanceTier::High => (512.0, 768.0),
            PerformanceTier::Low => (256.0, 256.0),
        }
    }
}
