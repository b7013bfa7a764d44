//! # Puddle - a tilt-steered particle fluid toy
//!
//! A 2D fluid made of a few thousand particles sloshing around a walled
//! viewport, rendered as instanced sprites. Gravity follows the device tilt
//! (or the arrow keys), and a dynamic ball can be grabbed and flung with the
//! pointer.
//!
//! ## Quick Start
//!
//! ```ignore
//! fn main() {
//!     if let Err(e) = puddle::app::run() {
//!         eprintln!("Error: {}", e);
//!     }
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Units
//!
//! The simulation works in meters; the screen works in pixels. One meter is
//! [`config::METER`] pixels, and the y axis points down in both spaces, so a
//! positive-y gravity pulls toward the bottom of the window.
//!
//! ### The frame lockstep
//!
//! Every frame the [`clock::SimulationClock`] advances the [`world::World`]
//! by exactly one fixed timestep and then syncs the [`mirror::RenderMirror`],
//! a sprite pool holding one instance per particle, index for index. The
//! renderer only ever sees fully-stepped states.
//!
//! ### Scene
//!
//! [`scene`] builds the static wall envelope just outside the viewport
//! edges, seeds the particle group sized by [`config::PerformanceTier`], and
//! spawns the draggable ball. [`picker::pick`] finds the ball under the
//! pointer; [`tilt`] maps orientation angles to the gravity vector.

pub mod app;
pub mod body;
pub mod clock;
pub mod config;
pub mod error;
pub mod input;
pub mod mirror;
pub mod particles;
pub mod picker;
pub mod renderer;
pub mod scene;
mod spatial;
pub mod textures;
pub mod tilt;
pub mod world;

pub use glam::Vec2;

pub use body::{Body, BodyType, Fixture, Shape};
pub use clock::SimulationClock;
pub use error::{AppError, GpuError, SceneError, TextureError};
pub use mirror::{RenderMirror, SpriteInstance};
pub use particles::{ParticleSystem, ParticleSystemDef};
pub use picker::{pick, PickHit};
pub use textures::{FilterMode, TextureConfig};
pub use tilt::OrientationEvent;
pub use world::{BodyHandle, World};
