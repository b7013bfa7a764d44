//! The windowed application: scene setup, the frame loop, and the glue
//! between input gestures and the simulation.
//!
//! Each redraw advances the clock by exactly one fixed timestep and draws the
//! mirrored sprite pool, so rendering and physics stay in lockstep. Arrow
//! keys stand in for a device-orientation sensor; the left mouse button
//! drags the ball.

use std::sync::Arc;

use glam::Vec2;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::clock::SimulationClock;
use crate::config::{PerformanceTier, DRAG_BALL_SIZE, METER, PARTICLE_SIZE};
use crate::error::AppError;
use crate::input::{Input, Key, MouseButton};
use crate::mirror::{RenderMirror, SpriteInstance};
use crate::picker;
use crate::renderer::SpriteRenderer;
use crate::scene;
use crate::textures::TextureConfig;
use crate::tilt::{self, OrientationEvent};
use crate::world::{BodyHandle, World};

const WINDOW_WIDTH: f32 = 800.0;
const WINDOW_HEIGHT: f32 = 600.0;

/// Convert a physical-pixel cursor position to world meters. Cursor events
/// arrive in physical pixels while the scene is laid out in logical pixels,
/// so the display scale factor divides out first.
fn cursor_to_world(cursor_px: Vec2, scale_factor: f32) -> Vec2 {
    cursor_px / scale_factor / METER
}

/// Synthetic orientation angles for the arrow keys, chosen so that after the
/// phase offset gravity points right, down, left, and up respectively.
/// Space clears the sensor, restoring the straight-down fallback.
fn key_orientation(key: Key) -> Option<OrientationEvent> {
    match key {
        Key::Right => Some(OrientationEvent { alpha: Some(-45.0) }),
        Key::Down => Some(OrientationEvent { alpha: Some(45.0) }),
        Key::Left => Some(OrientationEvent { alpha: Some(135.0) }),
        Key::Up => Some(OrientationEvent { alpha: Some(225.0) }),
        Key::Space => Some(OrientationEvent { alpha: None }),
        _ => None,
    }
}

/// Create the event loop and drive the application until the window closes.
pub fn run() -> Result<(), AppError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new();
    event_loop.run_app(&mut app)?;

    match app.init_error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

struct App {
    window: Option<Arc<Window>>,
    renderer: Option<SpriteRenderer>,
    world: World,
    mirror: RenderMirror,
    clock: SimulationClock,
    input: Input,
    ball: Option<BodyHandle>,
    dragging: Option<BodyHandle>,
    /// Physical pixels per logical pixel of the current display.
    scale_factor: f32,
    /// Scratch buffer rebuilt each frame: particle pool plus the ball sprite.
    frame_instances: Vec<SpriteInstance>,
    /// Startup failure stashed here because `resumed` cannot return errors.
    init_error: Option<AppError>,
}

impl App {
    fn new() -> Self {
        Self {
            window: None,
            renderer: None,
            world: scene::default_world(),
            mirror: RenderMirror::new(PARTICLE_SIZE * 2.0),
            clock: SimulationClock::new(),
            input: Input::new(),
            ball: None,
            dragging: None,
            scale_factor: 1.0,
            frame_instances: Vec::new(),
            init_error: None,
        }
    }

    fn build_scene(&mut self) -> Result<(), AppError> {
        scene::build_walls(&mut self.world, WINDOW_WIDTH, WINDOW_HEIGHT)?;
        scene::seed_particles(
            &mut self.world,
            WINDOW_WIDTH,
            WINDOW_HEIGHT,
            PerformanceTier::detect(),
        )?;
        self.mirror
            .allocate(self.world.particle_system().map_or(0, |ps| ps.count()));
        self.ball = Some(scene::spawn_drag_ball(
            &mut self.world,
            Vec2::new(WINDOW_WIDTH / 2.0, DRAG_BALL_SIZE * 1.5),
        ));
        Ok(())
    }

    /// Translate this frame's input into simulation commands.
    fn handle_input(&mut self) {
        for key in [Key::Right, Key::Down, Key::Left, Key::Up, Key::Space] {
            if self.input.key_pressed(key) {
                if let Some(event) = key_orientation(key) {
                    tilt::apply(&mut self.world, event);
                }
            }
        }
        if self.input.key_pressed(Key::Escape) {
            self.clock.stop();
        }

        let cursor = cursor_to_world(self.input.cursor_position(), self.scale_factor);
        if self.input.mouse_pressed(MouseButton::Left) {
            self.dragging = picker::pick(&self.world, cursor).map(|hit| hit.body);
        }
        if let Some(handle) = self.dragging {
            if self.input.mouse_held(MouseButton::Left) {
                self.world.body_mut(handle).set_drag_target(cursor);
            }
        }
        if self.input.mouse_released(MouseButton::Left) {
            if let Some(handle) = self.dragging.take() {
                self.world.body_mut(handle).clear_drag_target();
            }
        }
    }

    /// Gather everything visible this frame into one instance list.
    fn collect_instances(&mut self) {
        self.frame_instances.clear();
        self.frame_instances.extend_from_slice(self.mirror.instances());
        if let Some(ball) = self.ball {
            let pos = self.world.body(ball).position * METER;
            self.frame_instances
                .push(SpriteInstance::new(pos.x, pos.y, DRAG_BALL_SIZE * 2.0));
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title("puddle")
            .with_inner_size(winit::dpi::LogicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT))
            .with_resizable(false);

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                self.init_error = Some(AppError::Window(e));
                event_loop.exit();
                return;
            }
        };
        self.window = Some(window.clone());
        self.scale_factor = window.scale_factor() as f32;

        let sprite = TextureConfig::circle(64);
        match pollster::block_on(SpriteRenderer::new(window, &sprite)) {
            Ok(renderer) => self.renderer = Some(renderer),
            Err(e) => {
                self.init_error = Some(AppError::Gpu(e));
                event_loop.exit();
                return;
            }
        }

        if let Err(e) = self.build_scene() {
            self.init_error = Some(e);
            event_loop.exit();
            return;
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        self.input.handle_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                self.clock.stop();
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(physical_size);
                }
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.scale_factor = scale_factor as f32;
                if let Some(renderer) = &mut self.renderer {
                    renderer.set_scale_factor(scale_factor);
                }
            }
            WindowEvent::RedrawRequested => {
                if !self.clock.is_running() {
                    event_loop.exit();
                    return;
                }

                self.handle_input();
                self.input.begin_frame();

                self.clock.tick(&mut self.world, &mut self.mirror);
                self.collect_instances();

                if let Some(renderer) = &mut self.renderer {
                    match renderer.render(&self.frame_instances) {
                        Ok(_) => {}
                        Err(wgpu::SurfaceError::Lost) => {
                            renderer.resize(winit::dpi::PhysicalSize {
                                width: renderer.config.width,
                                height: renderer.config.height,
                            })
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => event_loop.exit(),
                        Err(e) => eprintln!("Render error: {:?}", e),
                    }
                }

                if self.clock.is_running() {
                    if let Some(window) = &self.window {
                        window.request_redraw();
                    }
                } else {
                    event_loop.exit();
                }
            }
            _ => {}
        }
    }
}
