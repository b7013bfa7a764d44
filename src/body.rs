//! Rigid bodies and collision fixtures.
//!
//! A [`Body`] is either a static boundary (walls) or a dynamic object (the
//! drag ball). Each body carries one or more [`Fixture`]s: a shape plus a
//! density, used both for collision resolution and for point-containment
//! queries.

use glam::Vec2;

/// Body kind. Static bodies have infinite effective mass and never move;
/// dynamic bodies are advanced by the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyType {
    Static,
    Dynamic,
}

/// Collision shape in body-local coordinates.
#[derive(Debug, Clone, Copy)]
pub enum Shape {
    /// Axis-aligned box with the given half extents.
    Box { half: Vec2 },
    /// Circle with the given radius.
    Circle { radius: f32 },
}

/// Shape + material property attached to exactly one body.
#[derive(Debug, Clone, Copy)]
pub struct Fixture {
    pub shape: Shape,
    /// Offset of the shape center from the body origin, in meters.
    pub offset: Vec2,
    /// Density in mass per area. Zero for massless, purely collidable walls.
    pub density: f32,
}

impl Fixture {
    pub fn new(shape: Shape, offset: Vec2, density: f32) -> Self {
        Self { shape, offset, density }
    }

    /// Strict point-in-shape containment test against the fixture placed at
    /// `body_position`. Boundary points do not count as inside.
    pub fn test_point(&self, body_position: Vec2, point: Vec2) -> bool {
        let center = body_position + self.offset;
        match self.shape {
            Shape::Box { half } => {
                let d = point - center;
                d.x.abs() < half.x && d.y.abs() < half.y
            }
            Shape::Circle { radius } => point.distance_squared(center) < radius * radius,
        }
    }

    /// Push a point out of this fixture, treating the point as a disc of
    /// radius `inflate`. Returns the corrected position and the outward
    /// contact normal, or `None` when there is no overlap.
    pub fn resolve_point(
        &self,
        body_position: Vec2,
        point: Vec2,
        inflate: f32,
    ) -> Option<(Vec2, Vec2)> {
        let center = body_position + self.offset;
        match self.shape {
            Shape::Box { half } => resolve_point_box(center, half + Vec2::splat(inflate), point),
            Shape::Circle { radius } => resolve_point_circle(center, radius + inflate, point),
        }
    }
}

fn resolve_point_box(center: Vec2, half: Vec2, point: Vec2) -> Option<(Vec2, Vec2)> {
    let d = point - center;
    let pen_x = half.x - d.x.abs();
    let pen_y = half.y - d.y.abs();
    if pen_x <= 0.0 || pen_y <= 0.0 {
        return None;
    }
    // Push out along the axis of least penetration.
    if pen_x < pen_y {
        let normal = Vec2::new(d.x.signum(), 0.0);
        Some((Vec2::new(center.x + half.x * normal.x, point.y), normal))
    } else {
        let normal = Vec2::new(0.0, d.y.signum());
        Some((Vec2::new(point.x, center.y + half.y * normal.y), normal))
    }
}

fn resolve_point_circle(center: Vec2, radius: f32, point: Vec2) -> Option<(Vec2, Vec2)> {
    let d = point - center;
    let dist_sq = d.length_squared();
    if dist_sq >= radius * radius {
        return None;
    }
    let normal = if dist_sq > 1e-12 {
        d / dist_sq.sqrt()
    } else {
        Vec2::Y
    };
    Some((center + normal * radius, normal))
}

/// Push a circle of the given radius out of an axis-aligned box. Returns the
/// corrected circle center and the outward contact normal.
pub fn resolve_circle_box(
    circle_center: Vec2,
    circle_radius: f32,
    box_center: Vec2,
    box_half: Vec2,
) -> Option<(Vec2, Vec2)> {
    let closest = circle_center.clamp(box_center - box_half, box_center + box_half);
    if closest == circle_center {
        // Center inside the box: fall back to the inflated-box push-out.
        return resolve_point_box(box_center, box_half + Vec2::splat(circle_radius), circle_center);
    }
    let d = circle_center - closest;
    let dist_sq = d.length_squared();
    if dist_sq >= circle_radius * circle_radius {
        return None;
    }
    let dist = dist_sq.sqrt();
    let normal = d / dist;
    Some((closest + normal * circle_radius, normal))
}

/// A rigid boundary or dynamic object living in the world.
#[derive(Debug, Clone)]
pub struct Body {
    kind: BodyType,
    /// Body origin in meters.
    pub position: Vec2,
    /// Linear velocity in meters per second. Always zero for static bodies.
    pub velocity: Vec2,
    fixtures: Vec<Fixture>,
    /// When set, the body follows this point instead of free-falling.
    drag_target: Option<Vec2>,
}

impl Body {
    pub fn new(kind: BodyType, position: Vec2) -> Self {
        Self {
            kind,
            position,
            velocity: Vec2::ZERO,
            fixtures: Vec::new(),
            drag_target: None,
        }
    }

    #[inline]
    pub fn kind(&self) -> BodyType {
        self.kind
    }

    #[inline]
    pub fn is_dynamic(&self) -> bool {
        self.kind == BodyType::Dynamic
    }

    pub fn add_fixture(&mut self, fixture: Fixture) {
        self.fixtures.push(fixture);
    }

    #[inline]
    pub fn fixtures(&self) -> &[Fixture] {
        &self.fixtures
    }

    /// Start or update a drag gesture: the body will chase `target` on the
    /// next steps instead of integrating gravity.
    pub fn set_drag_target(&mut self, target: Vec2) {
        self.drag_target = Some(target);
    }

    /// End the drag gesture. The body keeps its current velocity, so a fast
    /// release throws it.
    pub fn clear_drag_target(&mut self) {
        self.drag_target = None;
    }

    #[inline]
    pub fn is_dragged(&self) -> bool {
        self.drag_target.is_some()
    }

    /// Advance the body by one timestep. Static bodies never move.
    pub fn integrate(&mut self, gravity: Vec2, dt: f32) {
        if self.kind == BodyType::Static {
            return;
        }
        match self.drag_target {
            Some(target) => {
                // Chase the pointer; the velocity carries over on release.
                self.velocity = (target - self.position) / dt;
                let speed = self.velocity.length();
                // Cap keeps one step's travel below the wall-plus-ball
                // overlap span, so a fast fling cannot tunnel the envelope.
                const MAX_DRAG_SPEED: f32 = 30.0;
                if speed > MAX_DRAG_SPEED {
                    self.velocity *= MAX_DRAG_SPEED / speed;
                }
            }
            None => {
                self.velocity += gravity * dt;
            }
        }
        self.position += self.velocity * dt;
    }
}
