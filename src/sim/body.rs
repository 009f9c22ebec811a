//! Rigid bodies and their fixtures

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;

/// Opaque reference to a body owned by a physics world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyHandle(pub(crate) usize);

/// Whether the solver moves the body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyType {
    Dynamic,
    Static,
}

/// Collision shape of a body's single fixture, in body-local coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Circle { radius: f32 },
    /// Axis-aligned rectangle centred on the body
    Rect { half_extents: Vec2 },
}

impl Shape {
    /// Rectangle from full width and height
    pub fn rectangle(width: f32, height: f32) -> Self {
        Shape::Rect {
            half_extents: Vec2::new(width * 0.5, height * 0.5),
        }
    }

    /// Circle radius; zero for polygons
    pub fn radius(&self) -> f32 {
        match self {
            Shape::Circle { radius } => *radius,
            Shape::Rect { .. } => 0.0,
        }
    }

    /// Polygon vertices, counter-clockwise from the bottom-left corner
    pub fn vertices(&self) -> Option<[Vec2; 4]> {
        match self {
            Shape::Circle { .. } => None,
            Shape::Rect { half_extents: h } => Some([
                Vec2::new(-h.x, -h.y),
                Vec2::new(h.x, -h.y),
                Vec2::new(h.x, h.y),
                Vec2::new(-h.x, h.y),
            ]),
        }
    }
}

/// Everything needed to create a body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyDef {
    pub shape: Shape,
    pub density: f32,
    pub position: Vec2,
    pub body_type: BodyType,
    pub linear_velocity: Vec2,
    pub restitution: f32,
    pub friction: f32,
    pub linear_damping: f32,
}

impl BodyDef {
    pub fn new(shape: Shape, density: f32, position: Vec2, body_type: BodyType) -> Self {
        Self {
            shape,
            density,
            position,
            body_type,
            linear_velocity: Vec2::ZERO,
            restitution: 0.0,
            friction: 0.2,
            linear_damping: 0.0,
        }
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.linear_velocity = velocity;
        self
    }

    pub fn with_material(mut self, restitution: f32, friction: f32) -> Self {
        self.restitution = restitution;
        self.friction = friction;
        self
    }

    pub fn with_damping(mut self, linear_damping: f32) -> Self {
        self.linear_damping = linear_damping;
        self
    }
}

/// A body as stored in the world
#[derive(Debug, Clone, PartialEq)]
pub struct RigidBody {
    pub shape: Shape,
    pub body_type: BodyType,
    pub position: Vec2,
    pub linear_velocity: Vec2,
    /// Unused by the solver: dynamic bodies only ever meet static ones
    pub density: f32,
    pub restitution: f32,
    pub friction: f32,
    pub linear_damping: f32,
    /// Live contacts (0 = touching nothing). A contact begins within the
    /// contact skin and ends once the bodies have clearly separated
    pub contact_count: u32,
}

impl RigidBody {
    pub fn from_def(def: &BodyDef) -> Self {
        Self {
            shape: def.shape,
            body_type: def.body_type,
            position: def.position,
            linear_velocity: def.linear_velocity,
            density: def.density,
            restitution: def.restitution,
            friction: def.friction,
            linear_damping: def.linear_damping,
            contact_count: 0,
        }
    }

    pub fn is_dynamic(&self) -> bool {
        self.body_type == BodyType::Dynamic
    }

    /// World-space bounds
    pub fn aabb(&self) -> Aabb {
        let half = match self.shape {
            Shape::Circle { radius } => Vec2::splat(radius),
            Shape::Rect { half_extents } => half_extents,
        };
        Aabb::from_center(self.position, half)
    }
}
