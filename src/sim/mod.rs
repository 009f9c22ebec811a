//! Physics module
//!
//! Rigid bodies, the world that steps them, and the arena built on top:
//! - `body`: body definitions and stored state
//! - `collision`: circle/box overlap, sweeps and bounce response
//! - `world`: the `PhysicsWorld` seam and its solver
//! - `arena`: the ball and wall handles, projected into screen geometry

pub mod arena;
pub mod body;
pub mod collision;
pub mod world;

pub use arena::{Arena, BallSprite, PuckShape, SceneGeometry, SpriteGeometry, WallSide};
pub use body::{BodyDef, BodyHandle, BodyType, RigidBody, Shape};
pub use collision::{Aabb, CollisionResult, SweepHit, reflect_velocity};
pub use world::{CONTACT_SKIN, PhysicsWorld, World};
