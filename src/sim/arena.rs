//! The arena: one ball, four walls
//!
//! Holds the body handles and projects their physics state into screen
//! geometry. The projection is recomputed every frame and never written
//! back into the world.

use glam::Vec2;

use super::body::{BodyDef, BodyHandle, BodyType, Shape};
use super::world::PhysicsWorld;
use crate::settings::{EntityConfig, WorldConfig};
use crate::world_to_screen;

/// Wall position in the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallSide {
    Right,
    Left,
    Top,
    Bottom,
}

impl WallSide {
    pub const ALL: [WallSide; 4] = [
        WallSide::Right,
        WallSide::Left,
        WallSide::Top,
        WallSide::Bottom,
    ];
}

/// How the ball sprite is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PuckShape {
    Round,
    #[default]
    Square,
}

/// Axis-aligned sprite in screen pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteGeometry {
    /// Top-left corner
    pub position: Vec2,
    pub size: Vec2,
}

/// Ball sprite in screen pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BallSprite {
    /// `position` is the top-left of the bounding box
    Round { position: Vec2, radius: f32 },
    Square(SpriteGeometry),
}

/// Everything drawn in one frame
#[derive(Debug, Clone, PartialEq)]
pub struct SceneGeometry {
    pub walls: [SpriteGeometry; 4],
    pub ball: BallSprite,
}

/// Handles of the arena bodies
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    pub ball: BodyHandle,
    /// In `WallSide::ALL` order
    pub walls: [BodyHandle; 4],
}

impl Arena {
    /// Create the walls and the ball in `world`
    pub fn build<W: PhysicsWorld>(
        world: &mut W,
        layout: &WorldConfig,
        entities: &EntityConfig,
    ) -> Self {
        let walls = WallSide::ALL.map(|side| {
            let (center, size) = wall_placement(side, layout, entities.wall_thickness);
            world.create_body(BodyDef::new(
                Shape::rectangle(size.x, size.y),
                entities.density,
                center,
                BodyType::Static,
            ))
        });

        let ball = world.create_body(
            BodyDef::new(
                Shape::Circle {
                    radius: entities.ball_radius,
                },
                entities.density,
                entities.ball_start_position,
                BodyType::Dynamic,
            )
            .with_velocity(entities.ball_start_velocity)
            .with_material(entities.restitution, entities.friction)
            .with_damping(entities.linear_damping),
        );

        Self { ball, walls }
    }

    pub fn wall(&self, side: WallSide) -> BodyHandle {
        let index = WallSide::ALL
            .iter()
            .position(|s| *s == side)
            .unwrap_or_default();
        self.walls[index]
    }

    /// Project current body state into screen geometry
    pub fn geometry<W: PhysicsWorld>(
        &self,
        world: &W,
        pixels_per_meter: Vec2,
        puck: PuckShape,
    ) -> SceneGeometry {
        SceneGeometry {
            walls: self.walls.map(|handle| box_sprite(world, handle, pixels_per_meter)),
            ball: ball_sprite(world, self.ball, pixels_per_meter, puck),
        }
    }
}

/// Centre and full size of a wall, in world meters (y up, arena below y = 0)
fn wall_placement(side: WallSide, layout: &WorldConfig, thickness: f32) -> (Vec2, Vec2) {
    let half = thickness * 0.5;
    match side {
        WallSide::Right => (
            Vec2::new(layout.width - half, -layout.height * 0.5),
            Vec2::new(thickness, layout.height),
        ),
        WallSide::Left => (
            Vec2::new(half, -layout.height * 0.5),
            Vec2::new(thickness, layout.height),
        ),
        WallSide::Top => (
            Vec2::new(layout.width * 0.5, -half),
            Vec2::new(layout.width, thickness),
        ),
        WallSide::Bottom => (
            Vec2::new(layout.width * 0.5, -(layout.height - half)),
            Vec2::new(layout.width, thickness),
        ),
    }
}

/// Sprite for a box body, sized from its first polygon vertex
fn box_sprite<W: PhysicsWorld>(world: &W, handle: BodyHandle, ppm: Vec2) -> SpriteGeometry {
    let body = world.body(handle);
    let size = body
        .shape
        .vertices()
        .map(|v| v[0].abs() * 2.0)
        .unwrap_or(Vec2::splat(body.shape.radius() * 2.0));
    let top_left = Vec2::new(body.position.x - size.x * 0.5, body.position.y + size.y * 0.5);
    SpriteGeometry {
        position: world_to_screen(top_left, ppm),
        size: size * ppm,
    }
}

/// Sprite for the ball, snapped to whole pixels
fn ball_sprite<W: PhysicsWorld>(
    world: &W,
    handle: BodyHandle,
    ppm: Vec2,
    puck: PuckShape,
) -> BallSprite {
    let body = world.body(handle);
    let radius = body.shape.radius();
    let position = Vec2::new(
        ((body.position.x - radius) * ppm.x).trunc(),
        -((body.position.y + radius) * ppm.y).trunc(),
    );
    match puck {
        PuckShape::Round => BallSprite::Round {
            position,
            radius: radius * ppm.x,
        },
        PuckShape::Square => BallSprite::Square(SpriteGeometry {
            position,
            size: Vec2::new(radius * 2.0 * ppm.x, radius * 2.0 * ppm.y),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::World;

    fn build() -> (World, Arena) {
        let mut world = World::new(Vec2::ZERO);
        let arena = Arena::build(&mut world, &WorldConfig::default(), &EntityConfig::default());
        (world, arena)
    }

    #[test]
    fn test_build_creates_five_bodies() {
        let (world, arena) = build();
        assert_eq!(world.body_count(), 5);
        let ball = world.body(arena.ball);
        assert!(ball.is_dynamic());
        assert_eq!(ball.position, Vec2::new(3.0, -30.0));
        assert_eq!(ball.linear_velocity, Vec2::new(80.0, 0.0));
        for wall in arena.walls {
            assert!(!world.body(wall).is_dynamic());
        }
    }

    #[test]
    fn test_wall_centres() {
        let (world, arena) = build();
        assert_eq!(world.body(arena.wall(WallSide::Right)).position, Vec2::new(79.0, -30.0));
        assert_eq!(world.body(arena.wall(WallSide::Left)).position, Vec2::new(1.0, -30.0));
        assert_eq!(world.body(arena.wall(WallSide::Top)).position, Vec2::new(40.0, -1.0));
        assert_eq!(world.body(arena.wall(WallSide::Bottom)).position, Vec2::new(40.0, -59.0));
    }

    #[test]
    fn test_wall_sprites_frame_the_screen() {
        let (world, arena) = build();
        let scene = arena.geometry(&world, Vec2::splat(20.0), PuckShape::Square);

        // Right wall: 40 px wide, full height, flush with the right edge
        assert_eq!(scene.walls[0].position, Vec2::new(1560.0, 0.0));
        assert_eq!(scene.walls[0].size, Vec2::new(40.0, 1200.0));
        // Bottom wall
        assert_eq!(scene.walls[3].position, Vec2::new(0.0, 1160.0));
        assert_eq!(scene.walls[3].size, Vec2::new(1600.0, 40.0));
    }

    #[test]
    fn test_ball_sprite_square_and_round() {
        let (world, arena) = build();
        let scene = arena.geometry(&world, Vec2::splat(20.0), PuckShape::Square);
        assert_eq!(
            scene.ball,
            BallSprite::Square(SpriteGeometry {
                position: Vec2::new(40.0, 580.0),
                size: Vec2::new(40.0, 40.0),
            })
        );

        let scene = arena.geometry(&world, Vec2::splat(20.0), PuckShape::Round);
        assert_eq!(
            scene.ball,
            BallSprite::Round {
                position: Vec2::new(40.0, 580.0),
                radius: 20.0,
            }
        );
    }

    #[test]
    fn test_ball_sprite_snaps_to_pixels() {
        let (mut world, arena) = build();
        world.step(1.0 / 60.0);
        let scene = arena.geometry(&world, Vec2::splat(20.0), PuckShape::Square);
        let BallSprite::Square(sprite) = scene.ball else {
            panic!("expected square sprite");
        };
        assert_eq!(sprite.position.x, sprite.position.x.trunc());
        assert_eq!(sprite.position.y, sprite.position.y.trunc());
    }
}
