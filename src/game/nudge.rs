//! Arrow-key velocity nudges

use glam::Vec2;

use super::edge::EdgeTrigger;
use crate::platform::input::{InputState, Key};
use crate::settings::ControlConfig;
use crate::sim::{BodyHandle, PhysicsWorld};

/// Adds a small velocity change for every held arrow key, every frame
#[derive(Debug, Clone)]
pub struct NudgeController {
    amount: f32,
    up: Key,
    down: Key,
    left: Key,
    right: Key,
    engaged: EdgeTrigger,
}

impl NudgeController {
    pub fn new(amount: f32, controls: &ControlConfig) -> Self {
        Self {
            amount,
            up: controls.nudge_up,
            down: controls.nudge_down,
            left: controls.nudge_left,
            right: controls.nudge_right,
            engaged: EdgeTrigger::new(),
        }
    }

    /// Combined velocity change for the held keys
    pub fn nudge_vector(&self, input: &impl InputState) -> Vec2 {
        let mut delta = Vec2::ZERO;
        if input.is_key_held(self.up) {
            delta.y += self.amount;
        }
        if input.is_key_held(self.down) {
            delta.y -= self.amount;
        }
        if input.is_key_held(self.left) {
            delta.x -= self.amount;
        }
        if input.is_key_held(self.right) {
            delta.x += self.amount;
        }
        delta
    }

    /// Apply this frame's nudge to `ball`; returns the velocity change
    pub fn apply<W: PhysicsWorld>(
        &mut self,
        input: &impl InputState,
        world: &mut W,
        ball: BodyHandle,
    ) -> Vec2 {
        let delta = self.nudge_vector(input);
        let nudging = delta != Vec2::ZERO;
        if self.engaged.update(nudging) {
            log::debug!("Nudging ball by {delta} per frame");
        }
        if nudging {
            let velocity = world.body(ball).linear_velocity + delta;
            world.set_linear_velocity(ball, velocity);
        }
        delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::input::KeyboardState;
    use crate::sim::{BodyDef, BodyType, Shape, World};

    fn setup() -> (NudgeController, World, BodyHandle) {
        let controller = NudgeController::new(0.01, &ControlConfig::default());
        let mut world = World::new(Vec2::ZERO);
        let ball = world.create_body(
            BodyDef::new(Shape::Circle { radius: 1.0 }, 1.0, Vec2::ZERO, BodyType::Dynamic)
                .with_velocity(Vec2::new(80.0, 0.0)),
        );
        (controller, world, ball)
    }

    #[test]
    fn test_no_keys_no_change() {
        let (mut controller, mut world, ball) = setup();
        let delta = controller.apply(&KeyboardState::new(), &mut world, ball);
        assert_eq!(delta, Vec2::ZERO);
        assert_eq!(world.body(ball).linear_velocity, Vec2::new(80.0, 0.0));
    }

    #[test]
    fn test_up_and_right_compose() {
        let (mut controller, mut world, ball) = setup();
        let mut keys = KeyboardState::new();
        keys.press(Key::Up);
        keys.press(Key::Right);
        let delta = controller.apply(&keys, &mut world, ball);
        assert_eq!(delta, Vec2::new(0.01, 0.01));
        let velocity = world.body(ball).linear_velocity;
        assert!((velocity - Vec2::new(80.01, 0.01)).abs().max_element() < 1e-5);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let (controller, _, _) = setup();
        let mut keys = KeyboardState::new();
        keys.press(Key::Left);
        keys.press(Key::Right);
        keys.press(Key::Down);
        assert_eq!(controller.nudge_vector(&keys), Vec2::new(0.0, -0.01));
    }

    #[test]
    fn test_held_key_applies_every_frame() {
        let (mut controller, mut world, ball) = setup();
        let mut keys = KeyboardState::new();
        keys.press(Key::Down);
        for _ in 0..3 {
            controller.apply(&keys, &mut world, ball);
        }
        assert!((world.body(ball).linear_velocity.y + 0.03).abs() < 1e-6);
    }
}
