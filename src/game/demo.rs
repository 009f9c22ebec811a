//! Per-frame orchestration
//!
//! A frame is: [`Demo::advance`] (drain the accumulator into physics steps),
//! [`Demo::scene`] (project bodies to sprites), render, then
//! [`Demo::respond`] (collision sound, nudge, music toggle).

use glam::Vec2;

use super::clock::{SimulationClock, StepControl};
use super::cues::{CollisionAudio, SoundCueCycle};
use super::debug::{DebugMode, DebugOverlay, Snapshot};
use super::music::MusicToggle;
use super::nudge::NudgeController;
use crate::audio::{MusicStatus, MusicStream, SoundEffect};
use crate::error::ConfigError;
use crate::platform::input::{InputState, Key};
use crate::settings::Settings;
use crate::sim::{Arena, PhysicsWorld, PuckShape, SceneGeometry};

/// What happened while draining the accumulator
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdvanceReport {
    /// Physics steps consumed from the accumulator
    pub steps: u32,
    /// Overlay is holding the simulation
    pub paused: bool,
    /// Snapshots printed by the overlay this frame
    pub snapshots: Vec<Snapshot>,
}

/// Reactions fired after rendering
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameEvents {
    /// Index of the collision cue played
    pub cue: Option<usize>,
    /// Velocity change applied to the ball
    pub nudge: Vec2,
    /// New music status if it was toggled
    pub music: Option<MusicStatus>,
}

/// The bouncing-ball demo, generic over its collaborators
pub struct Demo<W, S, M> {
    world: W,
    arena: Arena,
    clock: SimulationClock,
    overlay: DebugOverlay,
    collision_audio: CollisionAudio<S>,
    nudge: NudgeController,
    music: MusicToggle<M>,
    pixels_per_meter: Vec2,
    slow_motion_step: f32,
    round_puck_key: Key,
    music_autoplay: bool,
}

impl<W: PhysicsWorld, S: SoundEffect, M: MusicStream> Demo<W, S, M> {
    /// Build the arena in `world` and wire up the controllers
    pub fn new(
        settings: &Settings,
        mut world: W,
        cues: Vec<S>,
        music: M,
        now: f64,
    ) -> Result<Self, ConfigError> {
        settings.validate()?;
        let clock = SimulationClock::new(settings.world.fixed_step, now)?;
        let cycle = SoundCueCycle::new(cues)?;
        let arena = Arena::build(&mut world, &settings.world, &settings.entities);
        let controls = &settings.controls;

        Ok(Self {
            world,
            arena,
            clock,
            overlay: DebugOverlay::new(controls.pause, controls.slow_motion),
            collision_audio: CollisionAudio::new(cycle),
            nudge: NudgeController::new(settings.entities.nudge_amount, controls),
            music: MusicToggle::new(music, controls.music_toggle),
            pixels_per_meter: settings.pixels_per_meter(),
            slow_motion_step: settings.slow_motion_step(),
            round_puck_key: controls.round_puck,
            music_autoplay: settings.audio.music_autoplay,
        })
    }

    /// Call once right before the first frame
    pub fn start(&mut self, now: f64) {
        self.clock.resync(now);
        if self.music_autoplay {
            self.music.start();
        }
    }

    /// Feed wall-clock time into the simulation
    pub fn advance(&mut self, now: f64, input: &impl InputState) -> AdvanceReport {
        if self.overlay.is_paused() {
            if self.overlay.pause_held(input) {
                self.clock.resync(now);
                return AdvanceReport {
                    paused: true,
                    ..Default::default()
                };
            }
            self.overlay.resume();
            self.clock.resync(now);
            log::info!("Resumed");
        }

        let Self {
            world,
            arena,
            clock,
            overlay,
            slow_motion_step,
            ..
        } = self;
        let fixed_step = clock.fixed_step();
        let ball = arena.ball;
        let mut snapshots = Vec::new();

        let delta = clock.sample(now);
        let steps = clock.advance(delta, || match overlay.evaluate(input) {
            DebugMode::Paused => {
                let snapshot = snapshot_of(world, ball);
                log::info!("Paused {snapshot}");
                snapshots.push(snapshot);
                StepControl::Halt
            }
            DebugMode::SlowMotion => {
                world.step(*slow_motion_step);
                let snapshot = snapshot_of(world, ball);
                log::info!("{snapshot}");
                snapshots.push(snapshot);
                StepControl::Continue
            }
            DebugMode::Normal => {
                world.step(fixed_step);
                StepControl::Continue
            }
        });

        AdvanceReport {
            steps,
            paused: self.overlay.is_paused(),
            snapshots,
        }
    }

    /// Sprites for the current physics state
    pub fn scene(&self, input: &impl InputState) -> SceneGeometry {
        let puck = if input.is_key_held(self.round_puck_key) {
            PuckShape::Round
        } else {
            PuckShape::Square
        };
        self.arena.geometry(&self.world, self.pixels_per_meter, puck)
    }

    /// Post-render reactions: contact sound, then nudge, then music toggle
    pub fn respond(&mut self, input: &impl InputState) -> FrameEvents {
        let in_contact = self.world.body(self.arena.ball).contact_count > 0;
        let cue = self.collision_audio.update(in_contact);
        let nudge = self.nudge.apply(input, &mut self.world, self.arena.ball);
        let music = self.music.update(input);
        FrameEvents { cue, nudge, music }
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn ball_snapshot(&self) -> Snapshot {
        snapshot_of(&self.world, self.arena.ball)
    }

    pub fn debug_mode(&self) -> DebugMode {
        self.overlay.mode()
    }

    pub fn accumulated_time(&self) -> f32 {
        self.clock.accumulated_time()
    }

    pub fn music_status(&self) -> MusicStatus {
        self.music.status()
    }

    pub fn cues(&self) -> &[S] {
        self.collision_audio.cycle().cues()
    }

    pub fn music(&self) -> &M {
        self.music.stream()
    }
}

fn snapshot_of<W: PhysicsWorld>(world: &W, ball: crate::sim::BodyHandle) -> Snapshot {
    let body = world.body(ball);
    Snapshot {
        position: body.position,
        velocity: body.linear_velocity,
    }
}
