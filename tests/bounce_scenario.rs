use glam::Vec2;

use physual::Settings;
use physual::audio::{MusicStatus, MusicStream, SoundEffect};
use physual::game::{Demo, DebugMode};
use physual::platform::{Key, KeyboardState};
use physual::sim::{BodyDef, BodyHandle, PhysicsWorld, RigidBody, World};

const STEP: f64 = 1.0 / 60.0;

#[derive(Debug, Default)]
struct MockCue {
    plays: usize,
}

impl SoundEffect for MockCue {
    fn play(&mut self) {
        self.plays += 1;
    }
}

#[derive(Debug, Default)]
struct MockMusic {
    status: MusicStatus,
    starts: usize,
    stops: usize,
}

impl MusicStream for MockMusic {
    fn play(&mut self) {
        self.status = MusicStatus::Playing;
        self.starts += 1;
    }

    fn stop(&mut self) {
        self.status = MusicStatus::Stopped;
        self.stops += 1;
    }

    fn status(&self) -> MusicStatus {
        self.status
    }
}

/// World that records every step length it is given
#[derive(Debug, Default)]
struct RecordingWorld {
    inner: World,
    steps: Vec<f32>,
}

impl PhysicsWorld for RecordingWorld {
    fn create_body(&mut self, def: BodyDef) -> BodyHandle {
        self.inner.create_body(def)
    }

    fn step(&mut self, dt: f32) {
        self.steps.push(dt);
        self.inner.step(dt);
    }

    fn body(&self, handle: BodyHandle) -> &RigidBody {
        self.inner.body(handle)
    }

    fn set_linear_velocity(&mut self, handle: BodyHandle, velocity: Vec2) {
        self.inner.set_linear_velocity(handle, velocity);
    }
}

type TestDemo = Demo<RecordingWorld, MockCue, MockMusic>;

fn new_demo() -> TestDemo {
    let settings = Settings::default();
    let cues = vec![MockCue::default(), MockCue::default()];
    let mut demo = Demo::new(
        &settings,
        RecordingWorld::default(),
        cues,
        MockMusic::default(),
        0.0,
    )
    .unwrap();
    demo.start(0.0);
    demo
}

/// Run one frame and return the cue played, if any
///
/// Frames are half a step out of phase with the fixed step, so every frame
/// drains exactly one step.
fn run_frame(demo: &mut TestDemo, frame: u32, keys: &KeyboardState) -> Option<usize> {
    demo.advance((frame as f64 + 0.5) * STEP, keys);
    demo.scene(keys);
    demo.respond(keys).cue
}

#[test]
fn test_first_wall_contact_plays_one_cue() {
    let mut demo = new_demo();
    let keys = KeyboardState::new();
    let ball = demo.arena().ball;

    assert_eq!(demo.world().body(ball).position, Vec2::new(3.0, -30.0));
    assert_eq!(demo.world().body(ball).linear_velocity, Vec2::new(80.0, 0.0));

    let mut contact_frame = None;
    for frame in 1..120 {
        let before = demo.world().body(ball).contact_count;
        let cue = run_frame(&mut demo, frame, &keys);
        let after = demo.world().body(ball).contact_count;
        if before == 0 && after > 0 {
            contact_frame = Some(frame);
            assert_eq!(after, 1);
            assert_eq!(cue, Some(0));
            break;
        }
        assert_eq!(cue, None);
    }

    let frame = contact_frame.expect("ball never reached the right wall");
    // 74 m at 80 m/s is a little over 55 steps
    assert!((55..=58).contains(&frame), "contact at frame {frame}");

    let body = demo.world().body(ball);
    assert!(body.linear_velocity.x < 0.0);
    assert!(body.position.x <= 77.0 + 1e-3);
    assert!(body.position.x > 75.0);
    assert_eq!(demo.cues()[0].plays, 1);
    assert_eq!(demo.cues()[1].plays, 0);
}

#[test]
fn test_wall_contacts_cycle_cues() {
    let mut demo = new_demo();
    let keys = KeyboardState::new();

    let played: Vec<usize> = (1..=240)
        .filter_map(|frame| run_frame(&mut demo, frame, &keys))
        .collect();

    // Right, left, right, left: about 55.5 steps between walls
    assert_eq!(played, vec![0, 1, 0, 1]);
    assert_eq!(demo.cues()[0].plays, 2);
    assert_eq!(demo.cues()[1].plays, 2);
}

#[test]
fn test_pause_never_advances_physics() {
    let mut demo = new_demo();
    let mut keys = KeyboardState::new();
    for frame in 1..=10 {
        run_frame(&mut demo, frame, &keys);
    }
    let steps_before = demo.world().steps.len();
    let before = demo.ball_snapshot();

    keys.press(Key::P);
    for frame in 11..=300 {
        run_frame(&mut demo, frame, &keys);
        assert_eq!(demo.debug_mode(), DebugMode::Paused);
    }
    assert_eq!(demo.world().steps.len(), steps_before);
    assert_eq!(demo.ball_snapshot(), before);

    // The hold is not counted: releasing drains at most the time pending
    // when the pause began
    keys.release(Key::P);
    run_frame(&mut demo, 301, &keys);
    assert!(demo.world().steps.len() - steps_before <= 2);
    assert_eq!(demo.debug_mode(), DebugMode::Normal);
}

#[test]
fn test_slow_motion_steps_a_tenth() {
    let mut demo = new_demo();
    let mut keys = KeyboardState::new();
    keys.press(Key::S);
    for frame in 1..=30 {
        run_frame(&mut demo, frame, &keys);
    }

    let steps = &demo.world().steps;
    assert!(!steps.is_empty());
    let slow = (1.0 / 60.0) / 10.0;
    assert!(steps.iter().all(|dt| *dt == slow));
    // The accumulator is unaware of slow motion
    assert!(demo.accumulated_time() < STEP as f32);
}

#[test]
fn test_holding_music_key_toggles_once() {
    let mut demo = new_demo();
    let mut keys = KeyboardState::new();
    assert_eq!(demo.music_status(), MusicStatus::Playing);

    keys.press(Key::M);
    for frame in 1..=45 {
        run_frame(&mut demo, frame, &keys);
    }
    assert_eq!(demo.music_status(), MusicStatus::Stopped);
    assert_eq!(demo.music().starts, 1);
    assert_eq!(demo.music().stops, 1);

    keys.release(Key::M);
    run_frame(&mut demo, 46, &keys);
    keys.press(Key::M);
    run_frame(&mut demo, 47, &keys);
    assert_eq!(demo.music_status(), MusicStatus::Playing);
    assert_eq!(demo.music().starts, 2);
}

#[test]
fn test_up_and_right_nudge_for_one_frame() {
    let mut demo = new_demo();
    let mut keys = KeyboardState::new();
    let ball = demo.arena().ball;
    let before = demo.world().body(ball).linear_velocity;

    keys.press(Key::Up);
    keys.press(Key::Right);
    let events = demo.respond(&keys);

    let nudge = Settings::default().entities.nudge_amount;
    assert_eq!(events.nudge, Vec2::new(nudge, nudge));
    let after = demo.world().body(ball).linear_velocity;
    assert!((after - before - Vec2::new(nudge, nudge)).abs().max_element() < 1e-5);
}

/// Run `seconds` of frames at `fps`; returns (wall bounces, cues played)
///
/// Frames sit a quarter step past the fixed-step grid, so each drains
/// 60 / fps steps.
fn bounces_and_cues(fps: f64, seconds: f64) -> (usize, usize) {
    let mut demo = new_demo();
    let keys = KeyboardState::new();
    let ball = demo.arena().ball;
    let mut bounces = 0;
    let mut cues = 0;
    let mut heading = demo.world().body(ball).linear_velocity.x.signum();

    for frame in 1..=(fps * seconds) as u32 {
        demo.advance((frame as f64 + 0.25) / fps, &keys);
        demo.scene(&keys);
        if demo.respond(&keys).cue.is_some() {
            cues += 1;
        }
        let now_heading = demo.world().body(ball).linear_velocity.x.signum();
        if now_heading != heading {
            bounces += 1;
            heading = now_heading;
        }
    }
    (bounces, cues)
}

#[test]
fn test_one_cue_per_bounce_at_60_fps() {
    let (bounces, cues) = bounces_and_cues(60.0, 10.0);
    assert!(bounces >= 9, "only {bounces} bounces");
    assert_eq!(cues, bounces);
}

#[test]
fn test_one_cue_per_bounce_at_30_fps() {
    let (bounces, cues) = bounces_and_cues(30.0, 10.0);
    assert!(bounces >= 9, "only {bounces} bounces");
    assert_eq!(cues, bounces);
}

#[test]
fn test_one_cue_per_bounce_at_20_fps() {
    let (bounces, cues) = bounces_and_cues(20.0, 10.0);
    assert!(bounces >= 9, "only {bounces} bounces");
    assert_eq!(cues, bounces);
}
