//! Real-time loop
//!
//! Everything that turns wall-clock time and held keys into physics steps
//! and side effects. Nothing here touches the window, the GPU or the audio
//! device directly; those arrive through the `PhysicsWorld`, `InputState`,
//! `SoundEffect` and `MusicStream` traits.

pub mod clock;
pub mod cues;
pub mod debug;
pub mod demo;
pub mod edge;
pub mod music;
pub mod nudge;

pub use clock::{SimulationClock, StepControl};
pub use cues::{CollisionAudio, SoundCueCycle};
pub use debug::{DebugMode, DebugOverlay, Snapshot};
pub use demo::{AdvanceReport, Demo, FrameEvents};
pub use edge::EdgeTrigger;
pub use music::MusicToggle;
pub use nudge::NudgeController;
