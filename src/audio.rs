//! Audio over rodio
//!
//! Procedurally generated sounds - no external files needed!
//! Two short collision cues and a looping background track are rendered
//! into sample buffers once at startup and replayed from memory.

use rodio::buffer::SamplesBuffer;
use rodio::{OutputStream, OutputStreamHandle, Sink, Source};

use crate::error::PhysualError;
use crate::settings::AudioConfig;

/// Output sample rate (Hz)
pub const SAMPLE_RATE: u32 = 44_100;

/// A short sound that can be fired and forgotten
pub trait SoundEffect {
    fn play(&mut self);
}

/// Whether the background track is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MusicStatus {
    #[default]
    Stopped,
    Playing,
}

/// A long-running, restartable stream
pub trait MusicStream {
    fn play(&mut self);
    fn stop(&mut self);
    fn status(&self) -> MusicStatus;
}

/// Collision cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CueKind {
    /// Lower, longer tone
    Beep,
    /// Higher, clipped tone
    Bip,
}

impl CueKind {
    /// Cue list in play order
    pub const ALL: [CueKind; 2] = [CueKind::Beep, CueKind::Bip];

    fn frequency(self) -> f32 {
        match self {
            CueKind::Beep => 660.0,
            CueKind::Bip => 990.0,
        }
    }

    fn duration(self) -> f32 {
        match self {
            CueKind::Beep => 0.12,
            CueKind::Bip => 0.06,
        }
    }
}

/// Oscillator shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Triangle,
}

impl Waveform {
    /// Value at `phase` cycles, in [-1, 1]
    fn sample(self, phase: f32) -> f32 {
        let p = phase.fract();
        match self {
            Waveform::Sine => (std::f32::consts::TAU * p).sin(),
            Waveform::Square => {
                if p < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Triangle => 1.0 - 4.0 * (p - 0.5).abs(),
        }
    }
}

/// Render a tone with a short attack and exponential decay
fn tone(waveform: Waveform, frequency: f32, duration: f32, decay: f32, gain: f32) -> Vec<f32> {
    let count = (SAMPLE_RATE as f32 * duration) as usize;
    let attack = 0.004;
    (0..count)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE as f32;
            let envelope = if t < attack { t / attack } else { (-(t - attack) * decay).exp() };
            waveform.sample(frequency * t) * envelope * gain
        })
        .collect()
}

/// Samples for a collision cue
pub fn render_cue(kind: CueKind) -> Vec<f32> {
    tone(Waveform::Square, kind.frequency(), kind.duration(), 30.0, 0.25)
}

/// Semitone offset to frequency, from A2
fn note(semitones: i32) -> f32 {
    110.0 * 2f32.powf(semitones as f32 / 12.0)
}

/// Two bars of a funky bass line with an arpeggio on top, 112 BPM
pub fn render_track() -> Vec<f32> {
    const BPM: f32 = 112.0;
    const BASS: [i32; 16] = [0, 0, 12, 0, 3, 0, 5, 7, 0, 0, 12, 10, 7, 5, 3, 2];
    const LEAD: [i32; 8] = [24, 27, 31, 34, 31, 27, 29, 26];

    let sixteenth = 60.0 / BPM / 4.0;
    let step_len = (SAMPLE_RATE as f32 * sixteenth) as usize;
    let mut mix = vec![0.0f32; step_len * BASS.len() * 2];

    for bar in 0..2 {
        for (i, semis) in BASS.iter().enumerate() {
            let start = (bar * BASS.len() + i) * step_len;
            let bass = tone(Waveform::Triangle, note(*semis), sixteenth, 9.0, 0.45);
            for (j, s) in bass.into_iter().enumerate() {
                if let Some(slot) = mix.get_mut(start + j) {
                    *slot += s;
                }
            }
        }
        for (i, semis) in LEAD.iter().enumerate() {
            let start = (bar * BASS.len() + i * 2) * step_len;
            let lead = tone(Waveform::Sine, note(*semis), sixteenth * 2.0, 6.0, 0.2);
            for (j, s) in lead.into_iter().enumerate() {
                if let Some(slot) = mix.get_mut(start + j) {
                    *slot += s;
                }
            }
        }
    }

    for s in &mut mix {
        *s = s.clamp(-1.0, 1.0);
    }
    mix
}

/// Open audio device
pub struct AudioSystem {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    sfx_volume: f32,
    music_volume: f32,
}

impl AudioSystem {
    /// Open the default output device
    pub fn new(config: &AudioConfig) -> Result<Self, PhysualError> {
        let (stream, handle) = OutputStream::try_default()?;
        log::info!("Audio output opened at {SAMPLE_RATE} Hz");
        Ok(Self {
            _stream: stream,
            handle,
            sfx_volume: config.sfx_volume.clamp(0.0, 1.0),
            music_volume: config.music_volume.clamp(0.0, 1.0),
        })
    }

    /// The collision cues, in play order
    pub fn cues(&self) -> Vec<SampleCue> {
        CueKind::ALL
            .into_iter()
            .map(|kind| SampleCue::new(self.handle.clone(), kind, self.sfx_volume))
            .collect()
    }

    /// The background track, not yet playing
    pub fn music(&self) -> SynthMusic {
        SynthMusic::new(self.handle.clone(), self.music_volume)
    }
}

/// Pre-rendered cue played on the shared output
pub struct SampleCue {
    handle: OutputStreamHandle,
    kind: CueKind,
    volume: f32,
    samples: Vec<f32>,
}

impl SampleCue {
    pub fn new(handle: OutputStreamHandle, kind: CueKind, volume: f32) -> Self {
        Self {
            handle,
            kind,
            volume,
            samples: render_cue(kind),
        }
    }

    pub fn kind(&self) -> CueKind {
        self.kind
    }
}

impl SoundEffect for SampleCue {
    fn play(&mut self) {
        let source = SamplesBuffer::new(1, SAMPLE_RATE, self.samples.clone()).amplify(self.volume);
        if let Err(e) = self.handle.play_raw(source.convert_samples()) {
            log::warn!("Failed to play {:?} cue: {e}", self.kind);
        }
    }
}

/// Looping background track
///
/// rodio cannot rewind a stopped sink, so each `play` builds a new one.
pub struct SynthMusic {
    handle: OutputStreamHandle,
    volume: f32,
    track: Vec<f32>,
    sink: Option<Sink>,
}

impl SynthMusic {
    pub fn new(handle: OutputStreamHandle, volume: f32) -> Self {
        Self {
            handle,
            volume,
            track: render_track(),
            sink: None,
        }
    }
}

impl MusicStream for SynthMusic {
    fn play(&mut self) {
        if self.sink.is_some() {
            return;
        }
        match Sink::try_new(&self.handle) {
            Ok(sink) => {
                sink.set_volume(self.volume);
                let track = SamplesBuffer::new(1, SAMPLE_RATE, self.track.clone());
                sink.append(track.repeat_infinite());
                sink.play();
                self.sink = Some(sink);
            }
            Err(e) => log::warn!("Failed to start music: {e}"),
        }
    }

    fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
    }

    fn status(&self) -> MusicStatus {
        if self.sink.is_some() {
            MusicStatus::Playing
        } else {
            MusicStatus::Stopped
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cues_are_audible_and_bounded() {
        for kind in CueKind::ALL {
            let samples = render_cue(kind);
            assert_eq!(samples.len(), (SAMPLE_RATE as f32 * kind.duration()) as usize);
            assert!(samples.iter().all(|s| (-1.0..=1.0).contains(s)));
            assert!(samples.iter().any(|s| s.abs() > 0.1));
        }
    }

    #[test]
    fn test_beep_outlasts_bip() {
        assert!(render_cue(CueKind::Beep).len() > render_cue(CueKind::Bip).len());
    }

    #[test]
    fn test_track_is_two_bars_and_clamped() {
        let track = render_track();
        let step_len = (SAMPLE_RATE as f32 * (60.0 / 112.0 / 4.0)) as usize;
        assert_eq!(track.len(), step_len * 32);
        assert!(track.iter().all(|s| (-1.0..=1.0).contains(s)));
    }

    #[test]
    fn test_waveforms_in_range() {
        for waveform in [Waveform::Sine, Waveform::Square, Waveform::Triangle] {
            for i in 0..100 {
                let v = waveform.sample(i as f32 / 37.0);
                assert!((-1.0..=1.0).contains(&v));
            }
        }
        assert_eq!(Waveform::Triangle.sample(0.5), 1.0);
        assert_eq!(Waveform::Square.sample(0.25), 1.0);
    }

    #[test]
    fn test_note_octaves() {
        assert_eq!(note(0), 110.0);
        assert!((note(12) - 220.0).abs() < 1e-3);
    }

    #[test]
    fn test_music_status_defaults_to_stopped() {
        assert_eq!(MusicStatus::default(), MusicStatus::Stopped);
    }
}
