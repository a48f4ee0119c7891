//! Oscillator lifecycle and target computation.
//!
//! The engine is a small event-driven state machine. Host front-ends feed it
//! [`ThereminEvent`]s (control-point moves, start/stop presses, the async
//! audio-context resume completing) and apply the [`AudioCommand`]s it emits
//! to a live audio graph. All guarding against missing antennae or a missing
//! oscillator happens here, so the audio layer stays a thin translation.

use glam::Vec3;
use thiserror::Error;

use crate::constants;
use crate::mapping::{CurveError, FalloffCurve};

#[derive(Debug, Error, PartialEq)]
pub enum ParamError {
    #[error(transparent)]
    Curve(#[from] CurveError),
    #[error("ramp time constant must be positive and finite, got {0}")]
    BadRampTau(f32),
}

/// Which control point an update targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hand {
    /// Right hand; distance to the pitch antenna drives frequency.
    Pitch,
    /// Left hand; distance to the volume antenna drives gain.
    Volume,
}

/// Fixed antenna positions, known once the instrument mesh has loaded.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Antennae {
    pub pitch: Vec3,
    pub volume: Vec3,
}

/// Generation counter for started voices. A fresh handle is allocated per
/// start so a restarted voice is distinguishable from a stale one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VoiceHandle(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OscillatorPhase {
    Stopped,
    /// A start was requested; the audio context resume is still pending.
    /// Control updates are dropped until [`ThereminEvent::OutputReady`].
    Starting,
    Running(VoiceHandle),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ThereminEvent {
    /// Mesh load completed; antenna positions are now known.
    AntennaeLoaded { pitch: Vec3, volume: Vec3 },
    /// A tracked hand/cursor/controller moved.
    ControlMoved { hand: Hand, position: Vec3 },
    StartPressed,
    StopPressed,
    /// Combined start/stop button.
    TogglePressed,
    /// The host's async audio-context resume completed.
    OutputReady,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AudioCommand {
    /// Begin the async audio-context resume; the host answers with
    /// [`ThereminEvent::OutputReady`] once it settles.
    RequestResume,
    /// Allocate an oscillator, connect oscillator -> gain -> output and
    /// start playback at the given initial values.
    Start {
        handle: VoiceHandle,
        frequency_hz: f32,
        gain: f32,
    },
    /// Approach the target frequency over `ramp_tau_sec` rather than
    /// stepping, to avoid audible clicks.
    SetFrequency {
        frequency_hz: f32,
        ramp_tau_sec: f32,
    },
    SetGain {
        gain: f32,
        ramp_tau_sec: f32,
    },
    /// Stop and disconnect the oscillator, releasing its handle.
    Stop { handle: VoiceHandle },
}

#[derive(Clone, Copy, Debug)]
pub struct ThereminParams {
    pub pitch_curve: FalloffCurve,
    pub volume_curve: FalloffCurve,
    /// Some variants invert gain so proximity to the volume antenna
    /// silences the instrument; others let proximity increase loudness.
    /// Policy choice per variant, not part of the falloff itself.
    pub invert_volume: bool,
    pub ramp_tau_sec: f32,
}

impl ThereminParams {
    pub fn validate(&self) -> Result<(), ParamError> {
        self.pitch_curve.validate()?;
        self.volume_curve.validate()?;
        if !(self.ramp_tau_sec.is_finite() && self.ramp_tau_sec > 0.0) {
            return Err(ParamError::BadRampTau(self.ramp_tau_sec));
        }
        Ok(())
    }
}

impl Default for ThereminParams {
    fn default() -> Self {
        constants::POSE
    }
}

pub struct ThereminEngine {
    params: ThereminParams,
    antennae: Option<Antennae>,
    pitch_point: Vec3,
    volume_point: Vec3,
    phase: OscillatorPhase,
    next_voice: u64,
}

impl ThereminEngine {
    pub fn new(params: ThereminParams) -> Result<Self, ParamError> {
        params.validate()?;
        Ok(Self {
            params,
            antennae: None,
            pitch_point: Vec3::from_array(constants::PITCH_REST),
            volume_point: Vec3::from_array(constants::VOLUME_REST),
            phase: OscillatorPhase::Stopped,
            next_voice: 0,
        })
    }

    pub fn params(&self) -> &ThereminParams {
        &self.params
    }

    pub fn phase(&self) -> OscillatorPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, OscillatorPhase::Running(_))
    }

    pub fn voice_handle(&self) -> Option<VoiceHandle> {
        match self.phase {
            OscillatorPhase::Running(handle) => Some(handle),
            _ => None,
        }
    }

    pub fn antennae(&self) -> Option<Antennae> {
        self.antennae
    }

    pub fn control_point(&self, hand: Hand) -> Vec3 {
        match hand {
            Hand::Pitch => self.pitch_point,
            Hand::Volume => self.volume_point,
        }
    }

    /// Process one event, appending any resulting audio commands to `out`.
    pub fn handle(&mut self, event: ThereminEvent, out: &mut Vec<AudioCommand>) {
        match event {
            ThereminEvent::AntennaeLoaded { pitch, volume } => {
                self.antennae_loaded(pitch, volume, out)
            }
            ThereminEvent::ControlMoved { hand, position } => {
                self.control_moved(hand, position, out)
            }
            ThereminEvent::StartPressed => self.press_start(out),
            ThereminEvent::StopPressed => self.press_stop(out),
            ThereminEvent::TogglePressed => match self.phase {
                OscillatorPhase::Stopped => self.press_start(out),
                _ => self.press_stop(out),
            },
            ThereminEvent::OutputReady => self.output_ready(out),
        }
    }

    fn antennae_loaded(&mut self, pitch: Vec3, volume: Vec3, out: &mut Vec<AudioCommand>) {
        if self.antennae.is_some() {
            log::warn!("antenna positions already set; ignoring reload");
            return;
        }
        if !(pitch.is_finite() && volume.is_finite()) {
            log::warn!("dropping non-finite antenna positions");
            return;
        }
        self.antennae = Some(Antennae { pitch, volume });
        if self.is_running() {
            self.push_frequency(out);
            self.push_gain(out);
        }
    }

    fn control_moved(&mut self, hand: Hand, position: Vec3, out: &mut Vec<AudioCommand>) {
        if !position.is_finite() {
            log::warn!("dropping non-finite control point for {:?}", hand);
            return;
        }
        match hand {
            Hand::Pitch => self.pitch_point = position,
            Hand::Volume => self.volume_point = position,
        }
        // Updates only reach the audio graph while a voice is running and
        // the antennae are known; otherwise the move is remembered silently.
        if self.is_running() {
            match hand {
                Hand::Pitch => self.push_frequency(out),
                Hand::Volume => self.push_gain(out),
            }
        }
    }

    fn press_start(&mut self, out: &mut Vec<AudioCommand>) {
        match self.phase {
            OscillatorPhase::Stopped => {
                self.phase = OscillatorPhase::Starting;
                out.push(AudioCommand::RequestResume);
            }
            // Resume already pending, or a voice is already live.
            OscillatorPhase::Starting | OscillatorPhase::Running(_) => {}
        }
    }

    fn press_stop(&mut self, out: &mut Vec<AudioCommand>) {
        match self.phase {
            OscillatorPhase::Stopped => {}
            OscillatorPhase::Starting => {
                // Cancel before the resume settles; the eventual
                // OutputReady will find us Stopped and be ignored.
                self.phase = OscillatorPhase::Stopped;
            }
            OscillatorPhase::Running(handle) => {
                self.phase = OscillatorPhase::Stopped;
                out.push(AudioCommand::Stop { handle });
            }
        }
    }

    fn output_ready(&mut self, out: &mut Vec<AudioCommand>) {
        if self.phase != OscillatorPhase::Starting {
            log::debug!("audio output ready while not starting; ignoring");
            return;
        }
        let handle = VoiceHandle(self.next_voice);
        self.next_voice += 1;
        self.phase = OscillatorPhase::Running(handle);
        // Before the mesh load completes the voice starts at the quiet end
        // of its ranges; the first AntennaeLoaded re-targets it.
        let (frequency_hz, gain) = self
            .current_targets()
            .unwrap_or((self.params.pitch_curve.min, 0.0));
        out.push(AudioCommand::Start {
            handle,
            frequency_hz,
            gain,
        });
    }

    fn push_frequency(&self, out: &mut Vec<AudioCommand>) {
        if let Some(frequency_hz) = self.target_frequency() {
            out.push(AudioCommand::SetFrequency {
                frequency_hz,
                ramp_tau_sec: self.params.ramp_tau_sec,
            });
        }
    }

    fn push_gain(&self, out: &mut Vec<AudioCommand>) {
        if let Some(gain) = self.target_gain() {
            out.push(AudioCommand::SetGain {
                gain,
                ramp_tau_sec: self.params.ramp_tau_sec,
            });
        }
    }

    /// Target frequency for the current pitch hand, or `None` until the
    /// antennae are known. Distances are squared euclidean, matching the
    /// sensitivities the curves were tuned with.
    pub fn target_frequency(&self) -> Option<f32> {
        let antennae = self.antennae?;
        let d = self.pitch_point.distance_squared(antennae.pitch);
        let value = self.params.pitch_curve.value_at(d);
        value.is_finite().then_some(value)
    }

    /// Target gain for the current volume hand, after the inversion policy.
    pub fn target_gain(&self) -> Option<f32> {
        let antennae = self.antennae?;
        let d = self.volume_point.distance_squared(antennae.volume);
        let raw = self.params.volume_curve.value_at(d);
        let value = if self.params.invert_volume {
            1.0 - raw
        } else {
            raw
        };
        value.is_finite().then_some(value)
    }

    fn current_targets(&self) -> Option<(f32, f32)> {
        Some((self.target_frequency()?, self.target_gain()?))
    }
}
