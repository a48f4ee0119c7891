pub mod constants;
pub mod mapping;
pub mod sources;
pub mod theremin;

pub use mapping::{linear_remap, CurveError, FalloffCurve};
pub use sources::{AxisRange, ControlSource, GripSource, JoystickSource, PoseSource, WristMapping};
pub use theremin::{
    Antennae, AudioCommand, Hand, OscillatorPhase, ParamError, ThereminEngine, ThereminEvent,
    ThereminParams, VoiceHandle,
};
