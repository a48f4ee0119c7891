use crate::mapping::FalloffCurve;
use crate::sources::{AxisRange, WristMapping};
use crate::theremin::ThereminParams;

// Shared tuning constants for the theremin variants. The per-variant
// frequency/gain ranges and sensitivities differ with no single "correct"
// set, so each shipping combination is kept as a preset.

/// Smoothing time constant for frequency/gain approach-over-time updates.
pub const RAMP_TAU_SEC: f32 = 0.01;

/// Pose-tracked spheres: C3..B4, volume inverted so the left hand silences
/// the instrument by approaching the volume antenna.
pub const POSE: ThereminParams = ThereminParams {
    pitch_curve: FalloffCurve::new(131.0, 494.0, 10.0),
    volume_curve: FalloffCurve::new(0.0, 1.0, 1.0),
    invert_volume: true,
    ramp_tau_sec: RAMP_TAU_SEC,
};

/// On-screen joysticks.
pub const JOYSTICK: ThereminParams = ThereminParams {
    pitch_curve: FalloffCurve::new(20.0, 2000.0, 1.0),
    volume_curve: FalloffCurve::new(0.0, 1.0, 10.0),
    invert_volume: false,
    ramp_tau_sec: RAMP_TAU_SEC,
};

/// Webcam-only.
pub const WEBCAM: ThereminParams = ThereminParams {
    pitch_curve: FalloffCurve::new(20.0, 1000.0, 1.0),
    volume_curve: FalloffCurve::new(0.0, 1.0, 10.0),
    invert_volume: false,
    ramp_tau_sec: RAMP_TAU_SEC,
};

/// XR controllers.
pub const XR: ThereminParams = ThereminParams {
    pitch_curve: FalloffCurve::new(20.0, 2000.0, 10.0),
    volume_curve: FalloffCurve::new(0.0, 1.0, 20.0),
    invert_volume: false,
    ramp_tau_sec: RAMP_TAU_SEC,
};

// Rest positions of the hand markers before any tracking data arrives.
pub const PITCH_REST: [f32; 3] = [0.2, 1.1, -0.1];
pub const VOLUME_REST: [f32; 3] = [-0.2, 1.1, -0.1];

// Canonical pose-tracker remap ranges: wrist keypoints arrive in pixel
// units from a 255x255 capture; y is flipped into scene-up.
pub const POSE_RIGHT_WRIST: WristMapping = WristMapping {
    x: AxisRange::new(100.0, 255.0, 0.05, 0.8),
    y: AxisRange::new(255.0, 0.0, 1.0, 1.8),
    plane_z: -0.1,
};

pub const POSE_LEFT_WRIST: WristMapping = WristMapping {
    x: AxisRange::new(100.0, 255.0, -0.25, -0.1),
    y: AxisRange::new(255.0, 0.0, 1.0, 1.8),
    plane_z: -0.03,
};
