//! Control-point source adapters.
//!
//! Each input modality (pose tracker, on-screen joysticks, held XR
//! controllers) is an adapter that turns its own update cadence into
//! [`ThereminEvent::ControlMoved`] events for the one shared engine.

use glam::{Vec2, Vec3};
use smallvec::SmallVec;

use crate::constants;
use crate::mapping::linear_remap;
use crate::theremin::{Hand, ThereminEvent};

/// An input modality that yields control-point updates at its own cadence.
pub trait ControlSource {
    /// Move any pending control-point updates into `out`.
    fn drain(&mut self, out: &mut Vec<ThereminEvent>);
}

/// Affine remap range for one raw tracker axis into scene space.
/// Unclamped: tracker readings outside the range extrapolate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisRange {
    pub in_min: f32,
    pub in_max: f32,
    pub out_min: f32,
    pub out_max: f32,
}

impl AxisRange {
    pub const fn new(in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> Self {
        Self {
            in_min,
            in_max,
            out_min,
            out_max,
        }
    }

    #[inline]
    pub fn remap(&self, value: f32) -> f32 {
        linear_remap(value, self.in_min, self.in_max, self.out_min, self.out_max)
    }
}

/// Per-hand mapping from 2D wrist keypoints (pixel space) into scene space.
/// The tracked point stays on a fixed z plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WristMapping {
    pub x: AxisRange,
    pub y: AxisRange,
    pub plane_z: f32,
}

impl WristMapping {
    pub fn to_scene(&self, keypoint: Vec2) -> Vec3 {
        Vec3::new(self.x.remap(keypoint.x), self.y.remap(keypoint.y), self.plane_z)
    }
}

/// Webcam pose-estimation adapter. The tracker's detection callback runs
/// once per video frame at its own cadence and delivers named wrist
/// keypoints in pixel units.
pub struct PoseSource {
    right: WristMapping,
    left: WristMapping,
    pending: SmallVec<[ThereminEvent; 2]>,
}

impl PoseSource {
    pub fn new(right: WristMapping, left: WristMapping) -> Self {
        Self {
            right,
            left,
            pending: SmallVec::new(),
        }
    }

    /// Adapter with the shipping remap ranges for a 255x255 capture.
    pub fn canonical() -> Self {
        Self::new(constants::POSE_RIGHT_WRIST, constants::POSE_LEFT_WRIST)
    }

    /// One detection: the right wrist drives pitch, the left drives volume.
    pub fn on_detection(&mut self, right_wrist: Vec2, left_wrist: Vec2) {
        self.pending.push(ThereminEvent::ControlMoved {
            hand: Hand::Pitch,
            position: self.right.to_scene(right_wrist),
        });
        self.pending.push(ThereminEvent::ControlMoved {
            hand: Hand::Volume,
            position: self.left.to_scene(left_wrist),
        });
    }
}

impl ControlSource for PoseSource {
    fn drain(&mut self, out: &mut Vec<ThereminEvent>) {
        out.extend(self.pending.drain(..));
    }
}

/// On-screen joystick adapter: per-frame deltas accumulate onto a
/// persistent marker position while the stick is pressed.
pub struct JoystickSource {
    hand: Hand,
    position: Vec3,
    pressed: bool,
    pending: SmallVec<[ThereminEvent; 4]>,
}

impl JoystickSource {
    pub fn new(hand: Hand, rest: Vec3) -> Self {
        Self {
            hand,
            position: rest,
            pressed: false,
            pending: SmallVec::new(),
        }
    }

    pub fn set_pressed(&mut self, pressed: bool) {
        self.pressed = pressed;
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Apply one frame's stick delta. Ignored while released.
    pub fn apply_delta(&mut self, delta: Vec2) {
        if !self.pressed {
            return;
        }
        self.position.x += delta.x;
        self.position.y += delta.y;
        self.pending.push(ThereminEvent::ControlMoved {
            hand: self.hand,
            position: self.position,
        });
    }
}

impl ControlSource for JoystickSource {
    fn drain(&mut self, out: &mut Vec<ThereminEvent>) {
        out.extend(self.pending.drain(..));
    }
}

/// Held-controller adapter: world-space grip poses pass straight through,
/// but only while the trigger/pointer is held.
pub struct GripSource {
    held: bool,
    pending: SmallVec<[ThereminEvent; 4]>,
}

impl GripSource {
    pub fn new() -> Self {
        Self {
            held: false,
            pending: SmallVec::new(),
        }
    }

    pub fn set_held(&mut self, held: bool) {
        self.held = held;
    }

    pub fn is_held(&self) -> bool {
        self.held
    }

    pub fn on_pose(&mut self, hand: Hand, position: Vec3) {
        if !self.held {
            return;
        }
        self.pending.push(ThereminEvent::ControlMoved { hand, position });
    }
}

impl Default for GripSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ControlSource for GripSource {
    fn drain(&mut self, out: &mut Vec<ThereminEvent>) {
        out.extend(self.pending.drain(..));
    }
}
