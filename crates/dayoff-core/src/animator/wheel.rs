//! Spinning wheel motion model.
//!
//! Angles use canvas conventions: radians, y axis pointing down, so a
//! positive rotation turns the wheel clockwise on screen. The pointer sits
//! at the top of the wheel.
//!
//! Slot `i` spans `[start_offset + i * seg, start_offset + (i + 1) * seg)`
//! with `start_offset = -seg / 2`, so its center is at `i * seg`.
//!
//! The spin is closed-form:
//!
//! ```text
//! angle(t)        = target_rotation * (1 - (1 - t)^3)
//! target_rotation = full_rotations * 2π - target_angle
//! ```
//!
//! where `target_angle` is the slot center measured from the pointer.
//! `full_rotations` is a whole number, so at `t = 1` the slot center sits
//! exactly under the pointer no matter how many turns were drawn.

use std::f64::consts::{FRAC_PI_2, TAU};

use super::session::{MotionModel, Pose};

/// Pointer direction on the canvas (straight up).
pub const POINTER_ANGLE: f64 = -FRAC_PI_2;

/// Logical canvas size of the wheel surface.
pub const WHEEL_SIZE: f64 = 300.0;

pub fn segment_angle(slot_count: usize) -> f64 {
    TAU / slot_count.max(1) as f64
}

/// Angle of the first slot's leading edge.
pub fn start_offset(slot_count: usize) -> f64 {
    -segment_angle(slot_count) / 2.0
}

/// Unrotated angle of slot `index`'s center.
pub fn slot_center(index: usize, slot_count: usize) -> f64 {
    start_offset(slot_count) + (index as f64 + 0.5) * segment_angle(slot_count)
}

/// Angle the wheel must travel (mod 2π) to bring `index` under the pointer.
pub fn target_angle(index: usize, slot_count: usize) -> f64 {
    slot_center(index, slot_count) - POINTER_ANGLE
}

/// Cubic ease-out.
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Slot whose arc is under the pointer for a wheel turned by `rotation`.
pub fn slot_under_pointer(rotation: f64, slot_count: usize) -> usize {
    if slot_count == 0 {
        return 0;
    }
    let seg = segment_angle(slot_count);
    // Pointer position expressed in the wheel's own frame.
    let local = (POINTER_ANGLE - rotation - start_offset(slot_count)).rem_euclid(TAU);
    ((local / seg).floor() as usize) % slot_count
}

#[derive(Debug, Clone)]
pub struct WheelModel {
    target_rotation: f64,
}

impl WheelModel {
    pub fn new(target_index: usize, slot_count: usize, full_rotations: u32) -> Self {
        let target_rotation =
            full_rotations as f64 * TAU - target_angle(target_index, slot_count);
        Self { target_rotation }
    }

    pub fn target_rotation(&self) -> f64 {
        self.target_rotation
    }

    pub fn rotation_at(&self, progress: f64) -> f64 {
        self.target_rotation * ease_out_cubic(progress)
    }
}

impl MotionModel for WheelModel {
    fn advance(&mut self, _elapsed_ms: f64, progress: f64) -> Pose {
        Pose::Wheel {
            rotation: self.rotation_at(progress),
        }
    }
}
