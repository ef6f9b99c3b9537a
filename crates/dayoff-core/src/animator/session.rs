use serde::Serialize;

use super::board::slot_at_x;
use super::wheel::slot_under_pointer;
use crate::days::{CandidateDay, CandidateSet};

/// Kinematic state to draw for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Pose {
    /// Wheel rotation in radians (clockwise positive).
    Wheel { rotation: f64 },
    /// Ball center in board coordinates.
    Board { x: f64, y: f64 },
}

impl Pose {
    /// Slot this pose points at.
    pub fn slot(&self, slot_count: usize) -> usize {
        match *self {
            Pose::Wheel { rotation } => slot_under_pointer(rotation, slot_count),
            Pose::Board { x, .. } => slot_at_x(x, slot_count),
        }
    }
}

/// A visual model that turns session time into a pose.
///
/// Implementations own all visual randomness. They are built with the
/// target slot already fixed and must report a pose pointing at it once
/// `progress` reaches 1.
pub trait MotionModel: std::fmt::Debug {
    fn advance(&mut self, elapsed_ms: f64, progress: f64) -> Pose;
}

/// One step of the progress stream.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Frame {
    pub elapsed_ms: f64,
    /// 0.0 .. 1.0, never decreasing within a session.
    pub progress: f64,
    pub pose: Pose,
    pub target_index: usize,
}

/// The day chosen by a completed session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolvedSelection {
    pub index: usize,
    pub day: CandidateDay,
}

/// State of one animator run.
///
/// The target index is fixed at construction. The clock starts at the
/// first frame's timestamp.
#[derive(Debug)]
pub struct AnimationSession {
    candidates: CandidateSet,
    target_index: usize,
    duration_ms: f64,
    started_at_ms: Option<f64>,
    progress: f64,
    pose: Pose,
    model: Box<dyn MotionModel>,
}

impl AnimationSession {
    pub(crate) fn new(
        candidates: CandidateSet,
        target_index: usize,
        duration_ms: f64,
        mut model: Box<dyn MotionModel>,
    ) -> Self {
        let pose = model.advance(0.0, 0.0);
        Self {
            candidates,
            target_index,
            duration_ms,
            started_at_ms: None,
            progress: 0.0,
            pose,
            model,
        }
    }

    pub fn target_index(&self) -> usize {
        self.target_index
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn pose(&self) -> Pose {
        self.pose
    }

    pub fn is_finished(&self) -> bool {
        self.progress >= 1.0
    }

    /// Advance to the display refresh at `timestamp_ms`.
    pub(crate) fn advance(&mut self, timestamp_ms: f64) -> Frame {
        let start = *self.started_at_ms.get_or_insert(timestamp_ms);
        let elapsed_ms = (timestamp_ms - start).max(0.0);
        let progress = (elapsed_ms / self.duration_ms).min(1.0).max(self.progress);

        self.progress = progress;
        self.pose = self.model.advance(elapsed_ms, progress);

        Frame {
            elapsed_ms,
            progress,
            pose: self.pose,
            target_index: self.target_index,
        }
    }

    pub(crate) fn resolve(&self) -> Option<ResolvedSelection> {
        self.candidates
            .get(self.target_index)
            .map(|day| ResolvedSelection {
                index: self.target_index,
                day: *day,
            })
    }
}
