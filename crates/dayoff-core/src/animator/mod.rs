//! Drop/spin animator.
//!
//! The animator is a frame-driven state machine. It does not own a thread
//! or a timer: the host calls [`Animator::frame`] once per display refresh
//! with the refresh timestamp, and progress is derived from elapsed time
//! since the session's first frame.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> (Completed | Cancelled)
//! ```
//!
//! A new session may start from any state except `Running`. A `run` call
//! while a session is live is ignored.
//!
//! ## Fairness
//!
//! The selected slot is drawn uniformly when the session starts (or
//! supplied by the caller) and never changes. Spin counts, ball start and
//! peg jitter only change what the animation looks like.

pub mod board;
mod session;
pub mod wheel;

pub use board::BoardModel;
pub use session::{AnimationSession, Frame, MotionModel, Pose, ResolvedSelection};
pub use wheel::WheelModel;

use chrono::Utc;
use rand::prelude::*;
use rand_pcg::Mcg128Xsl64;
use serde::{Deserialize, Serialize};

use crate::config::{AnimationConfig, Variant};
use crate::days::CandidateSet;
use crate::error::{Result, ValidationError};
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimatorState {
    Idle,
    Running,
    Completed,
    Cancelled,
}

/// Receives the progress stream of every session.
pub trait AnimationObserver {
    fn on_frame(&mut self, _frame: &Frame) {}

    /// Called exactly once per completed session.
    fn on_complete(&mut self, _selection: &ResolvedSelection) {}
}

/// Owns at most one live [`AnimationSession`].
pub struct Animator {
    config: AnimationConfig,
    rng: Mcg128Xsl64,
    state: AnimatorState,
    session: Option<AnimationSession>,
    /// Pose the last completed session came to rest in.
    resting: Option<Pose>,
    /// Result of the last completed session, until taken.
    resolved: Option<ResolvedSelection>,
    observers: Vec<Box<dyn AnimationObserver>>,
}

impl Animator {
    pub fn new(config: AnimationConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => Mcg128Xsl64::seed_from_u64(seed),
            None => Mcg128Xsl64::from_entropy(),
        };
        Self {
            config,
            rng,
            state: AnimatorState::Idle,
            session: None,
            resting: None,
            resolved: None,
            observers: Vec::new(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> AnimatorState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == AnimatorState::Running
    }

    pub fn variant(&self) -> Variant {
        self.config.variant
    }

    pub fn session(&self) -> Option<&AnimationSession> {
        self.session.as_ref()
    }

    /// Hand over the last resolved selection. Returns it at most once.
    pub fn take_resolved(&mut self) -> Option<ResolvedSelection> {
        self.resolved.take()
    }

    /// Pose to draw: the live session's, else where the last one stopped.
    pub fn pose(&self) -> Option<Pose> {
        self.session.as_ref().map(|s| s.pose()).or(self.resting)
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn subscribe(&mut self, observer: Box<dyn AnimationObserver>) {
        self.observers.push(observer);
    }

    /// Start a session over `candidates`.
    ///
    /// With `target == None` the slot is drawn uniformly from the
    /// candidates. Returns `Ok(None)` when a session is already running.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyCollection`] for an empty candidate
    /// set and [`ValidationError::OutOfBounds`] for a target past the end.
    pub fn run(&mut self, candidates: CandidateSet, target: Option<usize>) -> Result<Option<Event>> {
        if self.is_running() {
            tracing::debug!("drop requested while a session is running; ignored");
            return Ok(None);
        }
        if candidates.is_empty() {
            return Err(ValidationError::EmptyCollection("candidates".into()).into());
        }

        let len = candidates.len();
        let target_index = match target {
            Some(index) if index >= len => {
                return Err(ValidationError::OutOfBounds {
                    collection: "candidates".into(),
                    index,
                    len,
                }
                .into());
            }
            Some(index) => index,
            None => self.rng.gen_range(0..len),
        };

        let duration_ms = self.config.duration_ms as f64;
        let model: Box<dyn MotionModel> = match self.config.variant {
            Variant::Wheel => {
                let lo = self.config.min_rotations;
                let hi = self.config.max_rotations.max(lo);
                let turns = self.rng.gen_range(lo..=hi);
                Box::new(WheelModel::new(target_index, len, turns))
            }
            Variant::Board => {
                let start_x = board::BOARD_WIDTH / 2.0 + self.rng.gen_range(-30.0..30.0);
                let rng = Mcg128Xsl64::seed_from_u64(self.rng.gen());
                Box::new(BoardModel::new(target_index, len, start_x, duration_ms, rng))
            }
        };

        tracing::debug!(
            variant = ?self.config.variant,
            target_index,
            candidates = len,
            "session started"
        );

        self.session = Some(AnimationSession::new(candidates, target_index, duration_ms, model));
        self.resting = None;
        self.resolved = None;
        self.state = AnimatorState::Running;

        Ok(Some(Event::DropStarted {
            variant: self.config.variant,
            target_index,
            candidate_count: len,
            duration_ms: self.config.duration_ms,
            at: Utc::now(),
        }))
    }

    /// Call once per display refresh. Returns
    /// `Some(Event::SelectionResolved)` on the frame that completes the
    /// session; every other call returns `None`.
    pub fn frame(&mut self, timestamp_ms: f64) -> Option<Event> {
        if self.state != AnimatorState::Running {
            return None;
        }
        let session = self.session.as_mut()?;
        let frame = session.advance(timestamp_ms);
        for observer in &mut self.observers {
            observer.on_frame(&frame);
        }
        if !session.is_finished() {
            return None;
        }

        let resolved = session.resolve();
        self.resting = Some(frame.pose);
        self.session = None;
        self.state = AnimatorState::Completed;

        let selection = resolved?;
        self.resolved = Some(selection);
        for observer in &mut self.observers {
            observer.on_complete(&selection);
        }
        tracing::info!(
            index = selection.index,
            date = %selection.day.date(),
            holiday = selection.day.is_holiday(),
            "selection resolved"
        );
        Some(Event::SelectionResolved {
            index: selection.index,
            date: selection.day.date(),
            is_holiday: selection.day.is_holiday(),
            at: Utc::now(),
        })
    }

    /// Cancel any live session and forget the last result and resting
    /// pose, as when the candidates change.
    pub fn reset(&mut self) -> Option<Event> {
        let cancelled = self.cancel();
        self.resting = None;
        self.resolved = None;
        cancelled
    }

    /// Tear down the live session. No further frames or completion are
    /// reported for it.
    pub fn cancel(&mut self) -> Option<Event> {
        if self.state != AnimatorState::Running {
            return None;
        }
        let session = self.session.take()?;
        self.state = AnimatorState::Cancelled;
        self.resting = None;
        tracing::debug!(target_index = session.target_index(), "session cancelled");
        Some(Event::SessionCancelled {
            target_index: session.target_index(),
            at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::days::days_in_month;
    use crate::error::CoreError;
    use crate::holiday::HolidayOracle;
    use chrono::{Month, NaiveDate};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default, Clone)]
    struct Recorder {
        frames: Rc<RefCell<Vec<Frame>>>,
        completions: Rc<RefCell<Vec<ResolvedSelection>>>,
    }

    impl AnimationObserver for Recorder {
        fn on_frame(&mut self, frame: &Frame) {
            self.frames.borrow_mut().push(*frame);
        }

        fn on_complete(&mut self, selection: &ResolvedSelection) {
            self.completions.borrow_mut().push(*selection);
        }
    }

    fn february() -> CandidateSet {
        days_in_month(2025, Month::February, &HolidayOracle::new())
    }

    fn seeded(variant: Variant, seed: u64) -> Animator {
        Animator::new(AnimationConfig {
            variant,
            seed: Some(seed),
            ..Default::default()
        })
    }

    #[test]
    fn target_zero_resolves_to_first_candidate() {
        let mut animator = seeded(Variant::Wheel, 1);
        let recorder = Recorder::default();
        animator.subscribe(Box::new(recorder.clone()));

        assert!(animator.run(february(), Some(0)).unwrap().is_some());
        assert_eq!(animator.state(), AnimatorState::Running);
        assert!(animator.frame(1_000.0).is_none());
        assert!(animator.frame(2_500.0).is_none());

        match animator.frame(4_000.0) {
            Some(Event::SelectionResolved { index, date, is_holiday, .. }) => {
                assert_eq!(index, 0);
                assert_eq!(date, NaiveDate::from_ymd_opt(2025, 2, 3).unwrap());
                assert!(!is_holiday);
            }
            other => panic!("expected SelectionResolved, got {other:?}"),
        }
        assert_eq!(animator.state(), AnimatorState::Completed);
        assert_eq!(recorder.completions.borrow().len(), 1);
        assert_eq!(recorder.frames.borrow().len(), 3);

        // Further frames are no-ops.
        assert!(animator.frame(5_000.0).is_none());
        assert_eq!(recorder.completions.borrow().len(), 1);
        assert_eq!(animator.pose().unwrap().slot(8), 0);
        assert_eq!(animator.take_resolved().unwrap().index, 0);
        assert!(animator.take_resolved().is_none());
    }

    #[test]
    fn progress_follows_elapsed_time() {
        let mut animator = seeded(Variant::Wheel, 2);
        let recorder = Recorder::default();
        animator.subscribe(Box::new(recorder.clone()));
        animator.run(february(), Some(3)).unwrap();

        animator.frame(10_000.0);
        animator.frame(10_750.0);
        animator.frame(11_500.0);
        let frames = recorder.frames.borrow();
        assert_eq!(frames[0].progress, 0.0);
        assert!((frames[1].progress - 0.25).abs() < 1e-9);
        assert!((frames[2].progress - 0.5).abs() < 1e-9);
    }

    #[test]
    fn empty_candidates_are_refused() {
        let mut animator = seeded(Variant::Wheel, 3);
        let err = animator.run(CandidateSet::empty(2025, 2), None).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::EmptyCollection(_))
        ));
        assert_eq!(animator.state(), AnimatorState::Idle);
    }

    #[test]
    fn out_of_range_target_is_rejected_not_clamped() {
        let mut animator = seeded(Variant::Board, 4);
        let err = animator.run(february(), Some(8)).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::OutOfBounds { index: 8, len: 8, .. })
        ));
        assert!(animator.session().is_none());
    }

    #[test]
    fn second_run_while_active_is_ignored() {
        let mut animator = seeded(Variant::Wheel, 5);
        let recorder = Recorder::default();
        animator.subscribe(Box::new(recorder.clone()));

        animator.run(february(), Some(2)).unwrap();
        animator.frame(0.0);
        assert!(animator.run(february(), Some(6)).unwrap().is_none());
        assert!(animator.run(february(), Some(99)).unwrap().is_none());
        assert_eq!(animator.session().unwrap().target_index(), 2);

        animator.frame(3_000.0);
        let completions = recorder.completions.borrow();
        assert_eq!(completions.len(), 1);
        assert_eq!(completions[0].index, 2);
    }

    #[test]
    fn reset_clears_resting_pose_and_result() {
        let mut animator = seeded(Variant::Board, 8);
        animator.run(february(), Some(7)).unwrap();
        animator.frame(0.0);
        animator.frame(3_000.0);
        assert!(animator.pose().is_some());

        assert!(animator.reset().is_none());
        assert!(animator.pose().is_none());
        assert!(animator.take_resolved().is_none());
    }

    #[test]
    fn cancelled_session_never_completes() {
        let mut animator = seeded(Variant::Board, 6);
        let recorder = Recorder::default();
        animator.subscribe(Box::new(recorder.clone()));

        animator.run(february(), None).unwrap();
        animator.frame(0.0);
        animator.frame(1_000.0);
        assert!(animator.cancel().is_some());
        assert_eq!(animator.state(), AnimatorState::Cancelled);

        assert!(animator.frame(5_000.0).is_none());
        assert_eq!(recorder.frames.borrow().len(), 2);
        assert!(recorder.completions.borrow().is_empty());
        assert!(animator.pose().is_none());
        assert!(animator.cancel().is_none());
    }

    #[test]
    fn new_session_after_completion() {
        let mut animator = seeded(Variant::Wheel, 7);
        animator.run(february(), Some(1)).unwrap();
        animator.frame(0.0);
        animator.frame(3_000.0);
        assert!(animator.run(february(), Some(4)).unwrap().is_some());
        animator.frame(100.0);
        match animator.frame(3_100.0) {
            Some(Event::SelectionResolved { index, .. }) => assert_eq!(index, 4),
            other => panic!("expected SelectionResolved, got {other:?}"),
        }
    }

    #[test]
    fn random_target_is_in_range_and_fixed() {
        for seed in 0..50 {
            let mut animator = seeded(Variant::Wheel, seed);
            animator.run(february(), None).unwrap();
            let target = animator.session().unwrap().target_index();
            assert!(target < 8);
            animator.frame(0.0);
            animator.frame(1_234.0);
            assert_eq!(animator.session().unwrap().target_index(), target);
            match animator.frame(9_999.0) {
                Some(Event::SelectionResolved { index, .. }) => assert_eq!(index, target),
                other => panic!("expected SelectionResolved, got {other:?}"),
            }
        }
    }

    #[test]
    fn same_seed_same_target() {
        let pick = |seed| {
            let mut animator = seeded(Variant::Board, seed);
            animator.run(february(), None).unwrap();
            animator.session().unwrap().target_index()
        };
        assert_eq!(pick(42), pick(42));
    }
}
