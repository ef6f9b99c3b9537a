//! Presentation shell.
//!
//! Top-level state machine tying month selection, the animator, the host
//! and the result actions together.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Selecting -> Dropping -> Result
//!            ^            |          |
//!            +------------+----------+   (new month chosen)
//! ```
//!
//! Choosing a month while dropping cancels the live session, and
//! [`Shell::cancel`] abandons it while keeping the month. Nothing returns to
//! `Idle`. The animator is only driven through the shell.

use chrono::{Month, Utc};
use rand::prelude::*;
use rand_pcg::Mcg128Xsl64;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::animator::{Animator, ResolvedSelection};
use crate::config::{Config, Variant};
use crate::days::{days_in_month, CandidateSet};
use crate::error::{Result, ValidationError};
use crate::events::Event;
use crate::holiday::HolidayOracle;
use crate::narrator::{narrate, FLAVOR_PHRASES};
use crate::render::{paint, Surface};
use crate::share::{self, ShareOutcome, SharePlatform};

const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

/// Keeps the flavor-phrase stream apart from the animator's stream when a
/// seed is configured.
const FLAVOR_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Selecting,
    Dropping,
    Result,
}

/// What to show where the drop button lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DropControl {
    /// No usable month yet: show the placeholder instead of a button.
    Placeholder,
    Ready,
    Dropping,
    Disabled,
}

impl DropControl {
    pub fn label(&self) -> &'static str {
        match self {
            DropControl::Placeholder => crate::render::PLACEHOLDER,
            DropControl::Dropping => "DROPPING...",
            DropControl::Ready | DropControl::Disabled => "DROP THE BALL!",
        }
    }

    pub fn is_enabled(&self) -> bool {
        *self == DropControl::Ready
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultView {
    /// e.g. `Monday, February 3, 2025`
    pub date: String,
    pub is_holiday: bool,
    pub holiday_name: Option<&'static str>,
    pub calendar_link: Option<String>,
}

/// Snapshot of everything the page renders outside the canvas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShellView {
    pub phase: Phase,
    pub month: Option<String>,
    pub message: String,
    pub control: DropControl,
    pub result: Option<ResultView>,
}

pub struct Shell {
    config: Config,
    oracle: HolidayOracle,
    year: i32,
    phase: Phase,
    month: Option<Month>,
    candidates: Option<CandidateSet>,
    animator: Animator,
    selection: Option<ResolvedSelection>,
    flavor: usize,
    rng: Mcg128Xsl64,
}

impl Shell {
    /// A shell offering the months of `year`.
    pub fn new(config: Config, year: i32) -> Self {
        let rng = match config.animation.seed {
            Some(seed) => Mcg128Xsl64::seed_from_u64(seed ^ FLAVOR_SEED_SALT),
            None => Mcg128Xsl64::from_entropy(),
        };
        let animator = Animator::new(config.animation.clone());
        Self {
            config,
            oracle: HolidayOracle::new(),
            year,
            phase: Phase::Idle,
            month: None,
            candidates: None,
            animator,
            selection: None,
            flavor: 0,
            rng,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> Option<Month> {
        self.month
    }

    pub fn variant(&self) -> Variant {
        self.animator.variant()
    }

    pub fn oracle(&self) -> &HolidayOracle {
        &self.oracle
    }

    pub fn candidates(&self) -> Option<&CandidateSet> {
        self.candidates.as_ref()
    }

    pub fn selection(&self) -> Option<&ResolvedSelection> {
        self.selection.as_ref()
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    /// Dropdown entries, e.g. `("February 2025", Month::February)`.
    pub fn months(&self) -> Vec<(String, Month)> {
        MONTHS
            .iter()
            .map(|m| (format!("{} {}", m.name(), self.year), *m))
            .collect()
    }

    /// Host line for the current state.
    pub fn message(&self) -> String {
        narrate(
            self.phase,
            self.month,
            self.selection.map(|s| s.day.date()),
            self.flavor,
            &self.oracle,
        )
    }

    pub fn control(&self) -> DropControl {
        let has_candidates = self.candidates.as_ref().is_some_and(|c| !c.is_empty());
        match self.phase {
            _ if !has_candidates => DropControl::Placeholder,
            Phase::Idle => DropControl::Placeholder,
            Phase::Selecting => DropControl::Ready,
            Phase::Dropping => DropControl::Dropping,
            Phase::Result => DropControl::Disabled,
        }
    }

    pub fn view(&self) -> ShellView {
        let result = self.selection.map(|s| {
            let date = s.day.date();
            ResultView {
                date: s.day.long_format(),
                is_holiday: s.day.is_holiday(),
                holiday_name: self.oracle.holiday_name(date),
                calendar_link: self.calendar_link().ok().map(String::from),
            }
        });
        ShellView {
            phase: self.phase,
            month: self.month.map(|m| format!("{} {}", m.name(), self.year)),
            message: self.message(),
            control: self.control(),
            result,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Choose a month. Cancels any live drop and clears the last result.
    pub fn select_month(&mut self, month: Month) -> Vec<Event> {
        let mut events = Vec::new();
        events.extend(self.animator.reset());

        let candidates = days_in_month(self.year, month, &self.oracle);
        tracing::debug!(year = self.year, month = month.name(), count = candidates.len(), "month selected");
        events.push(Event::MonthSelected {
            year: self.year,
            month: month.number_from_month(),
            candidate_count: candidates.len(),
            at: Utc::now(),
        });

        self.month = Some(month);
        self.candidates = Some(candidates);
        self.selection = None;
        events.extend(self.transition(Phase::Selecting));
        events
    }

    /// Start the drop. Ignored unless a month with candidates is selected
    /// and no drop is in flight.
    ///
    /// # Errors
    ///
    /// Propagates the animator's rejection of an out-of-range `target`.
    pub fn trigger_drop(&mut self, target: Option<usize>) -> Result<Vec<Event>> {
        if self.phase != Phase::Selecting {
            tracing::debug!(phase = ?self.phase, "drop trigger ignored");
            return Ok(Vec::new());
        }
        let Some(candidates) = self.candidates.as_ref().filter(|c| !c.is_empty()) else {
            return Ok(Vec::new());
        };

        let Some(started) = self.animator.run(candidates.clone(), target)? else {
            return Ok(Vec::new());
        };
        self.flavor = self.rng.gen_range(0..FLAVOR_PHRASES.len());

        let mut events = vec![started];
        events.extend(self.transition(Phase::Dropping));
        Ok(events)
    }

    /// Abandon a drop in flight and return to `Selecting` with the same
    /// month. No-op in any other phase.
    pub fn cancel(&mut self) -> Vec<Event> {
        if self.phase != Phase::Dropping {
            return Vec::new();
        }
        let mut events: Vec<Event> = self.animator.reset().into_iter().collect();
        events.extend(self.transition(Phase::Selecting));
        events
    }

    /// Forward a display refresh to the animator.
    pub fn frame(&mut self, timestamp_ms: f64) -> Vec<Event> {
        if self.phase != Phase::Dropping {
            return Vec::new();
        }
        let Some(resolved) = self.animator.frame(timestamp_ms) else {
            return Vec::new();
        };

        self.selection = self.animator.take_resolved();
        let mut events = vec![resolved];
        events.extend(self.transition(Phase::Result));
        events
    }

    /// Link for the drawn day.
    ///
    /// # Errors
    ///
    /// Fails when no day has been drawn yet.
    pub fn calendar_link(&self) -> Result<Url> {
        let selection = self.selection.ok_or_else(no_selection)?;
        share::calendar_link(selection.day.date(), &self.config.calendar)
    }

    /// Share the drawn day. `None` when there is nothing to share.
    pub fn share(&self, platform: &mut dyn SharePlatform) -> Option<ShareOutcome> {
        let selection = self.selection?;
        Some(share::share(
            selection.day.date(),
            &self.config.calendar,
            platform,
        ))
    }

    /// Paint the board or wheel in its current pose.
    pub fn render(&self, surface: &mut dyn Surface) {
        let empty;
        let candidates = match &self.candidates {
            Some(c) => c,
            None => {
                empty = CandidateSet::empty(self.year, 1);
                &empty
            }
        };
        let highlight = match self.phase {
            Phase::Result => self.selection.map(|s| s.index),
            _ => None,
        };
        paint(surface, self.variant(), candidates, self.animator.pose(), highlight);
    }

    fn transition(&mut self, to: Phase) -> Option<Event> {
        let from = self.phase;
        if from == to {
            return None;
        }
        self.phase = to;
        Some(Event::PhaseChanged {
            from,
            to,
            at: Utc::now(),
        })
    }
}

fn no_selection() -> ValidationError {
    ValidationError::InvalidValue {
        field: "selection".into(),
        message: "no day has been drawn yet".into(),
    }
}
