use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::config::Variant;
use crate::shell::Phase;

/// Every state change in the system produces an Event.
/// The host polls for events; observers subscribe to frames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    MonthSelected {
        year: i32,
        month: u32,
        candidate_count: usize,
        at: DateTime<Utc>,
    },
    DropStarted {
        variant: Variant,
        target_index: usize,
        candidate_count: usize,
        duration_ms: u64,
        at: DateTime<Utc>,
    },
    SelectionResolved {
        index: usize,
        date: NaiveDate,
        is_holiday: bool,
        at: DateTime<Utc>,
    },
    SessionCancelled {
        target_index: usize,
        at: DateTime<Utc>,
    },
    PhaseChanged {
        from: Phase,
        to: Phase,
        at: DateTime<Utc>,
    },
}
