//! Host lines.
//!
//! [`narrate`] is a pure function of the shell's state. The only source of
//! randomness, the flavor phrase shown while dropping, is picked by the
//! shell once per entry into [`Phase::Dropping`] and passed in.

use chrono::{Month, NaiveDate};

use crate::holiday::HolidayOracle;
use crate::shell::Phase;

pub const WELCOME: &str = "Welcome to Day Off Plinko! Select a month to get started!";

/// Phrases shown while the drop is in flight.
pub const FLAVOR_PHRASES: [&str; 4] = [
    "Watch it bounce! Where will it land?",
    "The suspense is killing me!",
    "Bouncing, bouncing, bouncing!",
    "Look at that ball go!",
];

/// Text the host says for the given state.
///
/// `flavor` indexes [`FLAVOR_PHRASES`] (wrapping). A `Result` phase with no
/// date falls back to the `Selecting` line.
pub fn narrate(
    phase: Phase,
    month: Option<Month>,
    date: Option<NaiveDate>,
    flavor: usize,
    oracle: &HolidayOracle,
) -> String {
    match (phase, date) {
        (Phase::Idle, _) => WELCOME.to_string(),
        (Phase::Dropping, _) => FLAVOR_PHRASES[flavor % FLAVOR_PHRASES.len()].to_string(),
        (Phase::Result, Some(date)) => {
            let when = date.format("%A, %B %-d");
            if oracle.is_holiday(date) {
                format!("Congratulations! You got {when}. That's a holiday! Double win!")
            } else {
                format!(
                    "Congratulations! Your day off will be {when}. Enjoy your long weekend!"
                )
            }
        }
        (Phase::Selecting, _) | (Phase::Result, None) => match month {
            Some(m) => format!(
                "Great choice! {} has some excellent days off. Ready to drop the ball?",
                m.name()
            ),
            None => WELCOME.to_string(),
        },
    }
}
