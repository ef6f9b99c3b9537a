//! # Day Off Core Library
//!
//! This library provides the core logic for Day Off Drop, a small game that
//! picks a day off (a Monday or a Friday) from a chosen month by dropping a
//! ball down a peg board or spinning a wheel. Hosts (the terminal CLI, or
//! any other front end) only feed it clicks and display refresh timestamps.
//!
//! ## Architecture
//!
//! - **Holiday Oracle**: Single source of US federal observed holidays
//! - **Candidates**: Mondays and Fridays of a month, tagged with holiday status
//! - **Animator**: A wall-clock-based state machine that requires the host
//!   to call `frame()` on every display refresh
//! - **Shell**: Month selection, drop trigger, host lines and result actions
//! - **Render**: Painters for the wheel and the board over a [`Surface`]
//!
//! ## Key Components
//!
//! - [`Shell`]: Top-level presentation state machine
//! - [`Animator`]: Drop/spin session driver
//! - [`HolidayOracle`]: Federal holiday lookup
//! - [`Config`]: Application configuration management

pub mod animator;
pub mod config;
pub mod days;
pub mod error;
pub mod events;
pub mod holiday;
pub mod narrator;
pub mod render;
pub mod share;
pub mod shell;

pub use animator::{AnimationObserver, Animator, AnimatorState, Frame, Pose, ResolvedSelection};
pub use config::{AnimationConfig, CalendarConfig, Config, Variant};
pub use days::{days_in_month, CandidateDay, CandidateSet};
pub use error::{ConfigError, CoreError, ShareError, ValidationError};
pub use events::Event;
pub use holiday::{Holiday, HolidayOracle};
pub use narrator::narrate;
pub use render::{Surface, TextCanvas};
pub use share::{calendar_link, share, share_text, ShareOutcome, SharePayload, SharePlatform};
pub use shell::{DropControl, Phase, Shell, ShellView};
