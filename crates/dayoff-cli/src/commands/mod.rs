pub mod config;
pub mod days;
pub mod holidays;
pub mod link;
pub mod play;

use std::path::Path;

use chrono::{Datelike, Local, Month};
use dayoff_core::Config;

/// Load from `--config` when given, else the default location.
pub fn load_config(path: Option<&Path>) -> Result<Config, Box<dyn std::error::Error>> {
    let config = match path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    Ok(config)
}

/// Parse a month as a number (`2`) or an English name (`feb`, `February`).
pub fn parse_month(s: &str) -> Result<Month, String> {
    if let Ok(n) = s.parse::<u8>() {
        return Month::try_from(n).map_err(|_| format!("month out of range: {n}"));
    }
    s.parse::<Month>()
        .map_err(|_| format!("unknown month: {s}"))
}

pub fn current_year() -> i32 {
    Local::now().year()
}
