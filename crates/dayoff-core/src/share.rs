//! Calendar link and share adapter.
//!
//! Builds an all-day "add to calendar" link for the resolved date and hands
//! it to the platform: native share sheet first, clipboard as fallback.
//! No network request is made here.

use chrono::NaiveDate;
use serde::Serialize;
use url::Url;

use crate::config::CalendarConfig;
use crate::error::{Result, ShareError};

pub const CALENDAR_RENDER_URL: &str = "https://calendar.google.com/calendar/render";

/// All-day single-day event link for `date`.
///
/// Start and end both carry `YYYYMMDD`.
///
/// # Errors
///
/// Returns an error if the assembled URL does not parse.
pub fn calendar_link(date: NaiveDate, calendar: &CalendarConfig) -> Result<Url> {
    let day = date.format("%Y%m%d");
    let link = format!(
        "{}?action=TEMPLATE&text={}&dates={day}/{day}&details={}",
        CALENDAR_RENDER_URL,
        urlencoding::encode(&calendar.title),
        urlencoding::encode(&calendar.details),
    );
    Ok(Url::parse(&link)?)
}

/// Summary line offered with the link.
pub fn share_text(date: NaiveDate) -> String {
    format!(
        "I'm taking a day off on {}. Add it to your calendar!",
        date.format("%A, %B %-d, %Y")
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharePayload {
    pub title: String,
    pub text: String,
    pub url: Url,
}

/// Platform share primitives.
pub trait SharePlatform {
    /// Open the native share sheet. Return [`ShareError::Unsupported`] when
    /// there is none.
    fn native_share(&mut self, payload: &SharePayload) -> Result<(), ShareError>;

    fn write_clipboard(&mut self, text: &str) -> Result<(), ShareError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "reason", rename_all = "lowercase")]
pub enum ShareOutcome {
    Shared,
    Copied,
    Failed(String),
}

impl ShareOutcome {
    /// Message to show the user, if the platform did not already.
    pub fn acknowledgment(&self) -> Option<String> {
        match self {
            ShareOutcome::Shared => None,
            ShareOutcome::Copied => Some("Link copied to clipboard!".to_string()),
            ShareOutcome::Failed(reason) => Some(format!("Could not copy the link: {reason}")),
        }
    }

    pub fn is_success(&self) -> bool {
        !matches!(self, ShareOutcome::Failed(_))
    }
}

/// Share `date` through `platform`, falling back to the clipboard.
///
/// Never fails: every problem ends up in [`ShareOutcome::Failed`].
pub fn share(
    date: NaiveDate,
    calendar: &CalendarConfig,
    platform: &mut dyn SharePlatform,
) -> ShareOutcome {
    let url = match calendar_link(date, calendar) {
        Ok(url) => url,
        Err(e) => return ShareOutcome::Failed(e.to_string()),
    };
    let payload = SharePayload {
        title: calendar.share_title.clone(),
        text: share_text(date),
        url,
    };

    match platform.native_share(&payload) {
        Ok(()) => return ShareOutcome::Shared,
        Err(ShareError::Unsupported(_)) => {}
        Err(e) => tracing::warn!(error = %e, "native share failed, copying link instead"),
    }

    match platform.write_clipboard(payload.url.as_str()) {
        Ok(()) => ShareOutcome::Copied,
        Err(e) => {
            tracing::warn!(error = %e, "clipboard write failed");
            ShareOutcome::Failed(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct FakePlatform {
        native: Option<Result<(), ShareError>>,
        clipboard_fails: bool,
        shared: Vec<SharePayload>,
        clipboard: Vec<String>,
    }

    impl SharePlatform for FakePlatform {
        fn native_share(&mut self, payload: &SharePayload) -> Result<(), ShareError> {
            let result = self
                .native
                .clone()
                .unwrap_or(Err(ShareError::Unsupported("share sheet")));
            if result.is_ok() {
                self.shared.push(payload.clone());
            }
            result
        }

        fn write_clipboard(&mut self, text: &str) -> Result<(), ShareError> {
            if self.clipboard_fails {
                return Err(ShareError::Failed("permission denied".into()));
            }
            self.clipboard.push(text.to_string());
            Ok(())
        }
    }

    fn july_fourth() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, 4).unwrap()
    }

    #[test]
    fn link_encodes_all_day_event() {
        let url = calendar_link(july_fourth(), &CalendarConfig::default()).unwrap();
        assert!(url.as_str().starts_with(CALENDAR_RENDER_URL));
        assert!(url.as_str().contains("dates=20250704/20250704"));

        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("action".into(), "TEMPLATE".into())));
        assert!(pairs.contains(&("text".into(), "Day Off".into())));
        assert!(pairs.contains(&("dates".into(), "20250704/20250704".into())));
        assert!(pairs.contains(&("details".into(), "Scheduled day off from work".into())));
    }

    #[test]
    fn text_uses_full_date() {
        assert_eq!(
            share_text(july_fourth()),
            "I'm taking a day off on Friday, July 4, 2025. Add it to your calendar!"
        );
    }

    #[test]
    fn native_share_wins_when_available() {
        let mut platform = FakePlatform {
            native: Some(Ok(())),
            ..Default::default()
        };
        let outcome = share(july_fourth(), &CalendarConfig::default(), &mut platform);
        assert_eq!(outcome, ShareOutcome::Shared);
        assert_eq!(outcome.acknowledgment(), None);
        assert_eq!(platform.shared[0].title, "Day Off Calendar");
        assert!(platform.clipboard.is_empty());
    }

    #[test]
    fn unsupported_share_copies_link() {
        let mut platform = FakePlatform::default();
        let outcome = share(july_fourth(), &CalendarConfig::default(), &mut platform);
        assert_eq!(outcome, ShareOutcome::Copied);
        assert_eq!(outcome.acknowledgment().unwrap(), "Link copied to clipboard!");
        assert!(platform.clipboard[0].contains("20250704"));
    }

    #[test]
    fn failed_share_falls_back_to_clipboard() {
        let mut platform = FakePlatform {
            native: Some(Err(ShareError::Failed("dismissed".into()))),
            ..Default::default()
        };
        let outcome = share(july_fourth(), &CalendarConfig::default(), &mut platform);
        assert_eq!(outcome, ShareOutcome::Copied);
    }

    #[test]
    fn clipboard_failure_is_reported_not_raised() {
        let mut platform = FakePlatform {
            clipboard_fails: true,
            ..Default::default()
        };
        let outcome = share(july_fourth(), &CalendarConfig::default(), &mut platform);
        assert!(!outcome.is_success());
        assert_eq!(
            outcome.acknowledgment().unwrap(),
            "Could not copy the link: permission denied"
        );
    }
}
