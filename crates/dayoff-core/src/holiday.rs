//! US federal holiday oracle.
//!
//! This is the only holiday table in the crate. Candidate coloring, slot
//! coloring, host lines and the result flag all ask [`HolidayOracle`].
//!
//! Dates are *observed* dates: a fixed-date holiday on a Saturday is
//! observed the Friday before, one on a Sunday the Monday after. A year's
//! table holds the holidays observed in that year, so when January 1 falls
//! on a Saturday its observance (December 31) belongs to the previous year.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;

/// A federal holiday on its observed date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Holiday {
    pub date: NaiveDate,
    pub name: &'static str,
}

#[derive(Debug, Clone, Copy)]
enum Rule {
    /// Fixed calendar date, shifted off weekends.
    Fixed { month: u32, day: u32 },
    /// n-th given weekday of the month (1-based).
    Nth { month: u32, weekday: Weekday, n: u8 },
    /// Last given weekday of the month.
    Last { month: u32, weekday: Weekday },
}

#[derive(Debug, Clone, Copy)]
struct HolidayRule {
    name: &'static str,
    rule: Rule,
    /// First year the holiday is observed.
    since: i32,
}

const RULES: [HolidayRule; 11] = [
    HolidayRule {
        name: "New Year's Day",
        rule: Rule::Fixed { month: 1, day: 1 },
        since: i32::MIN,
    },
    HolidayRule {
        name: "Birthday of Martin Luther King, Jr.",
        rule: Rule::Nth { month: 1, weekday: Weekday::Mon, n: 3 },
        since: 1986,
    },
    HolidayRule {
        name: "Washington's Birthday",
        rule: Rule::Nth { month: 2, weekday: Weekday::Mon, n: 3 },
        since: i32::MIN,
    },
    HolidayRule {
        name: "Memorial Day",
        rule: Rule::Last { month: 5, weekday: Weekday::Mon },
        since: i32::MIN,
    },
    HolidayRule {
        name: "Juneteenth National Independence Day",
        rule: Rule::Fixed { month: 6, day: 19 },
        since: 2021,
    },
    HolidayRule {
        name: "Independence Day",
        rule: Rule::Fixed { month: 7, day: 4 },
        since: i32::MIN,
    },
    HolidayRule {
        name: "Labor Day",
        rule: Rule::Nth { month: 9, weekday: Weekday::Mon, n: 1 },
        since: i32::MIN,
    },
    HolidayRule {
        name: "Columbus Day",
        rule: Rule::Nth { month: 10, weekday: Weekday::Mon, n: 2 },
        since: i32::MIN,
    },
    HolidayRule {
        name: "Veterans Day",
        rule: Rule::Fixed { month: 11, day: 11 },
        since: i32::MIN,
    },
    HolidayRule {
        name: "Thanksgiving Day",
        rule: Rule::Nth { month: 11, weekday: Weekday::Thu, n: 4 },
        since: i32::MIN,
    },
    HolidayRule {
        name: "Christmas Day",
        rule: Rule::Fixed { month: 12, day: 25 },
        since: i32::MIN,
    },
];

impl Rule {
    fn observed_in(self, year: i32) -> Option<NaiveDate> {
        match self {
            Rule::Fixed { month, day } => {
                NaiveDate::from_ymd_opt(year, month, day).and_then(shift_off_weekend)
            }
            Rule::Nth { month, weekday, n } => {
                NaiveDate::from_weekday_of_month_opt(year, month, weekday, n)
            }
            Rule::Last { month, weekday } => {
                let mut date = last_day_of_month(year, month)?;
                while date.weekday() != weekday {
                    date = date.pred_opt()?;
                }
                Some(date)
            }
        }
    }
}

fn shift_off_weekend(date: NaiveDate) -> Option<NaiveDate> {
    match date.weekday() {
        Weekday::Sat => date.pred_opt(),
        Weekday::Sun => date.succ_opt(),
        _ => Some(date),
    }
}

/// Last calendar day of `month` in `year`.
pub(crate) fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 {
        (year.checked_add(1)?, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
}

/// Answers holiday questions for any date.
///
/// Stateless; cheap to copy and pass by value.
#[derive(Debug, Clone, Copy, Default)]
pub struct HolidayOracle;

impl HolidayOracle {
    pub fn new() -> Self {
        Self
    }

    /// All holidays observed in `year`, in date order.
    pub fn holidays_for_year(&self, year: i32) -> Vec<Holiday> {
        // Next year's New Year's Day can be observed on December 31.
        let mut holidays: Vec<Holiday> = [Some(year), year.checked_add(1)]
            .into_iter()
            .flatten()
            .flat_map(|y| {
                RULES
                    .iter()
                    .filter(move |r| y >= r.since)
                    .filter_map(move |r| {
                        r.rule.observed_in(y).map(|date| Holiday { date, name: r.name })
                    })
            })
            .filter(|h| h.date.year() == year)
            .collect();
        holidays.sort_by_key(|h| h.date);
        holidays
    }

    /// Name of the holiday observed on `date`, if any.
    pub fn holiday_name(&self, date: NaiveDate) -> Option<&'static str> {
        self.holidays_for_year(date.year())
            .into_iter()
            .find(|h| h.date == date)
            .map(|h| h.name)
    }

    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holiday_name(date).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn table_for_2025() {
        let dates: Vec<NaiveDate> = HolidayOracle::new()
            .holidays_for_year(2025)
            .into_iter()
            .map(|h| h.date)
            .collect();
        assert_eq!(
            dates,
            vec![
                ymd(2025, 1, 1),
                ymd(2025, 1, 20),
                ymd(2025, 2, 17),
                ymd(2025, 5, 26),
                ymd(2025, 6, 19),
                ymd(2025, 7, 4),
                ymd(2025, 9, 1),
                ymd(2025, 10, 13),
                ymd(2025, 11, 11),
                ymd(2025, 11, 27),
                ymd(2025, 12, 25),
            ]
        );
    }

    #[test]
    fn saturday_new_year_moves_to_previous_year() {
        let oracle = HolidayOracle::new();
        // 2022-01-01 was a Saturday.
        assert_eq!(oracle.holiday_name(ymd(2021, 12, 31)), Some("New Year's Day"));
        assert!(!oracle.is_holiday(ymd(2022, 1, 1)));
        assert!(oracle
            .holidays_for_year(2022)
            .iter()
            .all(|h| h.name != "New Year's Day"));
        assert_eq!(oracle.holidays_for_year(2021).len(), 12);
    }

    #[test]
    fn weekend_fixed_dates_are_shifted() {
        let oracle = HolidayOracle::new();
        // Saturday -> Friday
        assert!(oracle.is_holiday(ymd(2026, 7, 3)));
        assert!(!oracle.is_holiday(ymd(2026, 7, 4)));
        assert!(oracle.is_holiday(ymd(2023, 11, 10)));
        // Sunday -> Monday
        assert!(oracle.is_holiday(ymd(2021, 7, 5)));
        assert!(oracle.is_holiday(ymd(2022, 12, 26)));
    }

    #[test]
    fn juneteenth_starts_in_2021() {
        let oracle = HolidayOracle::new();
        assert!(!oracle.is_holiday(ymd(2020, 6, 19)));
        // 2021-06-19 was a Saturday.
        assert!(oracle.is_holiday(ymd(2021, 6, 18)));
    }

    #[test]
    fn floating_holidays() {
        let oracle = HolidayOracle::new();
        assert_eq!(oracle.holiday_name(ymd(2024, 5, 27)), Some("Memorial Day"));
        assert_eq!(oracle.holiday_name(ymd(2024, 11, 28)), Some("Thanksgiving Day"));
        assert_eq!(oracle.holiday_name(ymd(2024, 2, 19)), Some("Washington's Birthday"));
        assert!(!oracle.is_holiday(ymd(2024, 2, 20)));
    }

    #[test]
    fn last_day_handles_leap_february() {
        assert_eq!(last_day_of_month(2024, 2), Some(ymd(2024, 2, 29)));
        assert_eq!(last_day_of_month(2025, 2), Some(ymd(2025, 2, 28)));
        assert_eq!(last_day_of_month(2025, 12), Some(ymd(2025, 12, 31)));
    }

    #[test]
    fn extreme_years_yield_empty_tables() {
        let oracle = HolidayOracle::new();
        assert_eq!(last_day_of_month(i32::MAX, 12), None);
        assert!(oracle.holidays_for_year(i32::MAX).is_empty());
        assert!(oracle.holidays_for_year(i32::MIN).is_empty());
    }

    #[test]
    fn every_day_of_2021_agrees_with_table() {
        let oracle = HolidayOracle::new();
        let table: Vec<NaiveDate> = oracle
            .holidays_for_year(2021)
            .into_iter()
            .map(|h| h.date)
            .collect();
        assert!(table.contains(&ymd(2021, 12, 31)));

        let mut hits = 0;
        for date in ymd(2021, 1, 1).iter_days().take_while(|d| d.year() == 2021) {
            assert_eq!(oracle.is_holiday(date), table.contains(&date), "{date}");
            hits += usize::from(oracle.is_holiday(date));
        }
        assert_eq!(hits, table.len());
    }
}
