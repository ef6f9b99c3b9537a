//! Candidate day generation.
//!
//! A candidate is any Monday or Friday of the chosen month. The set is
//! rebuilt on every month change and never mutated afterwards.

use chrono::{Datelike, Month, NaiveDate, Weekday};
use serde::Serialize;

use crate::holiday::{last_day_of_month, HolidayOracle};

/// A Monday or Friday eligible to become the day off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CandidateDay {
    date: NaiveDate,
    weekday: Weekday,
    is_holiday: bool,
}

impl CandidateDay {
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn weekday(&self) -> Weekday {
        self.weekday
    }

    pub fn is_holiday(&self) -> bool {
        self.is_holiday
    }

    /// Short slot label, e.g. `Mon 3`.
    pub fn label(&self) -> String {
        self.date.format("%a %-d").to_string()
    }

    /// Long form used in result text, e.g. `Monday, February 3, 2025`.
    pub fn long_format(&self) -> String {
        self.date.format("%A, %B %-d, %Y").to_string()
    }
}

/// Ordered candidates for one `(year, month)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateSet {
    year: i32,
    month: u32,
    days: Vec<CandidateDay>,
}

impl CandidateSet {
    /// A set with no candidates. The animator refuses to run on it.
    pub fn empty(year: i32, month: u32) -> Self {
        Self {
            year,
            month,
            days: Vec::new(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// 1-based month number.
    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CandidateDay> {
        self.days.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CandidateDay> {
        self.days.iter()
    }

    pub fn as_slice(&self) -> &[CandidateDay] {
        &self.days
    }

    /// Slot index of `date`, if it is a candidate.
    pub fn position(&self, date: NaiveDate) -> Option<usize> {
        self.days.iter().position(|d| d.date == date)
    }
}

impl<'a> IntoIterator for &'a CandidateSet {
    type Item = &'a CandidateDay;
    type IntoIter = std::slice::Iter<'a, CandidateDay>;

    fn into_iter(self) -> Self::IntoIter {
        self.days.iter()
    }
}

/// Every Monday and Friday of `month` in `year`, in calendar order.
pub fn days_in_month(year: i32, month: Month, oracle: &HolidayOracle) -> CandidateSet {
    let month_num = month.number_from_month();
    let days = match (
        NaiveDate::from_ymd_opt(year, month_num, 1),
        last_day_of_month(year, month_num),
    ) {
        (Some(first), Some(last)) => first
            .iter_days()
            .take_while(|d| *d <= last)
            .filter(|d| matches!(d.weekday(), Weekday::Mon | Weekday::Fri))
            .map(|date| CandidateDay {
                date,
                weekday: date.weekday(),
                is_holiday: oracle.is_holiday(date),
            })
            .collect(),
        // Only reachable for years outside chrono's range.
        _ => Vec::new(),
    };

    CandidateSet {
        year,
        month: month_num,
        days,
    }
}
