//! The month cursor used to filter and page through the history.
use std::{fmt, str::FromStr};

use chrono::{Datelike, NaiveDate, Utc};
use serde::Serialize;

use crate::{JournalError, Result};

/// Which way to move the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// A `(year, month)` pair; `month` is always in `1..=12` and the year is
/// one `chrono` can represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct MonthAnchor {
    year: i32,
    month: u32,
}

impl MonthAnchor {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(JournalError::InvalidMonth {
                value: format!("{}-{}", year, month),
            });
        }
        Ok(MonthAnchor { year, month })
    }

    /// The month containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        MonthAnchor {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The month containing the current UTC day, evaluated on every call.
    pub fn current() -> Self {
        Self::of(Utc::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Moves exactly one calendar month, rolling the year over when needed.
    /// At the edge of the representable calendar the anchor stays put.
    pub fn advance(self, direction: Direction) -> Self {
        let step = match direction {
            Direction::Forward => 1,
            Direction::Backward => -1,
        };
        self.checked_add_months(step).unwrap_or(self)
    }

    /// The anchor `months` months away, or `None` if that month is outside
    /// the representable calendar.
    pub fn checked_add_months(self, months: i32) -> Option<Self> {
        let index = i64::from(self.year) * 12 + i64::from(self.month - 1) + i64::from(months);
        let year = i32::try_from(index.div_euclid(12)).ok()?;
        let month = u32::try_from(index.rem_euclid(12)).ok()? + 1;
        MonthAnchor::new(year, month).ok()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// First day of the month.
    pub fn first_day(&self) -> NaiveDate {
        // validated on construction, so day 1 always exists
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Human heading such as `March 2024`.
    pub fn label(&self) -> String {
        self.first_day().format("%B %Y").to_string()
    }
}

/// True iff `date` falls in `anchor`'s year and month.
pub fn same_month(date: NaiveDate, anchor: MonthAnchor) -> bool {
    anchor.contains(date)
}

impl fmt::Display for MonthAnchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthAnchor {
    type Err = JournalError;

    /// Parses `YYYY-MM`.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || JournalError::InvalidMonth {
            value: s.to_string(),
        };
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        MonthAnchor::new(year, month).map_err(|_| invalid())
    }
}
