//! Calendar facts for a single month
//!
//! Weeks here are consecutive 7-day chunks starting on day 1 of the month,
//! not ISO calendar weeks: week 1 is days 1-7, week 2 is days 8-14, and the
//! last week holds whatever is left (0 to 3 days short of a full week).

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;
use std::ops::RangeInclusive;

use crate::ConfigError;

/// Weekdays in sheet order (Monday first)
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Upper-case three letter label used in sheet headers
pub fn weekday_label(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "MON",
        Weekday::Tue => "TUE",
        Weekday::Wed => "WED",
        Weekday::Thu => "THU",
        Weekday::Fri => "FRI",
        Weekday::Sat => "SAT",
        Weekday::Sun => "SUN",
    }
}

/// A validated calendar month
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonthCalendar {
    year: i32,
    month: u32,
    first: NaiveDate,
    days: u32,
}

/// One day of the month
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DayInfo {
    /// Day of month (1-based)
    pub day: u32,
    pub weekday: Weekday,
    pub date: NaiveDate,
}

impl DayInfo {
    /// Zero-based week chunk this day belongs to
    pub fn week(&self) -> u32 {
        (self.day - 1) / 7
    }
}

impl MonthCalendar {
    pub fn new(year: i32, month: u32) -> Result<Self, ConfigError> {
        if !(1..=12).contains(&month) {
            return Err(ConfigError::InvalidMonth(month));
        }
        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or(ConfigError::InvalidYear(year))?;
        let next = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        }
        .ok_or(ConfigError::InvalidYear(year))?;
        let days = (next - first).num_days() as u32;

        Ok(Self {
            year,
            month,
            first,
            days,
        })
    }

    /// The month containing `date`
    pub fn containing(date: NaiveDate) -> Result<Self, ConfigError> {
        Self::new(date.year(), date.month())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// English month name ("November")
    pub fn month_name(&self) -> String {
        self.first.format("%B").to_string()
    }

    /// "{MonthName} {Year}"
    pub fn title(&self) -> String {
        format!("{} {}", self.month_name(), self.year)
    }

    /// Number of days in the month (leap years included)
    pub fn days_in_month(&self) -> u32 {
        self.days
    }

    /// Number of 7-day chunks needed to cover the month
    pub fn num_weeks(&self) -> u32 {
        self.days.div_ceil(7)
    }

    pub fn first_weekday(&self) -> Weekday {
        self.first.weekday()
    }

    pub fn date(&self, day: u32) -> Option<NaiveDate> {
        if day == 0 || day > self.days {
            return None;
        }
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }

    pub fn weekday(&self, day: u32) -> Option<Weekday> {
        self.date(day).map(|d| d.weekday())
    }

    /// All days of the month in order
    pub fn days(&self) -> impl Iterator<Item = DayInfo> {
        self.first
            .iter_days()
            .take(self.days as usize)
            .map(|date| DayInfo {
                day: date.day(),
                weekday: date.weekday(),
                date,
            })
    }

    /// Days covered by a zero-based week chunk, or `None` past the end
    pub fn week_days(&self, week: u32) -> Option<RangeInclusive<u32>> {
        if week >= self.num_weeks() {
            return None;
        }
        let start = week * 7 + 1;
        let end = (start + 6).min(self.days);
        Some(start..=end)
    }

    pub fn summary(&self) -> MonthSummary {
        MonthSummary {
            year: self.year,
            month: self.month,
            month_name: self.month_name(),
            days_in_month: self.days,
            weeks: self.num_weeks(),
            first_weekday: weekday_label(self.first_weekday()).to_string(),
            days: self
                .days()
                .map(|d| DaySummary {
                    day: d.day,
                    week: d.week() + 1,
                    weekday: weekday_label(d.weekday).to_string(),
                    date: d.date,
                })
                .collect(),
        }
    }
}

/// Serialisable snapshot of a month, used by the JSON preview
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MonthSummary {
    pub year: i32,
    pub month: u32,
    pub month_name: String,
    pub days_in_month: u32,
    pub weeks: u32,
    pub first_weekday: String,
    pub days: Vec<DaySummary>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DaySummary {
    pub day: u32,
    /// 1-based week chunk
    pub week: u32,
    pub weekday: String,
    pub date: NaiveDate,
}
