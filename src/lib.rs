mod arcana;
mod consts;
mod forecast;
mod prelude;
mod range;
mod session;
mod types;

pub use arcana::{PersonalConstant, day_value};
pub use consts::*;
pub use forecast::{DailyValue, month_ahead, over_range, today_value, values_from};
pub use range::{DateRange, RangeError};
pub use session::{Choice, Session, SessionState};
pub use types::{Day, Month, Year};

use crate::prelude::*;
use chrono::Datelike;
use std::str::FromStr;
use types::days_in_month;

/// A concrete calendar date with validated components.
/// Renders and parses in the day-first `DD.MM.YYYY` convention.
///
/// Field order is year, month, day so the derived ordering is
/// chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:02}.{:02}.{:04}", "day.get()", "month.get()", "year.get()")]
pub struct CivilDate {
    year: types::Year,
    month: types::Month,
    day: types::Day,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid year: {} (must be 1-{})", "_0", MAX_YEAR)]
    InvalidYear(u16),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {month:02}.{year}")]
    InvalidDay { day: u8, month: u8, year: u16 },
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

impl CivilDate {
    /// Creates a date from numeric components, validating each one.
    ///
    /// # Errors
    /// Returns the component's `ParseError` if the year, month, or day is
    /// out of range (the day is checked against the month's actual length).
    pub fn from_ymd(year: u16, month: u8, day: u8) -> Result<Self, ParseError> {
        let year_t = types::Year::new(year)?;
        let month_t = types::Month::new(month)?;
        let day_t = types::Day::new(day, year, month)?;
        Ok(Self {
            year: year_t,
            month: month_t,
            day: day_t,
        })
    }

    /// The current date according to the local system clock.
    pub fn today() -> Self {
        let now = chrono::Local::now().date_naive();
        // The clock only hands out real calendar dates within 1..=9999.
        Self::from_ymd(now.year() as u16, now.month() as u8, now.day() as u8)
            .expect("system clock produced an out-of-range date")
    }

    /// Returns the day component
    pub const fn day(&self) -> u8 {
        self.day.get()
    }

    /// Returns the month component
    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    /// Returns the year component
    pub const fn year(&self) -> u16 {
        self.year.get()
    }

    /// The next calendar day, rolling over month and year boundaries.
    /// Returns `None` past 31.12.9999 (`MAX_YEAR` limit).
    pub fn succ(self) -> Option<Self> {
        let (year, month, day) = (self.year.get(), self.month.get(), self.day.get());
        let (next_year, next_month, next_day) = if day < days_in_month(year, month) {
            (year, month, day + 1)
        } else if month < DECEMBER {
            (year, month + 1, MIN_DAY)
        } else if year < MAX_YEAR {
            (year + 1, JANUARY, MIN_DAY)
        } else {
            return None;
        };
        Self::from_ymd(next_year, next_month, next_day).ok()
    }

    /// Sum of the eight digits of the date rendered as zero-padded
    /// `DDMMYYYY`. Padding zeros contribute nothing, so the component
    /// sums are equivalent.
    pub const fn digit_sum(&self) -> u8 {
        self.day.digit_sum() + self.month.digit_sum() + self.year.digit_sum()
    }
}

impl FromStr for CivilDate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let parts: Vec<&str> = trimmed.split(DATE_SEPARATOR).map(str::trim).collect();
        if parts.len() != 3 {
            return Err(ParseError::InvalidFormat(format!(
                "Expected DD{DATE_SEPARATOR}MM{DATE_SEPARATOR}YYYY, got: {s}"
            )));
        }

        let day = Self::parse_u8(parts[0])?;
        let month = Self::parse_u8(parts[1])?;
        let year = Self::parse_u16(parts[2])?;

        Self::from_ymd(year, month, day)
    }
}

impl CivilDate {
    /// Helper to parse u16 with better error messages
    fn parse_u16(s: &str) -> Result<u16, ParseError> {
        s.parse::<u16>()
            .map_err(|_| ParseError::InvalidFormat(s.to_owned()))
    }

    /// Helper to parse u8 with better error messages
    fn parse_u8(s: &str) -> Result<u8, ParseError> {
        s.parse::<u8>()
            .map_err(|_| ParseError::InvalidFormat(s.to_owned()))
    }
}

impl serde::Serialize for CivilDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for CivilDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
