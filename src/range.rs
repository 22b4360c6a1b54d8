use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{CivilDate, ParseError, RANGE_SEPARATOR, prelude::*};

/// An inclusive range between two calendar dates.
/// The start date must be less than or equal to the end date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{start}-{end}")]
pub struct DateRange {
    start: CivilDate,
    end: CivilDate,
}

/// Error type for date range operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    /// Start date is after end date.
    #[error("Invalid date range: start ({start}) is after end ({end})")]
    Inverted { start: CivilDate, end: CivilDate },

    /// Error parsing one of the two dates.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Invalid range format.
    #[error("Invalid range format: {0}")]
    InvalidFormat(String),
}

impl DateRange {
    /// Creates a new date range with validation.
    ///
    /// # Errors
    /// Returns `RangeError::Inverted` if start > end.
    pub fn new(start: CivilDate, end: CivilDate) -> Result<Self, RangeError> {
        if start > end {
            return Err(RangeError::Inverted { start, end });
        }
        Ok(Self { start, end })
    }

    /// Returns the start date of the range
    pub const fn start(&self) -> CivilDate {
        self.start
    }

    /// Returns the end date of the range
    pub const fn end(&self) -> CivilDate {
        self.end
    }

    /// Ascending iterator over every date of the range, both endpoints
    /// included. A one-day range yields exactly its single date.
    pub const fn days(&self) -> Days {
        Days {
            next: Some(self.start),
            end: self.end,
        }
    }
}

/// Iterator returned by [`DateRange::days`].
#[derive(Debug, Clone)]
pub struct Days {
    next: Option<CivilDate>,
    end: CivilDate,
}

impl Iterator for Days {
    type Item = CivilDate;

    fn next(&mut self) -> Option<CivilDate> {
        let current = self.next?;
        if current > self.end {
            self.next = None;
            return None;
        }
        self.next = current.succ();
        Some(current)
    }
}

impl FromStr for DateRange {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        let separator_count = trimmed.matches(RANGE_SEPARATOR).count();
        match separator_count {
            0 => Err(RangeError::InvalidFormat(format!(
                "No range separator found (expected '{RANGE_SEPARATOR}'): {s}"
            ))),
            1 => {
                let pos = trimmed.find(RANGE_SEPARATOR).ok_or_else(|| {
                    RangeError::InvalidFormat(format!(
                        "Separator '{RANGE_SEPARATOR}' not found despite count == 1"
                    ))
                })?;
                let start = trimmed[..pos].trim().parse::<CivilDate>()?;
                let end = trimmed[pos + 1..].trim().parse::<CivilDate>()?;

                Self::new(start, end)
            }
            _ => Err(RangeError::InvalidFormat(format!(
                "Too many '{RANGE_SEPARATOR}' separators: expected 1, found {separator_count}"
            ))),
        }
    }
}

impl Serialize for DateRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for DateRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
