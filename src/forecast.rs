use serde::{Deserialize, Serialize};

use crate::CivilDate;
use crate::arcana::{PersonalConstant, day_value};
use crate::consts::MONTH_AHEAD_DAYS;
use crate::prelude::*;
use crate::range::DateRange;

/// A date paired with its computed day value.
/// Displays as the report line `DD.MM.YYYY: <value>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[display(fmt = "{date}: {value}")]
pub struct DailyValue {
    pub date: CivilDate,
    pub value: u8,
}

impl DailyValue {
    /// Computes the day value of `date` under `constant`.
    pub const fn on(date: CivilDate, constant: PersonalConstant) -> Self {
        Self {
            date,
            value: day_value(date, constant),
        }
    }
}

/// The value for today's local date.
pub fn today_value(constant: PersonalConstant) -> DailyValue {
    DailyValue::on(CivilDate::today(), constant)
}

/// Values for `days` consecutive dates starting at `start`, ascending.
/// Truncated only at the calendar ceiling (31.12.9999).
pub fn values_from(start: CivilDate, days: usize, constant: PersonalConstant) -> Vec<DailyValue> {
    let mut values = Vec::with_capacity(days);
    let mut current = start;
    for _ in 0..days {
        values.push(DailyValue::on(current, constant));
        match current.succ() {
            Some(next) => current = next,
            None => break,
        }
    }
    values
}

/// Values for today's local date through 29 days ahead: 30 dates.
pub fn month_ahead(constant: PersonalConstant) -> Vec<DailyValue> {
    values_from(CivilDate::today(), MONTH_AHEAD_DAYS, constant)
}

/// Values for every date of the range, both endpoints included.
/// The start <= end invariant is already enforced by [`DateRange`].
pub fn over_range(range: &DateRange, constant: PersonalConstant) -> Vec<DailyValue> {
    range
        .days()
        .map(|date| DailyValue::on(date, constant))
        .collect()
}
