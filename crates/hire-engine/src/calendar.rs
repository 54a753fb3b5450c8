//! Weekly opening hours of a hire point.
//!
//! Each weekday has at most one same-day window `[open, close]`. A weekday
//! without an entry is closed all day. Both boundaries count as open, so a
//! hire point closing at 20:00 is still open at 20:00:00 and closed at 20:00:01.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{BoatingError, Result};

/// Opening hours for one weekday. `day` follows ISO numbering: Monday = 1, Sunday = 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpeningHours {
    pub day: u8,
    pub open: NaiveTime,
    pub close: NaiveTime,
}

impl OpeningHours {
    fn validate(&self) -> Result<()> {
        if !(1..=7).contains(&self.day) {
            return Err(BoatingError::InvalidData(format!(
                "weekday must be between 1 and 7, got {}",
                self.day
            )));
        }
        if self.open > self.close {
            return Err(BoatingError::InvalidData(format!(
                "opening time {} is after closing time {} on weekday {}",
                self.open, self.close, self.day
            )));
        }
        Ok(())
    }

    /// Whether `time` lies within `[open, close]`.
    pub fn contains(&self, time: NaiveTime) -> bool {
        self.open <= time && time <= self.close
    }
}

/// The weekly opening hours of a hire point, keyed by ISO weekday.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<OpeningHours>", into = "Vec<OpeningHours>")]
pub struct Calendar {
    days: BTreeMap<u8, OpeningHours>,
}

impl Calendar {
    /// Build a calendar, rejecting duplicate weekdays and inverted windows.
    pub fn new(entries: impl IntoIterator<Item = OpeningHours>) -> Result<Self> {
        let mut calendar = Self::default();
        for entry in entries {
            calendar.insert(entry)?;
        }
        Ok(calendar)
    }

    /// Add the opening hours of a weekday that has none yet.
    pub fn insert(&mut self, entry: OpeningHours) -> Result<()> {
        entry.validate()?;
        if self.days.contains_key(&entry.day) {
            return Err(BoatingError::InvalidData(format!(
                "weekday {} already has opening hours",
                entry.day
            )));
        }
        self.days.insert(entry.day, entry);
        Ok(())
    }

    /// Opening hours for the weekday of `date`, if any.
    pub fn hours_on(&self, date: NaiveDate) -> Option<&OpeningHours> {
        self.days.get(&iso_weekday(date))
    }

    /// The opening and closing instants of `date`, or `None` when closed all day.
    pub fn open_interval(&self, date: NaiveDate) -> Option<(NaiveDateTime, NaiveDateTime)> {
        self.hours_on(date)
            .map(|hours| (date.and_time(hours.open), date.and_time(hours.close)))
    }

    /// Whether the hire point is open at `instant` (inclusive at both boundaries).
    pub fn is_open(&self, instant: NaiveDateTime) -> bool {
        self.hours_on(instant.date())
            .is_some_and(|hours| hours.contains(instant.time()))
    }

    pub fn entries(&self) -> impl Iterator<Item = &OpeningHours> {
        self.days.values()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

impl TryFrom<Vec<OpeningHours>> for Calendar {
    type Error = BoatingError;

    fn try_from(entries: Vec<OpeningHours>) -> Result<Self> {
        Self::new(entries)
    }
}

impl From<Calendar> for Vec<OpeningHours> {
    fn from(calendar: Calendar) -> Self {
        calendar.days.into_values().collect()
    }
}

fn iso_weekday(date: NaiveDate) -> u8 {
    // number_from_monday is always 1..=7
    date.weekday().number_from_monday() as u8
}
