//! Error types for hire-engine operations.

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::model::HirePointId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoatingError {
    /// The start or end of the requested window falls outside opening hours.
    #[error("hire point {hire_point} is closed at {at}")]
    Closed {
        hire_point: HirePointId,
        at: NaiveDateTime,
    },

    /// No combination of free boats seats the party in the requested window.
    #[error("no boats available at hire point {hire_point} for {party_size} people between {start} and {end}")]
    NoBoatsAvailable {
        hire_point: HirePointId,
        start: NaiveDateTime,
        end: NaiveDateTime,
        party_size: u32,
    },

    #[error("Unknown hire point: {0}")]
    UnknownHirePoint(HirePointId),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl BoatingError {
    /// Whether this error is one of the two booking refusals
    /// (`Closed` or `NoBoatsAvailable`) rather than a fault.
    pub fn is_booking_refusal(&self) -> bool {
        matches!(
            self,
            BoatingError::Closed { .. } | BoatingError::NoBoatsAvailable { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, BoatingError>;
