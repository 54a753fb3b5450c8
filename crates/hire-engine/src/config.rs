//! Slot granularity and duration limits.

use chrono::Duration;

use crate::error::{BoatingError, Result};

/// Length of one bookable slot, in minutes.
pub const SLOT_MINUTES: i64 = 15;

/// Longest bookable duration, in minutes.
pub const MAX_DURATION_MINUTES: i64 = 180;

/// Longest accepted customer name, in characters.
pub const MAX_NAME_LEN: usize = 50;

/// Tunables shared by the allocator, slot scanner and booking transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    slot_minutes: i64,
    max_duration_minutes: i64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            slot_minutes: SLOT_MINUTES,
            max_duration_minutes: MAX_DURATION_MINUTES,
        }
    }
}

impl EngineConfig {
    /// Build a config, requiring a positive slot that divides the maximum duration.
    pub fn new(slot_minutes: i64, max_duration_minutes: i64) -> Result<Self> {
        if slot_minutes <= 0 {
            return Err(BoatingError::InvalidInput(format!(
                "slot length must be positive, got {slot_minutes} minutes"
            )));
        }
        if max_duration_minutes < slot_minutes || max_duration_minutes % slot_minutes != 0 {
            return Err(BoatingError::InvalidInput(format!(
                "maximum duration of {max_duration_minutes} minutes is not a multiple of the {slot_minutes}-minute slot"
            )));
        }
        Ok(Self {
            slot_minutes,
            max_duration_minutes,
        })
    }

    pub fn slot_minutes(&self) -> i64 {
        self.slot_minutes
    }

    pub fn max_duration_minutes(&self) -> i64 {
        self.max_duration_minutes
    }

    pub fn slot(&self) -> Duration {
        Duration::minutes(self.slot_minutes)
    }

    pub fn max_duration(&self) -> Duration {
        Duration::minutes(self.max_duration_minutes)
    }

    /// Every bookable duration: one slot, two slots, ... up to the maximum.
    pub fn duration_choices(&self) -> Vec<Duration> {
        (1..=self.max_duration_minutes / self.slot_minutes)
            .map(|n| Duration::minutes(n * self.slot_minutes))
            .collect()
    }

    /// Reject durations that are not a positive whole number of slots within the maximum.
    pub fn validate_duration(&self, duration: Duration) -> Result<()> {
        let minutes = duration.num_minutes();
        let whole_minutes = Duration::minutes(minutes) == duration;
        if minutes <= 0
            || !whole_minutes
            || minutes % self.slot_minutes != 0
            || minutes > self.max_duration_minutes
        {
            return Err(BoatingError::InvalidInput(format!(
                "duration must be a multiple of {} minutes between {} and {} minutes, got {}s",
                self.slot_minutes,
                self.slot_minutes,
                self.max_duration_minutes,
                duration.num_seconds()
            )));
        }
        Ok(())
    }
}
