//! The engine façade: a store plus configuration.
//!
//! Operations are spread over the component modules as `impl Engine` blocks:
//! [`crate::allocator`], [`crate::scanner`], [`crate::booking`].

use chrono::{NaiveDate, NaiveDateTime};

use crate::config::EngineConfig;
use crate::error::Result;
use crate::model::{HirePoint, HirePointId, Reservation};
use crate::store::Store;

#[derive(Debug)]
pub struct Engine<S> {
    store: S,
    config: EngineConfig,
}

impl<S: Store> Engine<S> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, EngineConfig::default())
    }

    pub fn with_config(store: S, config: EngineConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn hire_points(&self) -> Result<Vec<HirePoint>> {
        self.store.hire_points()
    }

    /// Whether `hire_point` is open at `instant`, boundaries included.
    pub fn is_open(&self, hire_point: HirePointId, instant: NaiveDateTime) -> Result<bool> {
        Ok(self.store.hire_point(hire_point)?.calendar.is_open(instant))
    }

    /// Opening and closing instants of `hire_point` on `date`; `None` when closed all day.
    pub fn open_interval(
        &self,
        hire_point: HirePointId,
        date: NaiveDate,
    ) -> Result<Option<(NaiveDateTime, NaiveDateTime)>> {
        Ok(self.store.hire_point(hire_point)?.calendar.open_interval(date))
    }

    /// Reservations touching `date`, earliest first.
    pub fn reservations_on(
        &self,
        hire_point: HirePointId,
        date: NaiveDate,
    ) -> Result<Vec<Reservation>> {
        self.store.reservations_on(hire_point, date)
    }
}
