//! Walk a day slot by slot to find bookable start times.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::engine::Engine;
use crate::error::Result;
use crate::format;
use crate::model::{Boat, HirePointId};
use crate::store::Store;

/// A start time at which the party can be seated, with the boats it would get.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailableSlot {
    pub start: NaiveDateTime,
    pub boats: Vec<Boat>,
}

/// One row of the display grid. Unavailable slots carry no boats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSlot {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub available: bool,
    pub boats: Vec<Boat>,
}

impl GridSlot {
    /// `"09:00 AM - 09:30 AM"`.
    pub fn label(&self) -> String {
        format::slot_label(self.start, self.end)
    }

    /// `"2016-02-01 09:00:00"`.
    pub fn slot_id(&self) -> String {
        format::slot_id(self.start)
    }
}

impl<S: Store> Engine<S> {
    /// Start times from opening (inclusive) to closing (exclusive), one slot apart,
    /// at which [`Engine::select_boats`] finds boats for the party.
    ///
    /// Empty when the hire point is closed on `date`.
    pub fn available_slots(
        &self,
        hire_point: HirePointId,
        date: NaiveDate,
        party_size: u32,
        duration: Duration,
    ) -> Result<Vec<AvailableSlot>> {
        let site = self.store().hire_point(hire_point)?;
        let Some((opening, closing)) = site.calendar.open_interval(date) else {
            return Ok(Vec::new());
        };

        let step = self.config().slot();
        let mut slots = Vec::new();
        let mut start = opening;
        while start < closing {
            if let Some(boats) = self.select_boats_at(&site, start, party_size, duration)? {
                slots.push(AvailableSlot { start, boats });
            }
            start += step;
        }
        Ok(slots)
    }

    /// Every slot of `date` whose whole window fits before closing, marked with
    /// whether [`Engine::available_slots`] offers it.
    pub fn bookable_grid(
        &self,
        hire_point: HirePointId,
        date: NaiveDate,
        party_size: u32,
        duration: Duration,
    ) -> Result<Vec<GridSlot>> {
        let site = self.store().hire_point(hire_point)?;
        let Some((opening, closing)) = site.calendar.open_interval(date) else {
            return Ok(Vec::new());
        };
        let mut available = self
            .available_slots(hire_point, date, party_size, duration)?
            .into_iter()
            .peekable();

        let step = self.config().slot();
        let mut grid = Vec::new();
        let mut start = opening;
        while start + duration <= closing {
            // Both sequences ascend from `opening` in equal steps.
            while available.next_if(|slot| slot.start < start).is_some() {}
            let boats = available
                .next_if(|slot| slot.start == start)
                .map(|slot| slot.boats);
            grid.push(GridSlot {
                start,
                end: start + duration,
                available: boats.is_some(),
                boats: boats.unwrap_or_default(),
            });
            start += step;
        }
        Ok(grid)
    }
}
