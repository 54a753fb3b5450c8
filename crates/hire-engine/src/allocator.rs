//! Greedy smallest-first boat selection.
//!
//! Free boats are visited in ascending order of capacity (ties by id):
//!
//! - a boat seating exactly the party wins outright, replacing anything picked so far;
//! - while the picked boats seat fewer than the party, the boat is picked;
//! - once the party fits, a boat larger than the party ends the scan.
//!
//! The result is reproducible but not minimal: the scan never backtracks.

use std::collections::BTreeSet;

use chrono::{Duration, NaiveDateTime};
use tracing::{debug, trace};

use crate::engine::Engine;
use crate::error::Result;
use crate::fleet::Fleet;
use crate::ledger::busy_boats;
use crate::model::{Boat, BoatId, HirePoint, HirePointId, Reservation};
use crate::store::Store;

/// Pick boats from `fleet` that are not in `busy` and together seat `party_size`.
///
/// Returns `None` when the free boats cannot seat the party, and for a party of zero.
pub fn allocate(fleet: &Fleet, busy: &BTreeSet<BoatId>, party_size: u32) -> Option<Vec<Boat>> {
    let party = u64::from(party_size);
    let mut selected: Vec<&Boat> = Vec::new();
    // u64: a running total of u32 capacities cannot overflow.
    let mut seats: u64 = 0;

    for boat in fleet.free_boats(busy) {
        if boat.seats == party_size {
            trace!(boat = %boat.id, "exact capacity match");
            return Some(vec![boat.clone()]);
        } else if party > seats {
            seats += u64::from(boat.seats);
            selected.push(boat);
        } else if boat.seats > party_size {
            break;
        }
    }

    if selected.is_empty() || seats < party {
        return None;
    }
    Some(selected.into_iter().cloned().collect())
}

/// Allocate against the reservations that clash with the requested window.
pub(crate) fn allocate_around(
    hire_point: &HirePoint,
    clashing: &[Reservation],
    party_size: u32,
) -> Option<Vec<Boat>> {
    let busy = busy_boats(clashing);
    let boats = allocate(&hire_point.fleet, &busy, party_size);
    debug!(
        hire_point = %hire_point.id,
        party_size,
        busy = busy.len(),
        selected = boats.as_ref().map_or(0, Vec::len),
        "allocation"
    );
    boats
}

impl<S: Store> Engine<S> {
    /// Boats that would seat `party_size` for `[start, start + duration)`, or `None`.
    ///
    /// Opening hours are not consulted here; [`Engine::place_booking`] checks them.
    pub fn select_boats(
        &self,
        hire_point: HirePointId,
        start: NaiveDateTime,
        party_size: u32,
        duration: Duration,
    ) -> Result<Option<Vec<Boat>>> {
        let site = self.store().hire_point(hire_point)?;
        self.select_boats_at(&site, start, party_size, duration)
    }

    pub(crate) fn select_boats_at(
        &self,
        site: &HirePoint,
        start: NaiveDateTime,
        party_size: u32,
        duration: Duration,
    ) -> Result<Option<Vec<Boat>>> {
        let end = start + duration;
        let clashing = self.store().overlapping(site.id, start, end)?;
        Ok(allocate_around(site, &clashing, party_size))
    }
}
