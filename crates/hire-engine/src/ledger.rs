//! Committed reservations of a hire point and the overlap relation.

use std::collections::BTreeSet;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::model::{BoatId, Reservation};

/// Whether a reservation `[start_a, end_a)` conflicts with the query window `[start_b, end_b)`.
///
/// Intervals conflict when `start_a < end_b && end_a > start_b`. Two windows that
/// mirror each other exactly (`start_a == end_b && end_a == start_b`) also conflict;
/// with well-formed intervals that can only happen for zero-width windows at the
/// same instant. Adjacent windows (one ends when the other starts) do not conflict.
pub fn overlaps(
    start_a: NaiveDateTime,
    end_a: NaiveDateTime,
    start_b: NaiveDateTime,
    end_b: NaiveDateTime,
) -> bool {
    (start_a < end_b && end_a > start_b) || (start_a == end_b && end_a == start_b)
}

/// Union of the boats referenced by `reservations`.
pub fn busy_boats<'a>(reservations: impl IntoIterator<Item = &'a Reservation>) -> BTreeSet<BoatId> {
    reservations
        .into_iter()
        .flat_map(|reservation| reservation.boats.iter().copied())
        .collect()
}

/// Append-only list of the reservations of one hire point.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    reservations: Vec<Reservation>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every reservation overlapping `[start, end)`, in commit order.
    pub fn overlapping(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> impl Iterator<Item = &Reservation> {
        self.reservations
            .iter()
            .filter(move |r| overlaps(r.start, r.end, start, end))
    }

    /// Reservations touching `date`, ordered by start.
    pub fn on_day(&self, date: NaiveDate) -> Vec<&Reservation> {
        let (day_start, day_end) = day_bounds(date);
        let mut found: Vec<&Reservation> = self.overlapping(day_start, day_end).collect();
        found.sort_by_key(|r| (r.start, r.id));
        found
    }

    pub(crate) fn push(&mut self, reservation: Reservation) {
        self.reservations.push(reservation);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Reservation> {
        self.reservations.iter()
    }
}

impl Extend<Reservation> for Ledger {
    fn extend<I: IntoIterator<Item = Reservation>>(&mut self, iter: I) {
        self.reservations.extend(iter);
    }
}

/// Midnight of `date` to midnight of the following day.
fn day_bounds(date: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
    let start = date.and_time(NaiveTime::MIN);
    let end = date
        .succ_opt()
        .map_or(NaiveDateTime::MAX, |next| next.and_time(NaiveTime::MIN));
    (start, end)
}
