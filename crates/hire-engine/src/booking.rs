//! The booking transaction: check opening hours, allocate, commit.
//!
//! Everything between reading the clashing reservations and committing the
//! new one runs inside a single [`Store::transaction`], so two concurrent
//! bookings can never both be handed the same free boat.

use chrono::{Duration, NaiveDateTime};
use tracing::{info, warn};

use crate::allocator::allocate_around;
use crate::config::MAX_NAME_LEN;
use crate::engine::Engine;
use crate::error::{BoatingError, Result};
use crate::model::{HirePointId, NewReservation, Reservation};
use crate::store::Store;

impl<S: Store> Engine<S> {
    /// Reserve boats seating `party_size` at `hire_point` for `[start, start + duration)`.
    ///
    /// # Errors
    /// - [`BoatingError::InvalidInput`] for an empty or overlong name, a party of zero,
    ///   or a duration that is not a whole number of slots within the maximum.
    /// - [`BoatingError::Closed`] if the hire point is not open at `start` or at
    ///   `start + duration`. Only the two endpoints are checked.
    /// - [`BoatingError::NoBoatsAvailable`] if the free boats cannot seat the party.
    ///
    /// Nothing is committed when an error is returned.
    pub fn place_booking(
        &self,
        hire_point: HirePointId,
        name: &str,
        start: NaiveDateTime,
        duration: Duration,
        party_size: u32,
    ) -> Result<Reservation> {
        let name = name.trim();
        if name.is_empty() || name.chars().count() > MAX_NAME_LEN {
            return Err(BoatingError::InvalidInput(format!(
                "name must be between 1 and {MAX_NAME_LEN} characters"
            )));
        }
        if party_size == 0 {
            return Err(BoatingError::InvalidInput(
                "party size must be at least 1".to_string(),
            ));
        }
        self.config().validate_duration(duration)?;

        let site = self.store().hire_point(hire_point)?;
        let end = start + duration;

        let outcome = self.store().transaction(hire_point, |tx| {
            for at in [start, end] {
                if !site.calendar.is_open(at) {
                    return Err(BoatingError::Closed { hire_point, at });
                }
            }

            let clashing = tx.overlapping(start, end);
            let boats = allocate_around(&site, &clashing, party_size).ok_or(
                BoatingError::NoBoatsAvailable {
                    hire_point,
                    start,
                    end,
                    party_size,
                },
            )?;

            tx.commit(NewReservation {
                name: name.to_string(),
                party_size,
                hire_point,
                start,
                end,
                boats: boats.iter().map(|boat| boat.id).collect(),
            })
        });

        match &outcome {
            Ok(reservation) => info!(
                reservation = %reservation.id,
                hire_point = %hire_point,
                %start,
                %end,
                party_size,
                boats = ?reservation.boats,
                "booking placed"
            ),
            Err(err) => warn!(hire_point = %hire_point, %start, party_size, error = %err, "booking refused"),
        }
        outcome
    }
}
