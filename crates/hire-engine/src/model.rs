//! Identifiers and entities: hire points, boats, reservations.
//!
//! Relationships are expressed by id: a boat names its owning hire point, a
//! reservation names its hire point and the boats it occupies.

use std::fmt;

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::calendar::Calendar;
use crate::fleet::Fleet;

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }
    };
}

id_type!(
    /// Identity of a hire point.
    HirePointId
);
id_type!(
    /// Identity of a boat. Also the tie-breaker when ordering boats of equal capacity.
    BoatId
);
id_type!(
    /// Identity of a committed reservation, assigned by the store.
    ReservationId
);

/// A location that rents out boats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HirePoint {
    pub id: HirePointId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub calendar: Calendar,
    #[serde(default)]
    pub fleet: Fleet,
}

impl HirePoint {
    pub fn new(
        id: HirePointId,
        name: impl Into<String>,
        description: impl Into<String>,
        calendar: Calendar,
        fleet: Fleet,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            calendar,
            fleet,
        }
    }
}

impl fmt::Display for HirePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A boat with a fixed number of seats.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Boat {
    pub id: BoatId,
    pub hire_point: HirePointId,
    pub seats: u32,
}

impl Boat {
    pub fn new(id: BoatId, hire_point: HirePointId, seats: u32) -> Self {
        Self {
            id,
            hire_point,
            seats,
        }
    }
}

impl fmt::Display for Boat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Seats: {}", self.seats)
    }
}

/// A committed booking of one or more boats for a time window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: ReservationId,
    pub name: String,
    pub party_size: u32,
    pub hire_point: HirePointId,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub boats: Vec<BoatId>,
}

impl Reservation {
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn uses_boat(&self, boat: BoatId) -> bool {
        self.boats.contains(&boat)
    }
}

/// A reservation that has not been committed yet; the store assigns its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReservation {
    pub name: String,
    pub party_size: u32,
    pub hire_point: HirePointId,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub boats: Vec<BoatId>,
}

impl NewReservation {
    pub(crate) fn into_reservation(self, id: ReservationId) -> Reservation {
        Reservation {
            id,
            name: self.name,
            party_size: self.party_size,
            hire_point: self.hire_point,
            start: self.start,
            end: self.end,
            boats: self.boats,
        }
    }
}
