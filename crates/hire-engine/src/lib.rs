//! # hire-engine
//!
//! Availability and allocation engine for boat hire points.
//!
//! A hire point has weekly opening hours and a fleet of boats with fixed seat
//! capacities. The engine answers "which boats would seat this party in this
//! window", lists the bookable slots of a day, and commits reservations
//! atomically so that no boat is ever double-booked.
//!
//! ## Quick start
//!
//! ```rust
//! use chrono::{Duration, NaiveDate, NaiveTime};
//! use hire_engine::{
//!     Boat, BoatId, Calendar, Engine, Fleet, HirePoint, HirePointId, InMemoryStore, OpeningHours,
//! };
//!
//! let id = HirePointId(1);
//! let calendar = Calendar::new((1..=7).map(|day| OpeningHours {
//!     day,
//!     open: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
//!     close: NaiveTime::from_hms_opt(20, 0, 0).unwrap(),
//! }))
//! .unwrap();
//! let fleet = Fleet::new(vec![Boat::new(BoatId(1), id, 2), Boat::new(BoatId(2), id, 4)]);
//!
//! let store = InMemoryStore::new();
//! store
//!     .add_hire_point(HirePoint::new(id, "Lake", "", calendar, fleet))
//!     .unwrap();
//! let engine = Engine::new(store);
//!
//! let start = NaiveDate::from_ymd_opt(2016, 2, 1)
//!     .unwrap()
//!     .and_hms_opt(10, 0, 0)
//!     .unwrap();
//! let booking = engine
//!     .place_booking(id, "Ada", start, Duration::minutes(30), 4)
//!     .unwrap();
//! assert_eq!(booking.boats, vec![BoatId(2)]);
//! ```
//!
//! ## Modules
//!
//! - [`calendar`] — Weekly opening hours, `is_open` / `open_interval`
//! - [`fleet`] — The boats of a hire point
//! - [`ledger`] — Committed reservations and the overlap relation
//! - [`allocator`] — Greedy smallest-first boat selection
//! - [`scanner`] — Bookable slots and the display grid for a day
//! - [`booking`] — The booking transaction
//! - [`store`] — Repository traits and the in-memory store
//! - [`engine`] — `Engine` façade tying the above together
//! - [`config`] — Slot granularity and duration limits
//! - [`format`] — Human-readable durations and slot labels
//! - [`model`] — Identifiers, hire points, boats, reservations
//! - [`error`] — Error types

pub mod allocator;
pub mod booking;
pub mod calendar;
pub mod config;
pub mod engine;
pub mod error;
pub mod fleet;
pub mod format;
pub mod ledger;
pub mod model;
pub mod scanner;
pub mod store;

pub use allocator::allocate;
pub use calendar::{Calendar, OpeningHours};
pub use config::{EngineConfig, MAX_DURATION_MINUTES, SLOT_MINUTES};
pub use engine::Engine;
pub use error::BoatingError;
pub use fleet::Fleet;
pub use ledger::{overlaps, Ledger};
pub use model::{Boat, BoatId, HirePoint, HirePointId, NewReservation, Reservation, ReservationId};
pub use scanner::{AvailableSlot, GridSlot};
pub use store::{InMemoryStore, LedgerTransaction, Snapshot, Store};
