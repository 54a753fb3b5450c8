//! Storage abstraction and the in-memory store.
//!
//! [`Store`] is the repository the engine reads reference data and
//! reservations from. Mutation only happens through [`Store::transaction`],
//! which hands the closure a [`LedgerTransaction`] scoped to one hire point:
//! the closure's reads and writes are isolated from concurrent transactions on
//! the same hire point, staged writes are applied when the closure returns
//! `Ok`, and discarded when it returns `Err`.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{BoatingError, Result};
use crate::ledger::{busy_boats, overlaps, Ledger};
use crate::model::{BoatId, HirePoint, HirePointId, NewReservation, Reservation, ReservationId};

/// Read access to hire points and reservations, plus a transactional write path.
pub trait Store {
    /// The hire point with its calendar and fleet.
    fn hire_point(&self, id: HirePointId) -> Result<HirePoint>;

    /// All hire points, ordered by id.
    fn hire_points(&self) -> Result<Vec<HirePoint>>;

    /// Committed reservations of `hire_point` overlapping `[start, end)`.
    fn overlapping(
        &self,
        hire_point: HirePointId,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<Reservation>>;

    /// Committed reservations of `hire_point` touching `date`, ordered by start.
    fn reservations_on(&self, hire_point: HirePointId, date: NaiveDate) -> Result<Vec<Reservation>>;

    /// Run `f` as one atomic, isolated unit against the ledger of `hire_point`.
    fn transaction<T, F>(&self, hire_point: HirePointId, f: F) -> Result<T>
    where
        F: FnOnce(&mut dyn LedgerTransaction) -> Result<T>;
}

/// The view of one hire point's ledger inside a transaction.
pub trait LedgerTransaction {
    /// Reservations overlapping `[start, end)`, including ones committed earlier
    /// in this transaction.
    fn overlapping(&self, start: NaiveDateTime, end: NaiveDateTime) -> Vec<Reservation>;

    /// Stage a new reservation and return it with its assigned id.
    fn commit(&mut self, reservation: NewReservation) -> Result<Reservation>;
}

/// Serializable contents of a store: reference data plus every reservation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub hire_points: Vec<HirePoint>,
    #[serde(default)]
    pub reservations: Vec<Reservation>,
}

impl Snapshot {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| BoatingError::InvalidData(e.to_string()))
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| BoatingError::InvalidData(e.to_string()))
    }
}

#[derive(Debug)]
struct Site {
    hire_point: HirePoint,
    ledger: Mutex<Ledger>,
}

/// A [`Store`] held in memory, with one lock per hire point ledger.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    sites: RwLock<BTreeMap<HirePointId, Arc<Site>>>,
    last_reservation_id: AtomicU64,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a snapshot, validating reference data and every reservation.
    pub fn from_snapshot(snapshot: Snapshot) -> Result<Self> {
        let store = Self::new();
        for hire_point in snapshot.hire_points {
            store.add_hire_point(hire_point)?;
        }
        let mut reservations = snapshot.reservations;
        reservations.sort_by_key(|r| r.id);
        for reservation in reservations {
            store.insert_reservation(reservation)?;
        }
        Ok(store)
    }

    /// Copy out the full contents, reservations ordered by id.
    pub fn snapshot(&self) -> Result<Snapshot> {
        let sites = self.sites.read().map_err(|_| lock_poisoned())?;
        let mut snapshot = Snapshot::default();
        for site in sites.values() {
            snapshot.hire_points.push(site.hire_point.clone());
            let ledger = site.ledger.lock().map_err(|_| lock_poisoned())?;
            snapshot.reservations.extend(ledger.iter().cloned());
        }
        snapshot.reservations.sort_by_key(|r| r.id);
        Ok(snapshot)
    }

    /// Register a hire point. Its id and boat ids must be unused and its fleet valid.
    pub fn add_hire_point(&self, hire_point: HirePoint) -> Result<()> {
        hire_point.fleet.validate(hire_point.id)?;

        let mut sites = self.sites.write().map_err(|_| lock_poisoned())?;
        if sites.contains_key(&hire_point.id) {
            return Err(BoatingError::InvalidData(format!(
                "hire point {} already exists",
                hire_point.id
            )));
        }
        let taken: BTreeSet<BoatId> = sites
            .values()
            .flat_map(|site| site.hire_point.fleet.boats().iter().map(|boat| boat.id))
            .collect();
        if let Some(boat) = hire_point
            .fleet
            .boats()
            .iter()
            .find(|boat| taken.contains(&boat.id))
        {
            return Err(BoatingError::InvalidData(format!(
                "boat {} already belongs to another hire point",
                boat.id
            )));
        }

        debug!(hire_point = %hire_point.id, boats = hire_point.fleet.len(), "registered hire point");
        sites.insert(
            hire_point.id,
            Arc::new(Site {
                hire_point,
                ledger: Mutex::new(Ledger::new()),
            }),
        );
        Ok(())
    }

    /// Insert an already-committed reservation, keeping its id.
    fn insert_reservation(&self, reservation: Reservation) -> Result<()> {
        let site = self.site(reservation.hire_point)?;
        let mut ledger = site.ledger.lock().map_err(|_| lock_poisoned())?;
        check_reservation(
            &site.hire_point,
            reservation.hire_point,
            reservation.party_size,
            reservation.start,
            reservation.end,
            &reservation.boats,
        )?;
        if ledger.iter().any(|r| r.id == reservation.id) {
            return Err(BoatingError::InvalidData(format!(
                "reservation {} appears twice",
                reservation.id
            )));
        }
        check_boats_free(
            ledger.overlapping(reservation.start, reservation.end),
            &reservation.boats,
        )?;
        self.last_reservation_id
            .fetch_max(reservation.id.0, Ordering::SeqCst);
        ledger.push(reservation);
        Ok(())
    }

    fn site(&self, id: HirePointId) -> Result<Arc<Site>> {
        let sites = self.sites.read().map_err(|_| lock_poisoned())?;
        sites
            .get(&id)
            .cloned()
            .ok_or(BoatingError::UnknownHirePoint(id))
    }
}

impl Store for InMemoryStore {
    fn hire_point(&self, id: HirePointId) -> Result<HirePoint> {
        Ok(self.site(id)?.hire_point.clone())
    }

    fn hire_points(&self) -> Result<Vec<HirePoint>> {
        let sites = self.sites.read().map_err(|_| lock_poisoned())?;
        Ok(sites.values().map(|site| site.hire_point.clone()).collect())
    }

    fn overlapping(
        &self,
        hire_point: HirePointId,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<Reservation>> {
        let site = self.site(hire_point)?;
        let ledger = site.ledger.lock().map_err(|_| lock_poisoned())?;
        Ok(ledger.overlapping(start, end).cloned().collect())
    }

    fn reservations_on(&self, hire_point: HirePointId, date: NaiveDate) -> Result<Vec<Reservation>> {
        let site = self.site(hire_point)?;
        let ledger = site.ledger.lock().map_err(|_| lock_poisoned())?;
        Ok(ledger.on_day(date).into_iter().cloned().collect())
    }

    fn transaction<T, F>(&self, hire_point: HirePointId, f: F) -> Result<T>
    where
        F: FnOnce(&mut dyn LedgerTransaction) -> Result<T>,
    {
        let site = self.site(hire_point)?;
        // Held for the whole closure: transactions on one hire point are serialized.
        let mut ledger = site.ledger.lock().map_err(|_| lock_poisoned())?;

        let mut tx = MemoryTransaction {
            hire_point: &site.hire_point,
            ledger: &ledger,
            staged: Vec::new(),
            ids: &self.last_reservation_id,
        };
        let result = f(&mut tx);
        let staged = tx.staged;

        match result {
            Ok(value) => {
                debug!(hire_point = %hire_point, committed = staged.len(), "transaction committed");
                ledger.extend(staged);
                Ok(value)
            }
            Err(err) => {
                debug!(hire_point = %hire_point, discarded = staged.len(), error = %err, "transaction rolled back");
                Err(err)
            }
        }
    }
}

struct MemoryTransaction<'a> {
    hire_point: &'a HirePoint,
    ledger: &'a Ledger,
    staged: Vec<Reservation>,
    ids: &'a AtomicU64,
}

impl LedgerTransaction for MemoryTransaction<'_> {
    fn overlapping(&self, start: NaiveDateTime, end: NaiveDateTime) -> Vec<Reservation> {
        self.ledger
            .overlapping(start, end)
            .chain(
                self.staged
                    .iter()
                    .filter(|r| overlaps(r.start, r.end, start, end)),
            )
            .cloned()
            .collect()
    }

    fn commit(&mut self, reservation: NewReservation) -> Result<Reservation> {
        check_reservation(
            self.hire_point,
            reservation.hire_point,
            reservation.party_size,
            reservation.start,
            reservation.end,
            &reservation.boats,
        )?;
        let clashing = self.overlapping(reservation.start, reservation.end);
        check_boats_free(clashing.iter(), &reservation.boats)?;

        let id = ReservationId(self.ids.fetch_add(1, Ordering::SeqCst) + 1);
        let committed = reservation.into_reservation(id);
        self.staged.push(committed.clone());
        Ok(committed)
    }
}

fn check_reservation(
    site: &HirePoint,
    hire_point: HirePointId,
    party_size: u32,
    start: NaiveDateTime,
    end: NaiveDateTime,
    boats: &[BoatId],
) -> Result<()> {
    if hire_point != site.id {
        return Err(BoatingError::InvalidData(format!(
            "reservation for hire point {hire_point} filed under hire point {}",
            site.id
        )));
    }
    if party_size == 0 {
        return Err(BoatingError::InvalidData(
            "reservation party size must be at least 1".to_string(),
        ));
    }
    if end <= start {
        return Err(BoatingError::InvalidData(format!(
            "reservation must end after it starts ({start} - {end})"
        )));
    }
    if boats.is_empty() {
        return Err(BoatingError::InvalidData(
            "reservation must reference at least one boat".to_string(),
        ));
    }
    let mut seen = BTreeSet::new();
    for boat in boats {
        if site.fleet.get(*boat).is_none() {
            return Err(BoatingError::InvalidData(format!(
                "boat {boat} does not belong to hire point {}",
                site.id
            )));
        }
        if !seen.insert(*boat) {
            return Err(BoatingError::InvalidData(format!(
                "boat {boat} is referenced twice"
            )));
        }
    }
    Ok(())
}

fn check_boats_free<'a>(
    clashing: impl IntoIterator<Item = &'a Reservation>,
    boats: &[BoatId],
) -> Result<()> {
    let busy = busy_boats(clashing);
    match boats.iter().find(|boat| busy.contains(boat)) {
        Some(boat) => Err(BoatingError::InvalidData(format!(
            "boat {boat} is already reserved in that window"
        ))),
        None => Ok(()),
    }
}

fn lock_poisoned() -> BoatingError {
    BoatingError::Storage("store lock poisoned".to_string())
}
