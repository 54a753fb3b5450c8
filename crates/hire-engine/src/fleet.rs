//! The boats owned by a hire point.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{BoatingError, Result};
use crate::model::{Boat, BoatId, HirePointId};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fleet {
    boats: Vec<Boat>,
}

impl Fleet {
    pub fn new(boats: Vec<Boat>) -> Self {
        Self { boats }
    }

    pub fn boats(&self) -> &[Boat] {
        &self.boats
    }

    pub fn get(&self, id: BoatId) -> Option<&Boat> {
        self.boats.iter().find(|boat| boat.id == id)
    }

    pub fn len(&self) -> usize {
        self.boats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boats.is_empty()
    }

    pub fn total_seats(&self) -> u64 {
        self.boats.iter().map(|boat| u64::from(boat.seats)).sum()
    }

    /// Boats not in `busy`, sorted by ascending capacity with ties broken by id.
    pub fn free_boats(&self, busy: &BTreeSet<BoatId>) -> Vec<&Boat> {
        let mut free: Vec<&Boat> = self
            .boats
            .iter()
            .filter(|boat| !busy.contains(&boat.id))
            .collect();
        free.sort_by_key(|boat| (boat.seats, boat.id));
        free
    }

    /// Check that every boat belongs to `owner`, seats at least one person,
    /// and that no boat id repeats.
    pub fn validate(&self, owner: HirePointId) -> Result<()> {
        let mut seen = HashSet::new();
        for boat in &self.boats {
            if boat.hire_point != owner {
                return Err(BoatingError::InvalidData(format!(
                    "boat {} belongs to hire point {}, not {}",
                    boat.id, boat.hire_point, owner
                )));
            }
            if boat.seats == 0 {
                return Err(BoatingError::InvalidData(format!(
                    "boat {} must have at least one seat",
                    boat.id
                )));
            }
            if !seen.insert(boat.id) {
                return Err(BoatingError::InvalidData(format!(
                    "boat {} appears twice in the fleet of hire point {}",
                    boat.id, owner
                )));
            }
        }
        Ok(())
    }
}

impl FromIterator<Boat> for Fleet {
    fn from_iter<I: IntoIterator<Item = Boat>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
