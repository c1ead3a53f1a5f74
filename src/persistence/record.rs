//! On-disk record shapes
//!
//! Rows carry raw integers so that validation happens in one place, with
//! the offending field named, when a row is turned back into a `PetState`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::error::InvariantViolation;
use crate::entity::pet::{Meter, PetState};

/// The singleton `mango_state` row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateRow {
    pub id: u64,
    pub hunger: i64,
    pub happiness: i64,
    pub cleanliness: i64,
    pub energy: i64,
    pub health: i64,
    pub age: u32,
    pub last_updated: DateTime<Utc>,
}

impl StateRow {
    /// Row for `state`, stamped with the save time rather than the state's own timestamp
    pub fn stamped(id: u64, state: &PetState, saved_at: DateTime<Utc>) -> Self {
        Self {
            id,
            hunger: state.hunger.value() as i64,
            happiness: state.happiness.value() as i64,
            cleanliness: state.cleanliness.value() as i64,
            energy: state.energy.value() as i64,
            health: state.health.value() as i64,
            age: state.age,
            last_updated: saved_at,
        }
    }

    pub fn into_state(self) -> Result<PetState, InvariantViolation> {
        Ok(PetState {
            hunger: Meter::checked("hunger", self.hunger)?,
            happiness: Meter::checked("happiness", self.happiness)?,
            cleanliness: Meter::checked("cleanliness", self.cleanliness)?,
            energy: Meter::checked("energy", self.energy)?,
            health: Meter::checked("health", self.health)?,
            age: self.age,
            last_updated: self.last_updated,
        })
    }
}

/// One row of the append-only `scores` log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub id: u64,
    pub score: u32,
    pub recorded_at: DateTime<Utc>,
}
