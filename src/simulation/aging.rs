//! Aging
//!
//! A pet ages one day once `aging_interval_hours` have passed since
//! `last_updated`. A single evaluation never adds more than one day, even
//! after a multi-day absence.

use chrono::{DateTime, Duration, Utc};

use crate::entity::pet::PetState;

/// Age the pet if due. Returns true when the age changed.
pub fn age_if_due(pet: &mut PetState, now: DateTime<Utc>, interval_hours: i64) -> bool {
    if now - pet.last_updated < Duration::hours(interval_hours) {
        return false;
    }
    pet.age = pet.age.saturating_add(1);
    pet.last_updated = now;
    true
}
