//! Care action transitions
//!
//! Each action is a guarded single step over the pet. A failed guard is a
//! no-op, not an error. Persisting and clock resets are left to the caller,
//! driven by the returned [`ActionOutcome`].

use crate::actions::catalog::*;
use crate::entity::pet::{Meter, PetState};
use crate::entity::status::PetStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionOutcome {
    pub action: ActionId,
    /// The guard passed and the effect was applied
    pub performed: bool,
    /// The caller should save the pet now
    pub persist: bool,
    /// The caller should restart the decay interval from now
    pub reset_decay_clock: bool,
}

/// Apply `action` if its guard allows it
pub fn perform(action: ActionId, pet: &mut PetState, status: &mut PetStatus) -> ActionOutcome {
    let performed = action.availability(pet, status).available;
    if performed {
        apply(action, pet, status);
    }

    ActionOutcome {
        action,
        performed,
        persist: performed || action.always_persists(),
        reset_decay_clock: performed && action.resets_decay_clock(),
    }
}

fn apply(action: ActionId, pet: &mut PetState, status: &mut PetStatus) {
    match action {
        ActionId::Feed => {
            pet.hunger.raise(FEED_HUNGER);
            pet.happiness.raise(FEED_HAPPINESS);
        }
        ActionId::Bathe => {
            pet.cleanliness.raise(BATHE_CLEANLINESS);
            pet.happiness.raise(BATHE_HAPPINESS);
        }
        ActionId::Play => {
            pet.happiness.raise(PLAY_HAPPINESS);
            pet.energy.lower(PLAY_ENERGY_COST);
        }
        ActionId::Rest => {
            pet.energy.raise(REST_ENERGY);
        }
        ActionId::Medicine => {
            pet.health = Meter::FULL;
            status.cure();
            for kind in MEDICINE_FLOOR_STATS {
                pet.meter_mut(kind).raise_to(MEDICINE_FLOOR);
            }
        }
        ActionId::Discipline => {
            status.misbehavior_count = status.misbehavior_count.saturating_sub(1);
            pet.happiness.lower(DISCIPLINE_HAPPINESS_COST);
        }
    }
}
