//! Care action definitions and catalog

use serde::{Deserialize, Serialize};

use crate::entity::pet::{PetState, StatKind};
use crate::entity::status::PetStatus;

/// Unique action identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionId {
    Feed,
    Bathe,
    Play,
    Rest,
    Medicine,
    Discipline,
}

// Effect sizes
pub const FEED_HUNGER: u8 = 25;
pub const FEED_HAPPINESS: u8 = 5;
pub const BATHE_CLEANLINESS: u8 = 30;
pub const BATHE_HAPPINESS: u8 = 10;
pub const PLAY_HAPPINESS: u8 = 20;
pub const PLAY_ENERGY_COST: u8 = 15;
/// Play needs strictly more energy than this
pub const PLAY_MIN_ENERGY: u8 = 10;
pub const REST_ENERGY: u8 = 30;
/// Medicine lifts these meters to at least this value
pub const MEDICINE_FLOOR: u8 = 25;
pub const MEDICINE_FLOOR_STATS: [StatKind; 3] = [StatKind::Hunger, StatKind::Cleanliness, StatKind::Energy];
pub const DISCIPLINE_HAPPINESS_COST: u8 = 5;

impl ActionId {
    pub fn all() -> &'static [ActionId] {
        &[
            ActionId::Feed,
            ActionId::Bathe,
            ActionId::Play,
            ActionId::Rest,
            ActionId::Medicine,
            ActionId::Discipline,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ActionId::Feed => "feed",
            ActionId::Bathe => "bathe",
            ActionId::Play => "play",
            ActionId::Rest => "rest",
            ActionId::Medicine => "medicine",
            ActionId::Discipline => "discipline",
        }
    }

    pub fn from_name(name: &str) -> Option<ActionId> {
        ActionId::all().iter().copied().find(|a| a.name() == name)
    }

    /// Medicine persists even when it changes nothing
    pub fn always_persists(&self) -> bool {
        matches!(self, ActionId::Medicine)
    }

    /// Whether the action restarts the decay interval
    pub fn resets_decay_clock(&self) -> bool {
        matches!(self, ActionId::Medicine)
    }

    pub fn availability(&self, pet: &PetState, status: &PetStatus) -> ActionAvailability {
        match self {
            ActionId::Feed if pet.hunger.is_full() => ActionAvailability::no("Mango is already full"),
            ActionId::Bathe if pet.cleanliness.is_full() => ActionAvailability::no("Mango is already clean"),
            ActionId::Play if pet.energy.value() <= PLAY_MIN_ENERGY => {
                ActionAvailability::no("Mango is too tired to play")
            }
            ActionId::Rest if pet.energy.is_full() => ActionAvailability::no("Mango is fully rested"),
            ActionId::Discipline if status.misbehavior_count == 0 => {
                ActionAvailability::no("Mango has been behaving")
            }
            _ => ActionAvailability::yes(),
        }
    }
}

impl std::fmt::Display for ActionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionAvailability {
    pub available: bool,
    pub reason: Option<String>,
}

impl ActionAvailability {
    pub fn yes() -> Self {
        Self { available: true, reason: None }
    }

    pub fn no(reason: impl Into<String>) -> Self {
        Self { available: false, reason: Some(reason.into()) }
    }
}
