//! Mood derivation
//!
//! Mood is never stored. It is recomputed from the live meters and the
//! sickness flag, checking conditions in a fixed priority order.

use serde::{Deserialize, Serialize};

use crate::entity::pet::PetState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Sick,
    Dirty,
    Tired,
    Happy,
    Sad,
    Neutral,
}

const DIRTY_BELOW: u8 = 30;
const TIRED_BELOW: u8 = 20;
const HAPPY_ABOVE: u8 = 70;
const SAD_BELOW: u8 = 30;

impl Mood {
    /// First matching rule wins; the order is part of the contract.
    pub fn classify(state: &PetState, is_sick: bool) -> Mood {
        if is_sick {
            Mood::Sick
        } else if state.cleanliness.value() < DIRTY_BELOW {
            Mood::Dirty
        } else if state.energy.value() < TIRED_BELOW {
            Mood::Tired
        } else if state.happiness.value() > HAPPY_ABOVE {
            Mood::Happy
        } else if state.happiness.value() < SAD_BELOW {
            Mood::Sad
        } else {
            Mood::Neutral
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Mood::Sick => "sick",
            Mood::Dirty => "dirty",
            Mood::Tired => "tired",
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Neutral => "neutral",
        }
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
