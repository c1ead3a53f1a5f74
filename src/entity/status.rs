//! Process-lifetime pet status
//!
//! These flags are derived during play and are not persisted; a restart of
//! the program clears them while the stored `PetState` survives.

use serde::{Deserialize, Serialize};

/// What made Mango sick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SicknessCause {
    /// Health fell to the sickness threshold
    LowHealth,
    /// A random sickness event
    RandomEvent,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetStatus {
    /// Latched on; only medicine clears it
    pub is_sick: bool,
    pub misbehavior_count: u32,
}

impl PetStatus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latch sickness. Returns true if the pet was healthy before.
    pub fn fall_sick(&mut self) -> bool {
        let was_healthy = !self.is_sick;
        self.is_sick = true;
        was_healthy
    }

    pub fn cure(&mut self) {
        self.is_sick = false;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
