//! Mango's persistent state
//!
//! The five care meters are [`Meter`] values, a `u8` that cannot leave
//! `0..=100`. Every arithmetic path saturates at the bounds, and the only
//! fallible constructors are the ones used at the deserialization boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::error::InvariantViolation;

/// A care meter clamped to `0..=100`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Meter(u8);

impl Meter {
    pub const MIN: u8 = 0;
    pub const MAX: u8 = 100;

    pub const EMPTY: Meter = Meter(Self::MIN);
    pub const FULL: Meter = Meter(Self::MAX);

    /// Build a meter, clamping out-of-range input to the nearest bound
    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(Self::MIN as i64, Self::MAX as i64) as u8)
    }

    /// Build a meter, rejecting out-of-range input
    pub fn checked(field: &'static str, value: i64) -> Result<Self, InvariantViolation> {
        if (Self::MIN as i64..=Self::MAX as i64).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(InvariantViolation {
                field,
                value,
                min: Self::MIN as i64,
                max: Self::MAX as i64,
            })
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn is_full(self) -> bool {
        self.0 >= Self::MAX
    }

    pub fn is_empty(self) -> bool {
        self.0 == Self::MIN
    }

    /// Add `amount`, capping at 100
    pub fn raise(&mut self, amount: u8) {
        self.0 = self.0.saturating_add(amount).min(Self::MAX);
        debug_assert!(self.0 <= Self::MAX);
    }

    /// Subtract `amount`, flooring at 0
    pub fn lower(&mut self, amount: u8) {
        self.0 = self.0.saturating_sub(amount);
    }

    /// Apply a signed delta, clamped at both ends
    pub fn shift(&mut self, delta: i32) {
        *self = Self::clamped(self.0 as i64 + delta as i64);
    }

    /// Raise to `floor` if currently below it; never lowers
    pub fn raise_to(&mut self, floor: u8) {
        if self.0 < floor {
            self.0 = floor.min(Self::MAX);
        }
    }
}

impl TryFrom<i64> for Meter {
    type Error = InvariantViolation;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::checked("meter", value)
    }
}

impl From<Meter> for u8 {
    fn from(meter: Meter) -> u8 {
        meter.0
    }
}

impl std::fmt::Display for Meter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

/// Which of the five meters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatKind {
    Hunger,
    Happiness,
    Cleanliness,
    Energy,
    Health,
}

impl StatKind {
    pub fn all() -> &'static [StatKind] {
        &[
            StatKind::Hunger,
            StatKind::Happiness,
            StatKind::Cleanliness,
            StatKind::Energy,
            StatKind::Health,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            StatKind::Hunger => "hunger",
            StatKind::Happiness => "happiness",
            StatKind::Cleanliness => "cleanliness",
            StatKind::Energy => "energy",
            StatKind::Health => "health",
        }
    }
}

/// The persisted pet record
///
/// Higher is better on every meter: `hunger` 100 means fully fed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetState {
    pub hunger: Meter,
    pub happiness: Meter,
    pub cleanliness: Meter,
    pub energy: Meter,
    /// 0 ends the game
    pub health: Meter,
    /// Whole days; never decreases
    pub age: u32,
    /// Wall-clock of the last aging step (or of the save that loaded it)
    pub last_updated: DateTime<Utc>,
}

impl PetState {
    pub const DEFAULT_HUNGER: u8 = 80;
    pub const DEFAULT_HAPPINESS: u8 = 70;
    pub const DEFAULT_CLEANLINESS: u8 = 60;
    pub const DEFAULT_ENERGY: u8 = 90;
    pub const DEFAULT_HEALTH: u8 = 100;

    /// A freshly hatched pet
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            hunger: Meter(Self::DEFAULT_HUNGER),
            happiness: Meter(Self::DEFAULT_HAPPINESS),
            cleanliness: Meter(Self::DEFAULT_CLEANLINESS),
            energy: Meter(Self::DEFAULT_ENERGY),
            health: Meter(Self::DEFAULT_HEALTH),
            age: 0,
            last_updated: now,
        }
    }

    pub fn meter(&self, kind: StatKind) -> Meter {
        match kind {
            StatKind::Hunger => self.hunger,
            StatKind::Happiness => self.happiness,
            StatKind::Cleanliness => self.cleanliness,
            StatKind::Energy => self.energy,
            StatKind::Health => self.health,
        }
    }

    pub fn meter_mut(&mut self, kind: StatKind) -> &mut Meter {
        match kind {
            StatKind::Hunger => &mut self.hunger,
            StatKind::Happiness => &mut self.happiness,
            StatKind::Cleanliness => &mut self.cleanliness,
            StatKind::Energy => &mut self.energy,
            StatKind::Health => &mut self.health,
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.health.is_empty()
    }

    /// Same meters and age, ignoring timestamps
    pub fn same_vitals(&self, other: &PetState) -> bool {
        StatKind::all().iter().all(|&k| self.meter(k) == other.meter(k)) && self.age == other.age
    }
}
