//! Time-driven decay
//!
//! One decay tick fires per `decay_interval_secs` of wall-clock time:
//! 1. hunger, happiness, cleanliness and energy each drop by 1
//! 2. negative weather pressure is subtracted from happiness
//! 3. any meter that was neglected when the tick started costs health
//! 4. low health latches sickness
//!
//! Positive weather never applies here, so a decay tick can only leave each
//! meter the same or lower.

use chrono::{DateTime, Duration, Utc};

use crate::core::config::SimulationConfig;
use crate::entity::pet::PetState;
use crate::entity::status::PetStatus;

const NATURAL_DECAY: u8 = 1;

/// What one decay tick did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecayReport {
    /// Weather effect actually subtracted from happiness (<= 0)
    pub weather_penalty: i32,
    pub health_lost: u8,
    pub became_sick: bool,
}

/// Cadence gate for decay ticks
#[derive(Debug, Clone)]
pub struct DecayEngine {
    last_update: DateTime<Utc>,
    interval: Duration,
}

impl DecayEngine {
    pub fn new(now: DateTime<Utc>, interval_secs: i64) -> Self {
        Self {
            last_update: now,
            interval: Duration::seconds(interval_secs),
        }
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        now - self.last_update >= self.interval
    }

    /// Restart the interval from `now`
    pub fn reset(&mut self, now: DateTime<Utc>) {
        self.last_update = now;
    }

    pub fn last_update(&self) -> DateTime<Utc> {
        self.last_update
    }
}

/// Apply one decay tick to the pet
pub fn apply_decay(
    pet: &mut PetState,
    status: &mut PetStatus,
    weather_effect: i32,
    config: &SimulationConfig,
) -> DecayReport {
    let mut report = DecayReport::default();

    // Neglect is judged on the meters as they stood before this tick
    let neglect = config.neglect_threshold;
    let neglected =
        pet.hunger.value() <= neglect || pet.cleanliness.value() <= neglect || pet.energy.value() <= neglect;

    pet.hunger.lower(NATURAL_DECAY);
    pet.happiness.lower(NATURAL_DECAY);
    pet.cleanliness.lower(NATURAL_DECAY);
    pet.energy.lower(NATURAL_DECAY);

    if weather_effect < 0 {
        pet.happiness.shift(weather_effect);
        report.weather_penalty = weather_effect;
    }

    // Any one neglected meter is enough; the penalty does not stack
    if neglected {
        let before = pet.health.value();
        pet.health.lower(config.neglect_health_penalty);
        report.health_lost = before - pet.health.value();
    }

    if pet.health.value() <= config.sickness_threshold {
        report.became_sick = status.fall_sick();
    }

    report
}
