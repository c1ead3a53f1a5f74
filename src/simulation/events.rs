//! Random events
//!
//! Every `event_interval_secs` the injector makes one Bernoulli trial. On
//! success it picks sickness or misbehavior with equal odds. The interval
//! restarts whether or not anything happened.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::config::SimulationConfig;
use crate::entity::pet::PetState;
use crate::entity::status::PetStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RandomEvent {
    Sickness,
    Misbehavior,
}

impl RandomEvent {
    /// One trial: `Some(event)` with probability `chance`
    pub fn roll<R: Rng + ?Sized>(rng: &mut R, chance: f64) -> Option<RandomEvent> {
        if rng.gen::<f64>() < chance {
            if rng.gen_bool(0.5) {
                Some(RandomEvent::Sickness)
            } else {
                Some(RandomEvent::Misbehavior)
            }
        } else {
            None
        }
    }

    /// Apply the event. Returns false when it had no effect (sickness
    /// striking a pet that is already sick).
    pub fn apply(self, pet: &mut PetState, status: &mut PetStatus, config: &SimulationConfig) -> bool {
        match self {
            RandomEvent::Sickness => {
                if status.is_sick {
                    return false;
                }
                status.fall_sick();
                pet.health.lower(config.sickness_event_health_loss);
                true
            }
            RandomEvent::Misbehavior => {
                status.misbehavior_count = status.misbehavior_count.saturating_add(1);
                pet.happiness.lower(config.misbehavior_happiness_loss);
                true
            }
        }
    }
}

/// Cadence gate for random-event rolls
#[derive(Debug, Clone)]
pub struct EventInjector {
    last_roll: DateTime<Utc>,
    interval: Duration,
}

impl EventInjector {
    pub fn new(now: DateTime<Utc>, interval_secs: i64) -> Self {
        Self {
            last_roll: now,
            interval: Duration::seconds(interval_secs),
        }
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        now - self.last_roll >= self.interval
    }

    pub fn last_roll(&self) -> DateTime<Utc> {
        self.last_roll
    }

    /// Roll if due. Returns the event only when it changed the pet.
    pub fn check<R: Rng + ?Sized>(
        &mut self,
        now: DateTime<Utc>,
        rng: &mut R,
        pet: &mut PetState,
        status: &mut PetStatus,
        config: &SimulationConfig,
    ) -> Option<RandomEvent> {
        if !self.is_due(now) {
            return None;
        }
        self.last_roll = now;

        let event = RandomEvent::roll(rng, config.event_chance)?;
        tracing::debug!("Random event rolled: {:?}", event);
        if event.apply(pet, status, config) {
            Some(event)
        } else {
            None
        }
    }
}
