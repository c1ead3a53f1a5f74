//! Tick system - orchestrates simulation updates
//!
//! One [`Simulation`] owns everything a running game needs: the pet, its
//! derived status, the cadence gates, the oracles, the store and the RNG.
//! Each call to [`Simulation::tick`] runs, in order:
//! decay (with the random-event check) -> aging -> sickness check -> game-over check
//!
//! Storage failures never escape this type. They are logged and play
//! continues on the in-memory state.

use chrono::{DateTime, Utc};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::actions::{self, ActionId};
use crate::core::calendar::DayPhase;
use crate::core::clock::ClockHandle;
use crate::core::config::SimulationConfig;
use crate::core::error::Result;
use crate::entity::mood::Mood;
use crate::entity::pet::PetState;
use crate::entity::status::{PetStatus, SicknessCause};
use crate::oracle::facts::FactOracle;
use crate::oracle::weather::{SimulatedWeather, WeatherOracle};
use crate::persistence::PetStore;
use crate::score::{ScoreLedger, ScoreOutcome};
use crate::simulation::aging::age_if_due;
use crate::simulation::decay::{apply_decay, DecayEngine};
use crate::simulation::events::{EventInjector, RandomEvent};

/// Events generated during a simulation tick
///
/// Returned by [`Simulation::tick`] for display in the UI log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SimulationEvent {
    /// A decay tick fired
    Decayed {
        /// Weather effect subtracted from happiness (0 when none)
        weather_penalty: i32,
    },
    /// Health dropped from neglect or a sickness event
    HealthLost { amount: u8, health: u8 },
    /// The sickness latch closed
    BecameSick { cause: SicknessCause },
    /// A misbehavior event fired
    Misbehaved { count: u32 },
    /// Mango is a day older
    Aged { age: u32 },
    /// Health reached 0 on this tick
    GameOver,
}

/// Read-only view handed to the renderer
#[derive(Debug, Clone, Serialize)]
pub struct PetSnapshot {
    pub state: PetState,
    pub mood: Mood,
    pub is_sick: bool,
    pub misbehavior_count: u32,
    pub high_score: u32,
    pub day_phase: DayPhase,
    pub weather: Option<String>,
    pub fact: &'static str,
    pub game_over: bool,
}

pub struct Simulation {
    config: SimulationConfig,
    clock: ClockHandle,
    store: Box<dyn PetStore>,
    weather: Box<dyn WeatherOracle>,
    facts: FactOracle,
    rng: ChaCha8Rng,
    pet: PetState,
    status: PetStatus,
    decay: DecayEngine,
    events: EventInjector,
    ledger: ScoreLedger,
    storage_healthy: bool,
}

impl Simulation {
    /// Start a session: prepare the store, load or hatch the pet, and
    /// read the high score. Only an invalid config is an error.
    pub fn new(config: SimulationConfig, mut store: Box<dyn PetStore>, clock: ClockHandle) -> Result<Self> {
        config.validate()?;

        let now = clock.now();
        let seed = config.seed.unwrap_or_else(|| rand::random());
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let weather = SimulatedWeather::new(rng.gen(), config.weather_refresh_secs);
        let facts = FactOracle::new(rng.gen(), config.fact_refresh_secs);

        let mut storage_healthy = true;
        if let Err(e) = store.init() {
            tracing::warn!("Store init failed, continuing in memory: {}", e);
            storage_healthy = false;
        }

        let (pet, hatched) = match store.load() {
            Ok(Some(pet)) => (pet, false),
            Ok(None) => (PetState::new(now), true),
            Err(e) => {
                tracing::warn!("Could not load Mango, starting fresh: {}", e);
                storage_healthy = false;
                (PetState::new(now), false)
            }
        };

        let ledger = match ScoreLedger::load(store.as_ref()) {
            Ok(ledger) => ledger,
            Err(e) => {
                tracing::warn!("Could not read score history: {}", e);
                storage_healthy = false;
                ScoreLedger::default()
            }
        };

        let mut sim = Self {
            decay: DecayEngine::new(now, config.decay_interval_secs),
            events: EventInjector::new(now, config.event_interval_secs),
            config,
            clock,
            store,
            weather: Box::new(weather),
            facts,
            rng,
            pet,
            status: PetStatus::new(),
            ledger,
            storage_healthy,
        };

        if hatched {
            tracing::info!("A new Mango hatched");
            sim.persist();
        } else {
            tracing::info!("Mango loaded (age {} days, health {})", sim.pet.age, sim.pet.health);
        }

        Ok(sim)
    }

    /// Swap in a different weather source
    pub fn with_weather(mut self, weather: Box<dyn WeatherOracle>) -> Self {
        self.weather = weather;
        self
    }

    /// Advance the simulation to the clock's current time
    pub fn tick(&mut self) -> Vec<SimulationEvent> {
        let now = self.clock.now();
        let mut events = Vec::new();
        let was_over = self.pet.is_game_over();

        if self.decay.is_due(now) {
            self.run_decay(now, &mut events);
        }

        if age_if_due(&mut self.pet, now, self.config.aging_interval_hours) {
            tracing::info!("Mango is now {} days old", self.pet.age);
            events.push(SimulationEvent::Aged { age: self.pet.age });
            self.persist();
        }

        if self.pet.health.value() <= self.config.sickness_threshold && self.status.fall_sick() {
            tracing::info!("Mango fell sick (health {})", self.pet.health);
            events.push(SimulationEvent::BecameSick {
                cause: SicknessCause::LowHealth,
            });
        }

        if !was_over && self.pet.is_game_over() {
            tracing::info!("Mango's health reached 0 at age {}", self.pet.age);
            events.push(SimulationEvent::GameOver);
        }

        events
    }

    fn run_decay(&mut self, now: DateTime<Utc>, events: &mut Vec<SimulationEvent>) {
        let weather_effect = self.weather.mood_effect(now);
        let report = apply_decay(&mut self.pet, &mut self.status, weather_effect, &self.config);
        tracing::debug!(
            "Decay tick: hunger={} happiness={} cleanliness={} energy={} health={}",
            self.pet.hunger,
            self.pet.happiness,
            self.pet.cleanliness,
            self.pet.energy,
            self.pet.health
        );

        events.push(SimulationEvent::Decayed {
            weather_penalty: report.weather_penalty,
        });
        if report.health_lost > 0 {
            events.push(SimulationEvent::HealthLost {
                amount: report.health_lost,
                health: self.pet.health.value(),
            });
        }
        if report.became_sick {
            tracing::info!("Mango fell sick (health {})", self.pet.health);
            events.push(SimulationEvent::BecameSick {
                cause: SicknessCause::LowHealth,
            });
        }

        let health_before = self.pet.health.value();
        let rolled = self
            .events
            .check(now, &mut self.rng, &mut self.pet, &mut self.status, &self.config);
        match rolled {
            Some(RandomEvent::Sickness) => {
                tracing::info!("Mango caught something");
                events.push(SimulationEvent::BecameSick {
                    cause: SicknessCause::RandomEvent,
                });
                events.push(SimulationEvent::HealthLost {
                    amount: health_before - self.pet.health.value(),
                    health: self.pet.health.value(),
                });
            }
            Some(RandomEvent::Misbehavior) => {
                events.push(SimulationEvent::Misbehaved {
                    count: self.status.misbehavior_count,
                });
            }
            None => {}
        }

        self.decay.reset(now);
        self.persist();
    }

    /// Run a care action. Returns false when its guard refused it.
    pub fn perform(&mut self, action: ActionId) -> bool {
        let outcome = actions::perform(action, &mut self.pet, &mut self.status);
        if outcome.reset_decay_clock {
            self.decay.reset(self.clock.now());
        }
        if outcome.persist {
            self.persist();
        }
        tracing::debug!("Action {} performed={}", action, outcome.performed);
        outcome.performed
    }

    pub fn feed(&mut self) -> bool {
        self.perform(ActionId::Feed)
    }

    pub fn bathe(&mut self) -> bool {
        self.perform(ActionId::Bathe)
    }

    pub fn play(&mut self) -> bool {
        self.perform(ActionId::Play)
    }

    pub fn rest(&mut self) -> bool {
        self.perform(ActionId::Rest)
    }

    pub fn give_medicine(&mut self) -> bool {
        self.perform(ActionId::Medicine)
    }

    pub fn discipline(&mut self) -> bool {
        self.perform(ActionId::Discipline)
    }

    /// Report a finished mini-game round
    pub fn record_score(&mut self, score: u32) -> Option<ScoreOutcome> {
        let outcome = self.ledger.record(self.store.as_mut(), score)?;
        if !outcome.stored {
            self.storage_healthy = false;
        }
        self.pet.happiness.raise(outcome.happiness_bonus);
        self.persist();
        Some(outcome)
    }

    /// Replace the pet with a newborn and clear derived status
    pub fn restart(&mut self) {
        self.pet = PetState::new(self.clock.now());
        self.status.reset();
        tracing::info!("Mango restarted");
        self.persist();
    }

    fn persist(&mut self) {
        match self.store.save(&self.pet) {
            Ok(()) => self.storage_healthy = true,
            Err(e) => {
                tracing::warn!("Could not save Mango: {}", e);
                self.storage_healthy = false;
            }
        }
    }

    pub fn pet(&self) -> &PetState {
        &self.pet
    }

    pub fn status(&self) -> &PetStatus {
        &self.status
    }

    pub fn mood(&self) -> Mood {
        Mood::classify(&self.pet, self.status.is_sick)
    }

    pub fn is_game_over(&self) -> bool {
        self.pet.is_game_over()
    }

    pub fn high_score(&self) -> u32 {
        self.ledger.high_score()
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// False after the most recent storage operation failed
    pub fn storage_healthy(&self) -> bool {
        self.storage_healthy
    }

    pub fn store(&self) -> &dyn PetStore {
        self.store.as_ref()
    }

    pub fn snapshot(&mut self) -> PetSnapshot {
        let now = self.clock.now();
        PetSnapshot {
            state: self.pet.clone(),
            mood: self.mood(),
            is_sick: self.status.is_sick,
            misbehavior_count: self.status.misbehavior_count,
            high_score: self.ledger.high_score(),
            day_phase: DayPhase::at(now),
            weather: self.weather.report(now).map(|r| r.description()),
            fact: self.facts.current(now),
            game_over: self.pet.is_game_over(),
        }
    }
}
