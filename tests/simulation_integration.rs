//! Integration tests for the simulation loop
//!
//! These tests drive a full `Simulation` on a `ManualClock`:
//! - neglect -> health loss -> sickness latch -> medicine
//! - aging across a long absence
//! - mini-game scores and the happiness bonus
//! - game over and restart
//! - play continuing when the store is broken

use std::rc::Rc;

use chrono::{DateTime, Duration, TimeZone, Utc};

use mango_pet::core::clock::{Clock, ManualClock};
use mango_pet::core::error::StorageError;
use mango_pet::entity::status::SicknessCause;
use mango_pet::oracle::weather::{FixedWeather, SimulatedWeather, WeatherCondition, WeatherReport};
use mango_pet::persistence::{MemoryStore, PetStore, ScoreRecord, StorageResult};
use mango_pet::{Meter, Mood, PetState, Simulation, SimulationConfig, SimulationEvent};

fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 10, 10, 0, 0).unwrap()
}

fn quiet_config() -> SimulationConfig {
    SimulationConfig {
        event_chance: 0.0,
        ..SimulationConfig::default().with_seed(42)
    }
}

fn cloudy() -> Box<FixedWeather> {
    Box::new(FixedWeather(WeatherReport {
        condition: WeatherCondition::Cloudy,
        temperature_c: 18,
    }))
}

/// Simulation over a memory store pre-seeded with `pet`
fn sim_with(pet: &PetState, config: SimulationConfig) -> (Simulation, Rc<ManualClock>) {
    let clock = Rc::new(ManualClock::new(start_time()));
    let store = MemoryStore::with_clock(clock.clone()).with_state(pet);
    let sim = Simulation::new(config, Box::new(store), clock.clone())
        .unwrap()
        .with_weather(cloudy());
    (sim, clock)
}

// ============================================================================
// Neglect and sickness
// ============================================================================

#[test]
fn test_neglect_leads_to_sickness_until_medicine() {
    let mut pet = PetState::new(start_time());
    pet.hunger = Meter::clamped(5);
    pet.health = Meter::clamped(32);
    let (mut sim, clock) = sim_with(&pet, quiet_config());

    clock.advance_secs(30);
    let events = sim.tick();
    assert_eq!(
        events,
        vec![
            SimulationEvent::Decayed { weather_penalty: 0 },
            SimulationEvent::HealthLost { amount: 3, health: 29 },
            SimulationEvent::BecameSick {
                cause: SicknessCause::LowHealth
            },
        ]
    );

    // The latch holds across further ticks
    for _ in 0..5 {
        clock.advance_secs(30);
        sim.tick();
        assert!(sim.status().is_sick);
        assert_eq!(sim.mood(), Mood::Sick);
    }

    assert!(sim.give_medicine());
    assert!(!sim.status().is_sick);
    assert_eq!(sim.pet().health.value(), 100);
    assert_eq!(sim.pet().hunger.value(), 25);

    // Medicine is saved even though nothing else happened
    let saved = sim.store().load().unwrap().unwrap();
    assert_eq!(saved.health.value(), 100);
}

#[test]
fn test_loaded_low_health_pet_is_sick_immediately() {
    let mut pet = PetState::new(start_time());
    pet.health = Meter::clamped(15);
    let (mut sim, _) = sim_with(&pet, quiet_config());

    assert!(!sim.status().is_sick);
    let events = sim.tick();
    assert_eq!(
        events,
        vec![SimulationEvent::BecameSick {
            cause: SicknessCause::LowHealth
        }]
    );
}

#[test]
fn test_random_event_fires_on_schedule() {
    let pet = PetState::new(start_time());
    let config = SimulationConfig {
        event_chance: 1.0,
        ..SimulationConfig::default().with_seed(7)
    };
    let (mut sim, clock) = sim_with(&pet, config);

    // Decay ticks at 30, 60, 90 do not roll yet
    for _ in 0..3 {
        clock.advance_secs(30);
        let events = sim.tick();
        assert_eq!(events.len(), 1);
    }

    clock.advance_secs(30);
    let events = sim.tick();
    let fired = events.iter().any(|e| {
        matches!(
            e,
            SimulationEvent::Misbehaved { count: 1 }
                | SimulationEvent::BecameSick {
                    cause: SicknessCause::RandomEvent
                }
        )
    });
    assert!(fired, "expected a random event, got {:?}", events);
}

#[test]
fn test_discipline_after_misbehavior() {
    let pet = PetState::new(start_time());
    let config = SimulationConfig {
        event_chance: 1.0,
        ..SimulationConfig::default().with_seed(7)
    };
    let (mut sim, clock) = sim_with(&pet, config);
    assert!(!sim.discipline());

    // Roll events until a misbehavior lands
    for _ in 0..200 {
        clock.advance_secs(120);
        sim.tick();
        sim.give_medicine();
        if sim.status().misbehavior_count > 0 {
            break;
        }
    }
    let count = sim.status().misbehavior_count;
    assert!(count > 0);

    let happiness = sim.pet().happiness.value();
    assert!(sim.discipline());
    assert_eq!(sim.status().misbehavior_count, count - 1);
    assert_eq!(sim.pet().happiness.value(), happiness.saturating_sub(5));
}

// ============================================================================
// Decay properties under random weather
// ============================================================================

#[test]
fn test_decay_never_raises_happiness_under_random_weather() {
    let pet = PetState::new(start_time());
    let config = quiet_config();
    let clock = Rc::new(ManualClock::new(start_time()));
    let store = MemoryStore::with_clock(clock.clone()).with_state(&pet);
    let mut sim = Simulation::new(config, Box::new(store), clock.clone())
        .unwrap()
        .with_weather(Box::new(SimulatedWeather::new(5, 60)));

    for _ in 0..300 {
        let before = sim.pet().clone();
        clock.advance_secs(30);
        sim.tick();
        let after = sim.pet();
        assert!(after.happiness <= before.happiness);
        assert!(after.hunger <= before.hunger);
        assert!(after.cleanliness <= before.cleanliness);
        assert!(after.energy <= before.energy);
    }
}

// ============================================================================
// Aging
// ============================================================================

#[test]
fn test_thirty_hour_absence_ages_one_day() {
    let pet = PetState::new(start_time() - Duration::hours(30));
    let (mut sim, _) = sim_with(&pet, quiet_config());

    let events = sim.tick();
    assert!(events.contains(&SimulationEvent::Aged { age: 1 }));
    assert_eq!(sim.pet().age, 1);

    sim.tick();
    assert_eq!(sim.pet().age, 1);
    assert_eq!(sim.store().load().unwrap().unwrap().age, 1);
}

#[test]
fn test_ages_again_after_another_day() {
    let pet = PetState::new(start_time());
    let (mut sim, clock) = sim_with(&pet, quiet_config());

    clock.advance(Duration::hours(24));
    sim.tick();
    clock.advance(Duration::hours(24));
    sim.tick();
    assert_eq!(sim.pet().age, 2);
}

// ============================================================================
// Score ledger
// ============================================================================

#[test]
fn test_score_ledger_tracks_high_score() {
    let pet = PetState::new(start_time());
    let (mut sim, _) = sim_with(&pet, quiet_config());

    for score in [3, 7, 1] {
        sim.record_score(score);
    }
    assert_eq!(sim.high_score(), 7);
    assert_eq!(sim.store().scores().unwrap().len(), 3);
    // 70 + 6 + 14 + 2
    assert_eq!(sim.pet().happiness.value(), 92);
}

#[test]
fn test_score_bonus_caps_happiness() {
    let mut pet = PetState::new(start_time());
    pet.happiness = Meter::clamped(95);
    let (mut sim, _) = sim_with(&pet, quiet_config());

    let outcome = sim.record_score(40).unwrap();
    assert_eq!(outcome.happiness_bonus, 25);
    assert_eq!(sim.pet().happiness.value(), 100);
}

#[test]
fn test_zero_score_changes_nothing() {
    let pet = PetState::new(start_time());
    let (mut sim, _) = sim_with(&pet, quiet_config());
    assert!(sim.record_score(0).is_none());
    assert_eq!(sim.pet().happiness.value(), 70);
    assert!(sim.store().scores().unwrap().is_empty());
}

// ============================================================================
// Game over and restart
// ============================================================================

#[test]
fn test_game_over_and_restart() {
    let mut pet = PetState::new(start_time());
    pet.health = Meter::clamped(3);
    pet.hunger = Meter::EMPTY;
    pet.age = 12;
    let (mut sim, clock) = sim_with(&pet, quiet_config());
    sim.record_score(4);

    clock.advance_secs(30);
    let events = sim.tick();
    assert!(events.contains(&SimulationEvent::GameOver));
    assert!(sim.is_game_over());

    // Reported once, not on every following tick
    clock.advance_secs(30);
    assert!(!sim.tick().contains(&SimulationEvent::GameOver));

    sim.restart();
    let fresh = PetState::new(clock.now());
    assert_eq!(sim.pet(), &fresh);
    assert!(!sim.status().is_sick);
    assert_eq!(sim.status().misbehavior_count, 0);
    assert!(!sim.is_game_over());
    // Score history survives a restart
    assert_eq!(sim.high_score(), 4);
    assert_eq!(sim.store().scores().unwrap().len(), 1);
}

// ============================================================================
// Degraded storage
// ============================================================================

/// A store whose every operation fails
struct BrokenStore;

fn broken() -> StorageError {
    StorageError::Io(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"))
}

impl PetStore for BrokenStore {
    fn init(&mut self) -> StorageResult<()> {
        Err(broken())
    }
    fn save(&mut self, _state: &PetState) -> StorageResult<()> {
        Err(broken())
    }
    fn load(&self) -> StorageResult<Option<PetState>> {
        Err(broken())
    }
    fn append_score(&mut self, _score: u32) -> StorageResult<()> {
        Err(broken())
    }
    fn scores(&self) -> StorageResult<Vec<ScoreRecord>> {
        Err(broken())
    }
}

#[test]
fn test_broken_store_falls_back_to_defaults() {
    let clock = Rc::new(ManualClock::new(start_time()));
    let mut sim = Simulation::new(quiet_config(), Box::new(BrokenStore), clock.clone())
        .unwrap()
        .with_weather(cloudy());

    assert!(!sim.storage_healthy());
    assert_eq!(sim.pet(), &PetState::new(start_time()));
    assert_eq!(sim.high_score(), 0);

    // Play goes on
    assert!(sim.bathe());
    assert_eq!(sim.pet().cleanliness.value(), 90);
    clock.advance_secs(30);
    sim.tick();
    assert_eq!(sim.pet().cleanliness.value(), 89);

    let outcome = sim.record_score(5).unwrap();
    assert!(!outcome.stored);
    assert_eq!(sim.high_score(), 5);
}

#[test]
fn test_huge_intervals_rejected_before_ticking() {
    let clock = Rc::new(ManualClock::new(start_time()));
    assert!(SimulationConfig::parse_toml("aging_interval_hours = 9223372036854775807").is_err());

    let config = SimulationConfig {
        event_interval_secs: i64::MAX,
        ..quiet_config()
    };
    assert!(Simulation::new(config, Box::new(MemoryStore::new()), clock.clone()).is_err());

    // The longest accepted intervals still tick
    let config = SimulationConfig::parse_toml("aging_interval_hours = 87600\nevent_interval_secs = 315360000\n").unwrap();
    let mut sim = Simulation::new(config, Box::new(MemoryStore::with_clock(clock.clone())), clock.clone()).unwrap();
    clock.advance_secs(30);
    sim.tick();
    assert_eq!(sim.pet().age, 0);
}

#[test]
fn test_invalid_config_rejected() {
    let clock = Rc::new(ManualClock::new(start_time()));
    let config = SimulationConfig {
        event_chance: -0.1,
        ..SimulationConfig::default()
    };
    assert!(Simulation::new(config, Box::new(MemoryStore::new()), clock).is_err());
}
