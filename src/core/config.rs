//! Simulation configuration with documented constants
//!
//! All tuned numbers are collected here with explanations of their purpose
//! and how they interact with each other. None of them are physical laws;
//! they set the pacing of the game.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{MangoError, Result};

/// Longest accepted interval in seconds (ten years)
pub const MAX_INTERVAL_SECS: i64 = 10 * 365 * 24 * 60 * 60;
/// Longest accepted interval in hours (ten years)
pub const MAX_INTERVAL_HOURS: i64 = MAX_INTERVAL_SECS / 3600;

/// Configuration for the pet simulation
///
/// Any field missing from a TOML file falls back to its default, so a
/// config file only needs to name the knobs it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    // === DECAY ===
    /// Seconds between decay ticks
    ///
    /// Each tick costs one point of hunger, happiness, cleanliness and
    /// energy. At 30s a fully fed pet (100) starves in under an hour of
    /// neglect.
    pub decay_interval_secs: i64,

    /// A meter at or below this value counts as neglected
    ///
    /// Any single neglected meter (hunger, cleanliness or energy) triggers
    /// the health penalty on a decay tick.
    pub neglect_threshold: u8,

    /// Health lost per decay tick while any meter is neglected
    pub neglect_health_penalty: u8,

    /// Health at or below this value latches the sick flag
    pub sickness_threshold: u8,

    // === RANDOM EVENTS ===
    /// Seconds between random-event rolls
    ///
    /// Only checked when a decay tick fires, so the effective cadence is
    /// rounded up to the next decay tick.
    pub event_interval_secs: i64,

    /// Probability that a roll produces an event (0.0-1.0)
    pub event_chance: f64,

    /// Health lost when a sickness event strikes a healthy pet
    pub sickness_event_health_loss: u8,

    /// Happiness lost on a misbehavior event
    pub misbehavior_happiness_loss: u8,

    // === AGING ===
    /// Hours since `last_updated` after which the pet ages one day
    ///
    /// One evaluation adds at most one day, however long the gap.
    pub aging_interval_hours: i64,

    // === EXTERNAL DATA ===
    /// Seconds a weather report stays valid before it is redrawn
    pub weather_refresh_secs: i64,

    /// Seconds a lovebird fact stays on screen before rotating
    pub fact_refresh_secs: i64,

    // === RANDOMNESS ===
    /// Seed for the simulation RNG; `None` draws a fresh seed per run
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            decay_interval_secs: 30,
            neglect_threshold: 10,
            neglect_health_penalty: 3,
            sickness_threshold: 30,

            event_interval_secs: 120,
            event_chance: 0.3,
            sickness_event_health_loss: 20,
            misbehavior_happiness_loss: 10,

            aging_interval_hours: 24,

            weather_refresh_secs: 1800,
            fact_refresh_secs: 3600,

            seed: None,
        }
    }
}

impl SimulationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style seed override
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Load and validate a config from a TOML file
    pub fn load_from_toml(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    /// Parse and validate a config from a TOML string
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: SimulationConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        // Intervals become chrono durations, which overflow long before i64 does
        let intervals = [
            ("decay_interval_secs", self.decay_interval_secs, MAX_INTERVAL_SECS),
            ("event_interval_secs", self.event_interval_secs, MAX_INTERVAL_SECS),
            ("aging_interval_hours", self.aging_interval_hours, MAX_INTERVAL_HOURS),
            ("weather_refresh_secs", self.weather_refresh_secs, MAX_INTERVAL_SECS),
            ("fact_refresh_secs", self.fact_refresh_secs, MAX_INTERVAL_SECS),
        ];
        for (name, value, max) in intervals {
            if value <= 0 {
                return Err(MangoError::Config(format!("{} must be positive, got {}", name, value)));
            }
            if value > max {
                return Err(MangoError::Config(format!("{} ({}) must be <= {}", name, value, max)));
            }
        }

        if !(0.0..=1.0).contains(&self.event_chance) {
            return Err(MangoError::Config(format!(
                "event_chance ({}) must be within 0.0..=1.0",
                self.event_chance
            )));
        }

        let thresholds = [
            ("neglect_threshold", self.neglect_threshold),
            ("neglect_health_penalty", self.neglect_health_penalty),
            ("sickness_threshold", self.sickness_threshold),
            ("sickness_event_health_loss", self.sickness_event_health_loss),
            ("misbehavior_happiness_loss", self.misbehavior_happiness_loss),
        ];
        for (name, value) in thresholds {
            if value > 100 {
                return Err(MangoError::Config(format!("{} ({}) must be <= 100", name, value)));
            }
        }

        Ok(())
    }
}
