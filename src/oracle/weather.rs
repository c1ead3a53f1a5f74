//! Simulated weather feed
//!
//! Weather nudges Mango's mood. The real game would query a weather
//! service; here the report is drawn from a seeded RNG and cached for a
//! refresh interval, so a slow or failing source never holds up a tick.

use chrono::{DateTime, Duration, Utc};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Supplies the ambient mood pressure consumed by decay
pub trait WeatherOracle {
    /// Signed mood effect, within -15..=5
    fn mood_effect(&mut self, now: DateTime<Utc>) -> i32;

    /// The report behind the current effect, if there is one
    fn report(&mut self, now: DateTime<Utc>) -> Option<WeatherReport>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherCondition {
    Sunny,
    Cloudy,
    Rainy,
    Stormy,
    Snowy,
}

impl WeatherCondition {
    pub fn all() -> &'static [WeatherCondition] {
        &[
            WeatherCondition::Sunny,
            WeatherCondition::Cloudy,
            WeatherCondition::Rainy,
            WeatherCondition::Stormy,
            WeatherCondition::Snowy,
        ]
    }

    /// Mood effect of the condition alone
    pub fn mood_modifier(&self) -> i32 {
        match self {
            Self::Sunny => 5,
            Self::Cloudy => 0,
            Self::Rainy => -10,
            Self::Stormy => -10,
            Self::Snowy => -5,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Sunny => "Sunny",
            Self::Cloudy => "Cloudy",
            Self::Rainy => "Rainy",
            Self::Stormy => "Stormy",
            Self::Snowy => "Snowy",
        }
    }
}

pub const MIN_TEMPERATURE_C: i32 = -10;
pub const MAX_TEMPERATURE_C: i32 = 35;

/// Below freezing or above this, the temperature itself is unpleasant
const HOT_ABOVE_C: i32 = 30;
const COLD_BELOW_C: i32 = 0;
const TEMPERATURE_PENALTY: i32 = -5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub condition: WeatherCondition,
    pub temperature_c: i32,
}

impl WeatherReport {
    pub fn mood_effect(&self) -> i32 {
        let mut effect = self.condition.mood_modifier();
        if self.temperature_c < COLD_BELOW_C || self.temperature_c > HOT_ABOVE_C {
            effect += TEMPERATURE_PENALTY;
        }
        effect
    }

    pub fn description(&self) -> String {
        format!("{} weather, {}°C", self.condition.name(), self.temperature_c)
    }
}

impl Default for WeatherReport {
    fn default() -> Self {
        Self {
            condition: WeatherCondition::Sunny,
            temperature_c: 20,
        }
    }
}

/// Pseudo-random weather, redrawn once per refresh interval
#[derive(Debug, Clone)]
pub struct SimulatedWeather {
    rng: ChaCha8Rng,
    refresh: Duration,
    cached: Option<(WeatherReport, DateTime<Utc>)>,
}

impl SimulatedWeather {
    pub fn new(seed: u64, refresh_secs: i64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            refresh: Duration::seconds(refresh_secs),
            cached: None,
        }
    }

    fn draw(&mut self) -> WeatherReport {
        let condition = *WeatherCondition::all()
            .choose(&mut self.rng)
            .unwrap_or(&WeatherCondition::Sunny);
        let temperature_c = self.rng.gen_range(MIN_TEMPERATURE_C..=MAX_TEMPERATURE_C);
        WeatherReport { condition, temperature_c }
    }

    fn current(&mut self, now: DateTime<Utc>) -> WeatherReport {
        match self.cached {
            Some((report, fetched_at)) if now - fetched_at <= self.refresh => report,
            _ => {
                let report = self.draw();
                tracing::debug!("Weather refreshed: {}", report.description());
                self.cached = Some((report, now));
                report
            }
        }
    }
}

impl WeatherOracle for SimulatedWeather {
    fn mood_effect(&mut self, now: DateTime<Utc>) -> i32 {
        self.current(now).mood_effect()
    }

    fn report(&mut self, now: DateTime<Utc>) -> Option<WeatherReport> {
        Some(self.current(now))
    }
}

/// Weather that never changes; useful for scripted runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedWeather(pub WeatherReport);

impl WeatherOracle for FixedWeather {
    fn mood_effect(&mut self, _now: DateTime<Utc>) -> i32 {
        self.0.mood_effect()
    }

    fn report(&mut self, _now: DateTime<Utc>) -> Option<WeatherReport> {
        Some(self.0)
    }
}
