//! Rotating lovebird trivia shown alongside the pet

use chrono::{DateTime, Duration, Utc};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub const LOVEBIRD_FACTS: &[&str] = &[
    "Lovebirds are native to Africa and Madagascar!",
    "Lovebirds can live up to 15 years in captivity!",
    "These birds got their name because they form strong pair bonds!",
    "Lovebirds are very social and can learn to mimic sounds!",
    "They can recognize themselves in mirrors!",
    "Lovebirds sleep with their heads tucked under their wings!",
    "They can fly up to 35 miles per hour!",
    "Lovebirds have excellent color vision!",
    "They communicate through various chirps and calls!",
    "These birds are known for their playful personalities!",
];

pub const FALLBACK_FACT: &str = "Birds are amazing creatures!";

/// Picks a fact and keeps it until the refresh interval passes
#[derive(Debug, Clone)]
pub struct FactOracle {
    rng: ChaCha8Rng,
    refresh: Duration,
    cached: Option<(&'static str, DateTime<Utc>)>,
}

impl FactOracle {
    pub fn new(seed: u64, refresh_secs: i64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            refresh: Duration::seconds(refresh_secs),
            cached: None,
        }
    }

    pub fn current(&mut self, now: DateTime<Utc>) -> &'static str {
        match self.cached {
            Some((fact, shown_at)) if now - shown_at <= self.refresh => fact,
            _ => {
                let fact = LOVEBIRD_FACTS.choose(&mut self.rng).copied().unwrap_or(FALLBACK_FACT);
                self.cached = Some((fact, now));
                fact
            }
        }
    }
}
