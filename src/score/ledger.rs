//! Mini-game score ledger
//!
//! The arcade mini-game reports each finished round here. Positive scores
//! are appended to the score log and earn Mango a happiness bonus.

use crate::persistence::{PetStore, StorageResult};

/// Largest happiness bonus one round can earn
pub const MAX_HAPPINESS_BONUS: u8 = 25;
pub const BONUS_PER_POINT: u32 = 2;

/// Result of recording one round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreOutcome {
    pub score: u32,
    pub happiness_bonus: u8,
    pub new_high_score: bool,
    /// False when the store refused the record; the round still counts in memory
    pub stored: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreLedger {
    high_score: u32,
}

impl ScoreLedger {
    pub fn new(high_score: u32) -> Self {
        Self { high_score }
    }

    /// Read the running maximum from the store
    pub fn load(store: &dyn PetStore) -> StorageResult<Self> {
        Ok(Self::new(store.max_score()?))
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn happiness_bonus(score: u32) -> u8 {
        score
            .saturating_mul(BONUS_PER_POINT)
            .min(MAX_HAPPINESS_BONUS as u32) as u8
    }

    /// Record a finished round. Rounds scoring 0 are ignored.
    pub fn record(&mut self, store: &mut dyn PetStore, score: u32) -> Option<ScoreOutcome> {
        if score == 0 {
            return None;
        }

        let stored = match store.append_score(score) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Could not store score {}: {}", score, e);
                false
            }
        };

        let new_high_score = score > self.high_score;
        if new_high_score {
            self.high_score = score;
            tracing::info!("New high score: {}", score);
        }

        Some(ScoreOutcome {
            score,
            happiness_bonus: Self::happiness_bonus(score),
            new_high_score,
            stored,
        })
    }
}
