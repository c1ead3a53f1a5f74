//! Durable pet state and score history
//!
//! Two tables, conceptually:
//! - `mango_state`: exactly one live row. A save replaces it wholesale.
//! - `scores`: append-only mini-game results, never rewritten.
//!
//! Stores report every failure as a [`StorageError`]. Whether to degrade
//! to in-memory play is the caller's decision, not the store's.

pub mod json_store;
pub mod memory;
pub mod record;

use crate::core::error::StorageError;
use crate::entity::pet::PetState;

pub use json_store::JsonFileStore;
pub use memory::MemoryStore;
pub use record::{ScoreRecord, StateRow};

pub type StorageResult<T> = std::result::Result<T, StorageError>;

pub trait PetStore {
    /// Create the backing schema if absent. Safe to call on every start.
    fn init(&mut self) -> StorageResult<()>;

    /// Replace the live row with `state`, stamping `last_updated` with the
    /// current time. Readers see either the old row or the new one.
    fn save(&mut self, state: &PetState) -> StorageResult<()>;

    /// The live row, or `None` if no pet was ever saved
    fn load(&self) -> StorageResult<Option<PetState>>;

    /// Append one score record
    fn append_score(&mut self, score: u32) -> StorageResult<()>;

    /// Highest recorded score, 0 when there are none
    fn max_score(&self) -> StorageResult<u32> {
        Ok(self.scores()?.iter().map(|r| r.score).max().unwrap_or(0))
    }

    /// Every score record, oldest first
    fn scores(&self) -> StorageResult<Vec<ScoreRecord>>;
}
