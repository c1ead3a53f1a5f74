//! In-memory store
//!
//! Same contract as the file store, without durability. Backs tests and
//! runs that ask for no disk state.

use crate::core::clock::{ClockHandle, SystemClock};
use crate::entity::pet::PetState;
use crate::persistence::record::{ScoreRecord, StateRow};
use crate::persistence::{PetStore, StorageResult};

pub struct MemoryStore {
    row: Option<StateRow>,
    scores: Vec<ScoreRecord>,
    clock: ClockHandle,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_clock(SystemClock::handle())
    }

    pub fn with_clock(clock: ClockHandle) -> Self {
        Self {
            row: None,
            scores: Vec::new(),
            clock,
        }
    }

    /// Pre-seed the live row verbatim, keeping `state.last_updated` as is
    pub fn with_state(mut self, state: &PetState) -> Self {
        let id = self.row.as_ref().map(|r| r.id).unwrap_or(0) + 1;
        self.row = Some(StateRow::stamped(id, state, state.last_updated));
        self
    }

    /// Number of live state rows (0 or 1)
    pub fn row_count(&self) -> usize {
        usize::from(self.row.is_some())
    }

    pub fn row(&self) -> Option<&StateRow> {
        self.row.as_ref()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PetStore for MemoryStore {
    fn init(&mut self) -> StorageResult<()> {
        Ok(())
    }

    fn save(&mut self, state: &PetState) -> StorageResult<()> {
        let id = self.row.as_ref().map(|r| r.id).unwrap_or(0) + 1;
        self.row = Some(StateRow::stamped(id, state, self.clock.now()));
        Ok(())
    }

    fn load(&self) -> StorageResult<Option<PetState>> {
        match &self.row {
            Some(row) => Ok(Some(row.clone().into_state()?)),
            None => Ok(None),
        }
    }

    fn append_score(&mut self, score: u32) -> StorageResult<()> {
        let id = self.scores.len() as u64 + 1;
        self.scores.push(ScoreRecord {
            id,
            score,
            recorded_at: self.clock.now(),
        });
        Ok(())
    }

    fn scores(&self) -> StorageResult<Vec<ScoreRecord>> {
        Ok(self.scores.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::ManualClock;
    use chrono::{Duration, TimeZone, Utc};
    use std::rc::Rc;

    #[test]
    fn test_empty_store() {
        let store = MemoryStore::new();
        assert!(store.load().unwrap().is_none());
        assert_eq!(store.max_score().unwrap(), 0);
        assert_eq!(store.row_count(), 0);
    }

    #[test]
    fn test_save_replaces_row() {
        let mut store = MemoryStore::new();
        let mut state = PetState::new(Utc::now());
        for i in 0..5 {
            state.age = i;
            store.save(&state).unwrap();
        }
        assert_eq!(store.row_count(), 1);
        assert_eq!(store.row().unwrap().id, 5);
        assert_eq!(store.load().unwrap().unwrap().age, 4);
    }

    #[test]
    fn test_save_stamps_with_clock() {
        let start = Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap();
        let clock = Rc::new(ManualClock::new(start));
        let mut store = MemoryStore::with_clock(clock.clone());

        let state = PetState::new(start - Duration::days(3));
        clock.advance_secs(90);
        store.save(&state).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.last_updated, start + Duration::seconds(90));
        // The caller's copy keeps its own timestamp
        assert_eq!(state.last_updated, start - Duration::days(3));
    }

    #[test]
    fn test_with_state_keeps_timestamp() {
        let old = Utc::now() - Duration::hours(30);
        let state = PetState::new(old);
        let store = MemoryStore::new().with_state(&state);
        assert_eq!(store.load().unwrap().unwrap().last_updated, old);
    }

    #[test]
    fn test_scores_append_only() {
        let mut store = MemoryStore::new();
        for score in [3, 7, 1] {
            store.append_score(score).unwrap();
        }
        let ids: Vec<u64> = store.scores().unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(store.max_score().unwrap(), 7);
    }
}
