//! File-backed store
//!
//! Layout inside the store directory:
//! - `mango_state.json`: the live row, replaced via write-then-rename
//! - `scores.jsonl`: one `ScoreRecord` per line, only ever appended to
//!
//! A line that does not parse (a torn append after a crash, say) is skipped
//! with a warning. It never blocks reading the other records or appending
//! new ones.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::core::clock::{ClockHandle, SystemClock};
use crate::core::error::StorageError;
use crate::entity::pet::PetState;
use crate::persistence::record::{ScoreRecord, StateRow};
use crate::persistence::{PetStore, StorageResult};

const STATE_FILE: &str = "mango_state.json";
const STATE_TMP_FILE: &str = "mango_state.json.tmp";
const SCORES_FILE: &str = "scores.jsonl";

pub struct JsonFileStore {
    dir: PathBuf,
    clock: ClockHandle,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_clock(dir, SystemClock::handle())
    }

    pub fn with_clock(dir: impl Into<PathBuf>, clock: ClockHandle) -> Self {
        Self { dir: dir.into(), clock }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn state_path(&self) -> PathBuf {
        self.dir.join(STATE_FILE)
    }

    fn scores_path(&self) -> PathBuf {
        self.dir.join(SCORES_FILE)
    }

    fn read_row(&self) -> StorageResult<Option<StateRow>> {
        let path = self.state_path();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let row = serde_json::from_str(&content)
            .map_err(|source| StorageError::Corrupt { path, source })?;
        Ok(Some(row))
    }
}

impl PetStore for JsonFileStore {
    fn init(&mut self) -> StorageResult<()> {
        fs::create_dir_all(&self.dir)?;
        OpenOptions::new().create(true).append(true).open(self.scores_path())?;
        Ok(())
    }

    fn save(&mut self, state: &PetState) -> StorageResult<()> {
        // A corrupt previous row must not block replacing it
        let previous_id = self.read_row().ok().flatten().map(|row| row.id).unwrap_or(0);
        let row = StateRow::stamped(previous_id + 1, state, self.clock.now());
        let bytes = serde_json::to_vec_pretty(&row).map_err(|source| StorageError::Corrupt {
            path: self.state_path(),
            source,
        })?;

        let tmp = self.dir.join(STATE_TMP_FILE);
        {
            let mut file = File::create(&tmp)?;
            file.write_all(&bytes)?;
            file.sync_all()?;
        }
        fs::rename(&tmp, self.state_path())?;
        Ok(())
    }

    fn load(&self) -> StorageResult<Option<PetState>> {
        match self.read_row()? {
            Some(row) => Ok(Some(row.into_state()?)),
            None => Ok(None),
        }
    }

    fn append_score(&mut self, score: u32) -> StorageResult<()> {
        let id = self.scores()?.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        let record = ScoreRecord {
            id,
            score,
            recorded_at: self.clock.now(),
        };
        let line = serde_json::to_string(&record).map_err(|source| StorageError::Corrupt {
            path: self.scores_path(),
            source,
        })?;

        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(self.scores_path())?;
        // Terminate a torn last line so the new record starts on its own line
        if !ends_with_newline(&mut file)? {
            writeln!(file)?;
        }
        writeln!(file, "{}", line)?;
        file.sync_all()?;
        Ok(())
    }

    fn scores(&self) -> StorageResult<Vec<ScoreRecord>> {
        let path = self.scores_path();
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut records: Vec<ScoreRecord> = Vec::new();
        for line in BufReader::new(file).lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<ScoreRecord>(&line) {
                Ok(record) => records.push(record),
                Err(e) => tracing::warn!("Skipping unreadable score record in {:?}: {}", path, e),
            }
        }
        Ok(records)
    }
}

/// True for an empty file or one whose last byte is `\n`
fn ends_with_newline(file: &mut File) -> std::io::Result<bool> {
    if file.metadata()?.len() == 0 {
        return Ok(true);
    }
    let mut last = [0u8; 1];
    file.seek(SeekFrom::End(-1))?;
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}
