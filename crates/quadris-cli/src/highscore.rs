use std::path::Path;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::util;

/// One saved game result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreRecord {
    pub name: String,
    pub score: usize,
    pub timestamp: DateTime<Local>,
}

/// The persistent leaderboard, capped at [`Self::MAX_RECORDS`] entries
/// sorted by score descending.
///
/// Serializes as a bare JSON array so the file stays hand-editable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HighScoreTable {
    records: Vec<HighScoreRecord>,
}

impl HighScoreTable {
    pub const MAX_RECORDS: usize = 10;

    /// Loads the table from `path`. A missing file is an empty table, not
    /// an error; any other I/O or parse failure propagates.
    pub fn load<P>(path: P) -> anyhow::Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        util::read_json_file("high score", path)
    }

    pub fn save<P>(&self, path: P) -> anyhow::Result<()>
    where
        P: AsRef<Path>,
    {
        util::write_json_file("high score", path, self)
    }

    /// Whether `score` would make it onto the table: either the table has
    /// room, or the score beats the current last place.
    #[must_use]
    pub fn qualifies(&self, score: usize) -> bool {
        if score == 0 {
            return false;
        }
        self.records.len() < Self::MAX_RECORDS
            || self.records.last().is_some_and(|last| score > last.score)
    }

    /// Inserts a result at its rank, dropping anything past the cap.
    /// Ties rank the older entry first.
    pub fn record(&mut self, name: impl Into<String>, score: usize) {
        let rank = self
            .records
            .partition_point(|record| record.score >= score);
        self.records.insert(
            rank,
            HighScoreRecord {
                name: name.into(),
                score,
                timestamp: Local::now(),
            },
        );
        self.records.truncate(Self::MAX_RECORDS);
    }

    pub fn iter(&self) -> impl Iterator<Item = &HighScoreRecord> {
        self.records.iter()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
