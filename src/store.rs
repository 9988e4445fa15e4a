//! JSON stats files: an append-only array of [`MatchRecord`]s.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::record::{MatchRecord, MatchStats};

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("stats file io error: {0}")]
    Io(#[from] io::Error),
    #[error("stats file is not a valid record array: {0}")]
    Json(#[from] serde_json::Error),
}

/// Id for the next record: one past the largest id present, or 1.
pub fn next_id(records: &[MatchRecord]) -> u64 {
    records.iter().map(|r| r.id).max().unwrap_or(0) + 1
}

/// Handle to a stats file on disk.
#[derive(Debug, Clone)]
pub struct StatsFile {
    path: PathBuf,
}

impl StatsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Strict read. Fails on a missing file, unreadable bytes or bad JSON.
    pub fn read(&self) -> Result<Vec<MatchRecord>, StatsError> {
        let bytes = fs::read(&self.path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// History for appending: anything that cannot be read counts as empty.
    pub fn load(&self) -> Vec<MatchRecord> {
        match self.read() {
            Ok(records) => records,
            Err(StatsError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no stats file yet, starting empty history");
                Vec::new()
            }
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "unusable stats file, starting empty history"
                );
                Vec::new()
            }
        }
    }

    /// Appends one match with the next sequential id and rewrites the file.
    pub fn append(&self, stats: MatchStats) -> Result<MatchRecord, StatsError> {
        let mut added = self.append_all([stats])?;
        Ok(added.remove(0))
    }

    /// Appends a batch with consecutive ids; returns the records written.
    pub fn append_all(
        &self,
        batch: impl IntoIterator<Item = MatchStats>,
    ) -> Result<Vec<MatchRecord>, StatsError> {
        let mut records = self.load();
        let mut id = next_id(&records);
        let start = records.len();
        for stats in batch {
            records.push(stats.with_id(id));
            id += 1;
        }
        self.overwrite(&records)?;
        Ok(records.split_off(start))
    }

    /// Replaces the file contents with `records`.
    pub fn overwrite(&self, records: &[MatchRecord]) -> Result<(), StatsError> {
        let mut buf = Vec::with_capacity(records.len() * 96);
        let fmt = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, fmt);
        records.serialize(&mut ser)?;
        fs::write(&self.path, buf)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(score: u32) -> MatchStats {
        MatchStats {
            score,
            moves: score * 10,
            time_seconds: 5,
        }
    }

    #[test]
    fn next_id_starts_at_one() {
        assert_eq!(next_id(&[]), 1);
    }

    #[test]
    fn next_id_follows_maximum() {
        let records = [stats(1).with_id(3), stats(2).with_id(7), stats(0).with_id(5)];
        assert_eq!(next_id(&records), 8);
    }

    #[test]
    fn first_append_gets_id_one_then_two() {
        let dir = tempfile::tempdir().unwrap();
        let file = StatsFile::new(dir.path().join("stats_me.json"));
        assert_eq!(file.append(stats(3)).unwrap().id, 1);
        assert_eq!(file.append(stats(1)).unwrap().id, 2);
        let all = file.read().unwrap();
        assert_eq!(all.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(all[0].score, 3);
    }

    #[test]
    fn garbage_file_is_treated_as_empty_history() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();
        let file = StatsFile::new(&path);
        assert!(file.read().is_err());
        assert!(file.load().is_empty());
        assert_eq!(file.append(stats(2)).unwrap().id, 1);
    }

    #[test]
    fn written_file_uses_four_space_indent() {
        let dir = tempfile::tempdir().unwrap();
        let file = StatsFile::new(dir.path().join("s.json"));
        file.append(stats(1)).unwrap();
        let text = fs::read_to_string(file.path()).unwrap();
        assert!(text.contains("\n        \"id\": 1"), "{text}");
    }
}
