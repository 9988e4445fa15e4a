//! All per-agent stats files matching a glob, combined into one table.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use crate::record::MatchRecord;
use crate::store::StatsFile;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("invalid file pattern: {0}")]
    Pattern(#[from] glob::PatternError),
    #[error("no stats files match '{0}'; generate some data first")]
    NoStatsFiles(String),
    #[error("none of the files matching '{0}' contain usable records")]
    NoUsableFiles(String),
}

/// `dir/stats_cautious.json` -> `cautious`.
pub fn agent_name(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    match stem.strip_prefix("stats_") {
        Some(rest) if !rest.is_empty() => rest.to_string(),
        _ => stem,
    }
}

/// The records of one agent plus where its rows start in the combined table.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentSeries {
    pub name: String,
    pub records: Vec<MatchRecord>,
    pub offset: usize,
}

impl AgentSeries {
    pub fn scores(&self) -> Vec<f64> {
        self.records.iter().map(|r| f64::from(r.score)).collect()
    }

    pub fn max_score(&self) -> Option<u32> {
        self.records.iter().map(|r| r.score).max()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    agents: Vec<AgentSeries>,
}

impl Dataset {
    pub fn load(pattern: &str) -> Result<Self, DatasetError> {
        let mut paths: Vec<PathBuf> = glob::glob(pattern)?
            .filter_map(|entry| match entry {
                Ok(p) => Some(p),
                Err(e) => {
                    warn!(error = %e, "skipping unreadable path");
                    None
                }
            })
            .collect();
        paths.sort();
        if paths.is_empty() {
            return Err(DatasetError::NoStatsFiles(pattern.to_string()));
        }

        let mut series: Vec<(String, Vec<MatchRecord>)> = Vec::with_capacity(paths.len());
        for path in &paths {
            match StatsFile::new(path).read() {
                Ok(records) if records.is_empty() => {
                    warn!(path = %path.display(), "skipping empty stats file");
                }
                Ok(records) => {
                    let name = agent_name(path);
                    if series.iter().any(|(n, _)| *n == name) {
                        warn!(
                            path = %path.display(),
                            agent = %name,
                            "agent already loaded, merging rows"
                        );
                    }
                    series.push((name, records));
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping malformed stats file");
                }
            }
        }
        if series.is_empty() {
            return Err(DatasetError::NoUsableFiles(pattern.to_string()));
        }
        let dataset = Self::from_series(series);
        info!(
            agents = dataset.agents.len(),
            rows = dataset.row_count(),
            "loaded stats files"
        );
        Ok(dataset)
    }

    /// Builds the table from `(agent, records)` pairs in order. Pairs that share
    /// an agent name are merged into the first series of that name.
    pub fn from_series(series: impl IntoIterator<Item = (String, Vec<MatchRecord>)>) -> Self {
        let mut merged: Vec<(String, Vec<MatchRecord>)> = Vec::new();
        for (name, records) in series {
            match merged.iter_mut().find(|(n, _)| *n == name) {
                Some((_, existing)) => existing.extend(records),
                None => merged.push((name, records)),
            }
        }

        let mut offset = 0;
        let agents = merged
            .into_iter()
            .map(|(name, records)| {
                let s = AgentSeries {
                    name,
                    offset,
                    records,
                };
                offset += s.records.len();
                s
            })
            .collect();
        Self { agents }
    }

    pub fn agents(&self) -> &[AgentSeries] {
        &self.agents
    }

    pub fn agent(&self, name: &str) -> Option<&AgentSeries> {
        self.agents.iter().find(|a| a.name == name)
    }

    pub fn agent_names(&self) -> Vec<String> {
        self.agents.iter().map(|a| a.name.clone()).collect()
    }

    pub fn row_count(&self) -> usize {
        self.agents.iter().map(|a| a.records.len()).sum()
    }

    /// Combined rows `(global index, agent, record)` for the given agents.
    pub fn rows<'a>(
        &'a self,
        selected: &'a [String],
    ) -> impl Iterator<Item = (usize, &'a str, &'a MatchRecord)> + 'a {
        self.agents
            .iter()
            .filter(move |a| selected.contains(&a.name))
            .flat_map(|a| {
                a.records
                    .iter()
                    .enumerate()
                    .map(move |(i, r)| (a.offset + i, a.name.as_str(), r))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(id: u64, score: u32) -> MatchRecord {
        MatchRecord {
            id,
            score,
            moves: 10,
            time_seconds: 3,
        }
    }

    #[test]
    fn agent_name_strips_prefix_and_extension() {
        assert_eq!(agent_name(Path::new("data/stats_cautious.json")), "cautious");
        assert_eq!(agent_name(Path::new("stats_agent_x.json")), "agent_x");
        assert_eq!(agent_name(Path::new("game_stats.json")), "game_stats");
    }

    #[test]
    fn offsets_accumulate() {
        let ds = Dataset::from_series([
            ("a".to_string(), vec![rec(1, 1), rec(2, 2)]),
            ("b".to_string(), vec![rec(1, 5)]),
        ]);
        assert_eq!(ds.agents()[1].offset, 2);
        assert_eq!(ds.row_count(), 3);
        let selected = vec!["b".to_string()];
        let rows: Vec<_> = ds.rows(&selected).map(|(i, a, r)| (i, a, r.score)).collect();
        assert_eq!(rows, vec![(2, "b", 5)]);
    }

    #[test]
    fn same_agent_from_two_files_is_merged() {
        let ds = Dataset::from_series([
            ("a".to_string(), vec![rec(1, 1)]),
            ("b".to_string(), vec![rec(1, 4)]),
            ("a".to_string(), vec![rec(1, 2), rec(2, 3)]),
        ]);
        assert_eq!(ds.agent_names(), vec!["a", "b"]);
        let a = ds.agent("a").unwrap();
        assert_eq!(a.scores(), vec![1.0, 2.0, 3.0]);
        assert_eq!(ds.agents()[1].offset, 3);
        assert_eq!(ds.row_count(), 4);
    }
}
