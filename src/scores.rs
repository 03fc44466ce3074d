//! Persistent high-score table.
//!
//! Scores live in a small JSON file. Every call opens, reads and (for
//! inserts) rewrites the file, so nothing is held open between ticks.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub score: u32,
    /// Local time, minute resolution: `YYYY-MM-DD HH:MM`.
    pub date: String,
}

pub struct ScoreStore {
    path: PathBuf,
    limit: usize,
}

impl ScoreStore {
    /// Opens the store at `path`, creating an empty table if none exists yet.
    /// Safe to call on an existing table; its contents are left alone.
    pub fn open(path: impl Into<PathBuf>, limit: usize) -> Result<Self> {
        let store = Self { path: path.into(), limit: limit.max(1) };
        if !store.path.exists() {
            if let Some(parent) = store.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {:?}", parent))?;
            }
            store.write(&[])?;
            info!(path = ?store.path, "created score table");
        }
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `score` stamped with the current local time, then drops every
    /// record below the table's lowest kept rank.
    pub fn record_score(&self, score: u32) -> Result<()> {
        let date = chrono::Local::now().format("%Y-%m-%d %H:%M").to_string();
        self.insert(ScoreRecord { score, date })
    }

    pub fn insert(&self, record: ScoreRecord) -> Result<()> {
        let mut records = self.read()?;
        records.push(record);
        prune(&mut records, self.limit);
        self.write(&records)?;
        debug!(rows = records.len(), "score table updated");
        Ok(())
    }

    /// Highest scores first, at most `limit` rows.
    pub fn top_scores(&self, limit: usize) -> Result<Vec<ScoreRecord>> {
        let mut records = self.read()?;
        records.sort_by(|a, b| b.score.cmp(&a.score));
        records.truncate(limit);
        Ok(records)
    }

    fn read(&self) -> Result<Vec<ScoreRecord>> {
        let json = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read score table from {:?}", self.path))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Score table {:?} is corrupt", self.path))
    }

    fn write(&self, records: &[ScoreRecord]) -> Result<()> {
        let json = serde_json::to_string_pretty(records).context("Failed to serialize score table")?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).with_context(|| format!("Failed to write score table to {:?}", tmp))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("Failed to replace score table {:?}", self.path))?;
        Ok(())
    }
}

/// Keeps the `limit` best scores. Rows tied with the cutoff score survive, so
/// the table can briefly hold more than `limit` rows.
fn prune(records: &mut Vec<ScoreRecord>, limit: usize) {
    if records.len() <= limit {
        return;
    }
    let mut scores: Vec<u32> = records.iter().map(|r| r.score).collect();
    scores.sort_unstable_by(|a, b| b.cmp(a));
    let cutoff = scores[limit - 1];
    records.retain(|r| r.score >= cutoff);
}
